//! Declarative constraints attached to a field.

use regex::Regex;

use crate::error::FieldError;
use crate::value::Kind;

/// A compiled pattern together with the source it was built from.
///
/// Matching is an unanchored search over the value's text, so anchors must be
/// written into the pattern (`^[0-9]+$`) to constrain the whole string.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern.
    ///
    /// A malformed pattern is a configuration error and is returned to the
    /// caller immediately.
    pub fn new(source: impl Into<String>) -> Result<Self, FieldError> {
        let source = source.into();
        match Regex::new(&source) {
            Ok(regex) => Ok(Self { source, regex }),
            Err(err) => Err(FieldError::InvalidPattern {
                pattern: source,
                source: err,
            }),
        }
    }

    /// The pattern source as supplied.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Search `text` for a match.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// The constraint set of a field.
///
/// Owned by the field and mutated through its setters; validators receive a
/// snapshot taken when an evaluation starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub kind: Kind,
    pub pattern: Option<Pattern>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub required: bool,
}

impl Constraints {
    /// Create an empty constraint set for the given kind.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Set the pattern. An empty source clears it.
    pub fn pattern(mut self, source: &str) -> Result<Self, FieldError> {
        self.pattern = compile_pattern(Some(source))?;
        Ok(self)
    }

    /// Set the minimum value.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the maximum value.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Compile an optional pattern source; `None` and `""` mean "no pattern".
pub(crate) fn compile_pattern(source: Option<&str>) -> Result<Option<Pattern>, FieldError> {
    match source {
        Some(s) if !s.is_empty() => Pattern::new(s).map(Some),
        _ => Ok(None),
    }
}
