//! Field values, input kinds and raw-text coercion.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The semantic input type of a field.
///
/// The kind decides how raw text is coerced into a [`Value`], which built-in
/// checks apply and whether the native control has an addressable caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Kind {
    #[default]
    Text,
    Number,
    Password,
    Email,
    Search,
    Tel,
    Url,
    Color,
    Range,
    Date,
}

impl Kind {
    /// The HTML-style type name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Password => "password",
            Self::Email => "email",
            Self::Search => "search",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Color => "color",
            Self::Range => "range",
            Self::Date => "date",
        }
    }

    /// Whether raw input is coerced to a number and range checks apply.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Number)
    }

    /// Whether the native control exposes a text caret that can be positioned.
    pub fn has_caret(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Password | Self::Search | Self::Tel | Self::Url
        )
    }
}

impl FromStr for Kind {
    type Err = Infallible;

    /// Parses a type name. Unknown names fall back to [`Kind::Text`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "number" => Self::Number,
            "password" => Self::Password,
            "email" => Self::Email,
            "search" => Self::Search,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "color" => Self::Color,
            "range" => Self::Range,
            "date" => Self::Date,
            _ => Self::Text,
        })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The datum bound to a field.
///
/// `Null` is absence and is distinct from `Number(0.0)` and `Text("")`.
/// `Number(NAN)` is what non-numeric input on a numeric field produces: it
/// counts as present for required checks but never takes part in range checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Value {
    /// `Null` or the empty string. `0`, `false` and `NaN` are not empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    /// True for the not-a-number value produced by unparsable numeric input.
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::Number(n) if n.is_nan())
    }

    /// The value as a real number, for range checks.
    ///
    /// Text is parsed so that values assigned programmatically as strings are
    /// still range-checked. `NaN`, infinities and unparsable text yield `None`.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Null | Self::Bool(_) => return None,
        };
        n.is_finite().then_some(n)
    }

    /// The textual form used for pattern matching. `None` for `Null`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
        }
    }
}

impl fmt::Display for Value {
    /// Renders the text shown in the native control.
    ///
    /// `Null` and `NaN` render as the empty string. Display never mutates
    /// the underlying value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Number(n) if n.is_nan() => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Converts raw text from the native control into a typed value.
///
/// Numeric kinds map the empty string to `Null` and anything that is not a
/// finite number to `NaN`. Every other kind keeps the raw string as-is.
pub fn coerce(raw: &str, kind: Kind) -> Value {
    if !kind.is_numeric() {
        return Value::Text(raw.to_string());
    }
    if raw.is_empty() {
        return Value::Null;
    }
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Number(n),
        _ => Value::Number(f64::NAN),
    }
}
