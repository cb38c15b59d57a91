/// The aggregated result of one validation run.
///
/// Always replaced as a whole; never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// One composite message per failing validator, in registration order.
    pub messages: Vec<String>,
    /// Externally visible flag. Forced to `false` while the field is disabled.
    pub invalid: bool,
    /// The canonical empty-value message is among the messages.
    pub required_empty: bool,
}

impl ValidationResult {
    /// Derive the flags from collected messages.
    ///
    /// `empty_message` is the canonical "value cannot be empty" message; it is
    /// looked up as a whole run between `;` joins of each composite message,
    /// so it may itself contain `;`.
    pub fn new(messages: Vec<String>, disabled: bool, empty_message: &str) -> Self {
        let required_empty = messages.iter().any(|m| contains_run(m, empty_message));
        let invalid = !disabled && !messages.is_empty();
        Self {
            messages,
            invalid,
            required_empty,
        }
    }

    /// Check if the field passed all validators.
    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }

    /// Get the first message (if any).
    pub fn first_message(&self) -> Option<&str> {
        self.messages.first().map(String::as_str)
    }
}

/// Whether `run` is one of the parts `;`-joined into `message`.
fn contains_run(message: &str, run: &str) -> bool {
    message == run
        || message.starts_with(&format!("{run};"))
        || message.ends_with(&format!(";{run}"))
        || message.contains(&format!(";{run};"))
}

/// What a call to `validate()` ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The evaluation was the latest one initiated and its result was applied.
    Applied(ValidationResult),
    /// A newer evaluation was initiated, or the field was detached, before
    /// this one completed. Its result was discarded.
    Superseded,
}

impl ValidationOutcome {
    /// The applied result, if any.
    pub fn result(&self) -> Option<&ValidationResult> {
        match self {
            Self::Applied(result) => Some(result),
            Self::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}
