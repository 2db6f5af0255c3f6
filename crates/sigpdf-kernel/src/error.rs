//! Error types for signal PDF registration, lookup, and evaluation.

use std::fmt;

/// Which of the two bound functions an arity check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundRole {
    Differential,
    Normalization,
}

impl fmt::Display for BoundRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Differential => write!(f, "differential"),
            Self::Normalization => write!(f, "normalization"),
        }
    }
}

/// Errors arising while naming, registering, or evaluating signal PDFs.
///
/// A lookup miss is not an error: registry lookups return `None` instead.
#[derive(Debug, thiserror::Error)]
pub enum SignalPdfError {
    /// A qualified name string is malformed.
    #[error("signal PDF name '{name}' is malformed: {reason}")]
    NameFormat { name: String, reason: String },

    /// The declared names do not match the arity of a bound function.
    ///
    /// Raised at registration; a catalog carrying this defect must not be served.
    #[error(
        "signal PDF '{name}' declares {declared} names for its {role} function, which takes {arity} arguments"
    )]
    ArityMismatch {
        name: String,
        role: BoundRole,
        declared: usize,
        arity: usize,
    },

    /// A declared kinematic variable is absent from the kinematics at evaluation time.
    #[error("unknown kinematic variable: {0}")]
    UnknownKinematicVariable(String),

    /// A parameter name could not be resolved.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// A model rejected one of its options.
    #[error("invalid value '{value}' for option '{key}': {reason}")]
    InvalidOption {
        key: String,
        value: String,
        reason: String,
    },

    /// Two registrations share the same qualified name.
    #[error("duplicate signal PDF entry: {0}")]
    DuplicateEntry(String),

    /// Configuration text could not be read.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SignalPdfError {
    pub(crate) fn name_format(name: &str, reason: impl Into<String>) -> Self {
        Self::NameFormat {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the caller can recover by fixing its inputs and retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownKinematicVariable(_) | Self::UnknownParameter(_)
        )
    }
}

impl From<toml::de::Error> for SignalPdfError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SignalPdfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_mismatch_message_names_the_role() {
        let err = SignalPdfError::ArityMismatch {
            name: "Test::Legendre1D".to_string(),
            role: BoundRole::Normalization,
            declared: 1,
            arity: 2,
        };
        assert_eq!(
            err.to_string(),
            "signal PDF 'Test::Legendre1D' declares 1 names for its normalization function, which takes 2 arguments"
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn missing_kinematics_are_recoverable() {
        assert!(SignalPdfError::UnknownKinematicVariable("z".into()).is_recoverable());
    }
}
