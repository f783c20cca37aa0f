use thiserror::Error;

/// Errors raised while validating inputs or running a transform.
///
/// Validation errors are raised before any numeric work starts; no partial
/// output is ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    #[error("Invalid parameter type for `{name}`. Expected {expected}.")]
    TypeMismatch {
        name: &'static str,
        expected: &'static str,
    },

    #[error("Incorrect parameter length for `{name}`. Expected {expected}, got {actual}.")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Insufficient data: need {needed} samples, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Filter design failed: {0}")]
    FilterDesign(String),

    #[error("Non-finite output produced by {stage} stage")]
    NonFiniteOutput { stage: &'static str },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DspError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DspError>;
