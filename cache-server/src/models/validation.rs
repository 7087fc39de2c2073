//! Validation error types

use std::fmt;

/// Validation error for request payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is present but empty
    Empty { field: &'static str },

    /// Required field was not supplied
    Missing { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::Missing { field } => write!(f, "{} is required", field),
        }
    }
}

impl std::error::Error for ValidationError {}
