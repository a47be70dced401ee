//! Error types shared by all user types

use thiserror::Error;

use crate::column::SqlType;

/// Errors raised while converting between domain values and column values
#[derive(Debug, Error)]
pub enum UserTypeError {
    #[error("Unexpected column type: expected {expected}, found {actual}")]
    UnexpectedColumnType {
        expected: SqlType,
        actual: SqlType,
    },

    #[error("Column not present: {0}")]
    MissingColumn(String),

    #[error("Expected {expected} columns but got {actual}")]
    ColumnCount {
        expected: usize,
        actual: usize,
    },

    #[error("Cannot convert to {target}: {message}")]
    Conversion {
        target: &'static str,
        message: String,
    },

    #[error("Cannot parse '{input}' as {target}: {message}")]
    Parse {
        input: String,
        target: &'static str,
        message: String,
    },

    #[error("Invalid value '{value}' for parameter {name}: {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Unknown user type: {0}")]
    UnknownUserType(String),

    #[error(transparent)]
    Domain(Box<dyn std::error::Error + Send + Sync>),
}

impl UserTypeError {
    pub fn conversion(target: &'static str, message: impl Into<String>) -> Self {
        UserTypeError::Conversion {
            target,
            message: message.into(),
        }
    }

    pub fn parse(input: impl Into<String>, target: &'static str, message: impl ToString) -> Self {
        UserTypeError::Parse {
            input: input.into(),
            target,
            message: message.to_string(),
        }
    }

    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        UserTypeError::InvalidParameter {
            name: name.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Wraps an error raised by a domain value type
    pub fn domain(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        UserTypeError::Domain(Box::new(error))
    }

    /// Returns true if the error was caused by a column of the wrong kind
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, UserTypeError::UnexpectedColumnType { .. })
    }
}
