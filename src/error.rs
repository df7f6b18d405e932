//! Error types and handling for the climate API

use thiserror::Error;

/// Why a caller-supplied date was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// Date falls before the earliest or after the latest observation
    OutOfRange,
    /// Date is not a zero-padded `YYYY-MM-DD` calendar day
    BadFormat,
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationReason::OutOfRange => f.write_str("out of range"),
            ValidationReason::BadFormat => f.write_str("bad format"),
        }
    }
}

/// Main error type for the climate API
#[derive(Error, Debug)]
pub enum ClimateError {
    /// Malformed date string
    #[error("Parse error: '{input}': {message}")]
    Parse { input: String, message: String },

    /// Caller-supplied date rejected at the query boundary
    #[error("Invalid date '{input}': {reason}")]
    Validation {
        reason: ValidationReason,
        input: String,
    },

    /// The store holds no observations at all
    #[error("Dataset contains no observations")]
    EmptyDataset,

    /// Underlying query or connection failure
    #[error("Store error: {source}")]
    Store {
        #[from]
        source: sqlx::Error,
    },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ClimateError {
    /// Create a new parse error
    pub fn parse<I: Into<String>, M: Into<String>>(input: I, message: M) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(reason: ValidationReason, input: S) -> Self {
        Self::Validation {
            reason,
            input: input.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the service
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClimateError::Parse { .. } | ClimateError::Validation { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClimateError::Parse { input, .. } => {
                format!("'{input}' is not a date in YYYY-MM-DD format")
            }
            ClimateError::Validation { reason, input } => {
                format!("Invalid date '{input}': {reason}")
            }
            ClimateError::EmptyDataset => "No observations are available.".to_string(),
            ClimateError::Store { .. } => {
                "The observation store is unavailable. Please try again later.".to_string()
            }
            ClimateError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            ClimateError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let parse_err = ClimateError::parse("2021-13-01", "month out of range");
        assert!(matches!(parse_err, ClimateError::Parse { .. }));

        let validation_err = ClimateError::validation(ValidationReason::OutOfRange, "1999-01-01");
        assert!(matches!(
            validation_err,
            ClimateError::Validation {
                reason: ValidationReason::OutOfRange,
                ..
            }
        ));

        let config_err = ClimateError::config("bad port");
        assert!(matches!(config_err, ClimateError::Config { .. }));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ClimateError::parse("x", "y").is_client_error());
        assert!(ClimateError::validation(ValidationReason::BadFormat, "x").is_client_error());
        assert!(!ClimateError::EmptyDataset.is_client_error());
        assert!(!ClimateError::config("x").is_client_error());
    }

    #[test]
    fn test_user_messages() {
        let err = ClimateError::validation(ValidationReason::BadFormat, "2021-1-01");
        assert_eq!(err.user_message(), "Invalid date '2021-1-01': bad format");

        let store_err: ClimateError = sqlx::Error::PoolTimedOut.into();
        assert!(store_err.user_message().contains("unavailable"));
        assert!(!store_err.user_message().contains("timed out"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let climate_err: ClimateError = io_err.into();
        assert!(matches!(climate_err, ClimateError::Io { .. }));
    }
}
