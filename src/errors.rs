//! Unified error types for the supplier console.
//!
//! Every fallible operation in the crate returns [`Result`]. A supplier that does
//! not exist is never an error: lookups return `Ok(None)` instead.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A form field failed validation before reaching the database
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// Why it was rejected
        message: String,
    },

    /// Transaction amount is negative, NaN or infinite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Error raised by the direct SQL backend
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Transport-level failure talking to the hosted gateway
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Structured error body returned by the hosted gateway
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Database error code, when the gateway reports one
        code: Option<String>,
        /// Human-readable message
        message: String,
        /// Extra detail from the database
        details: Option<String>,
        /// Hint from the database
        hint: Option<String>,
    },

    /// Response that could not be decoded into the expected shape
    #[error("Malformed response from {context}: {message}")]
    Decode {
        /// Which call produced the response
        context: String,
        /// Decoder message
        message: String,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the failure came from the database or the network call to it,
    /// as opposed to bad local input or configuration.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Http(_) | Self::Upstream { .. } | Self::Decode { .. }
        )
    }

    /// Whether retrying the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            Self::Database(sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_)) => {
                true
            }
            _ => false,
        }
    }

    /// Short message suitable for showing to an operator.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { .. } | Self::InvalidAmount { .. } => self.to_string(),
            Self::Config { .. } | Self::EnvVar(_) | Self::Io(_) | Self::Json(_) => {
                "The console is not configured correctly".to_string()
            }
            _ if self.is_retryable() => {
                "Could not reach the supplier database, please try again".to_string()
            }
            _ => "The supplier database rejected the request".to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
