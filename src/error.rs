//! Custom error types for budgetdash
//!
//! This module defines the error hierarchy for the application using thiserror.
//! Fetch failures are split into the three ways a GraphQL call can go wrong:
//! no response at all, a non-2xx status, or errors reported inside a 2xx body.

use thiserror::Error;

/// The main error type for budgetdash operations
#[derive(Error, Debug)]
pub enum DashError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// No response was received from the API
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The API answered 2xx but reported GraphQL errors
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// Missing or rejected credentials
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl DashError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for tenants
    pub fn tenant_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Tenant",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether the caller should drop the session and go back to login
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated(_) | Self::Http { status: 401, .. }
        )
    }

    /// Whether the API refused the request outright (usually a missing API key)
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Http { status: 403, .. })
    }

    /// Whether this error came from talking to the API
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Http { .. } | Self::GraphQl(_) | Self::Unauthenticated(_)
        )
    }

    /// HTTP status attached to the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DashError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for DashError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Http {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => Self::Network(err.to_string()),
        }
    }
}

/// Result type alias for budgetdash operations
pub type DashResult<T> = Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = DashError::transaction_not_found("tx-1");
        assert_eq!(err.to_string(), "Transaction not found: tx-1");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_graphql_error_joins_messages() {
        let err = DashError::GraphQl(vec!["bad month".into(), "bad year".into()]);
        assert_eq!(err.to_string(), "GraphQL error: bad month; bad year");
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn test_auth_and_forbidden_predicates() {
        let unauthorized = DashError::Http {
            status: 401,
            message: "expired".into(),
        };
        assert!(unauthorized.is_auth_failure());
        assert!(!unauthorized.is_forbidden());

        let forbidden = DashError::Http {
            status: 403,
            message: "Forbidden".into(),
        };
        assert!(forbidden.is_forbidden());
        assert_eq!(forbidden.status_code(), Some(403));

        assert!(DashError::Unauthenticated("no token".into()).is_auth_failure());
        assert!(!DashError::Network("refused".into()).is_auth_failure());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DashError = io_err.into();
        assert!(matches!(err, DashError::Io(_)));
    }
}
