//! Error types for the catalog client layer.
//!
//! Uses `thiserror` for structured errors with automatic `From`
//! implementations. Only fetch failures reach the user; normalization and
//! download problems are absorbed at their call sites.

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not decode as a record listing.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response).
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body or message.
        message: String,
    },

    /// Any other non-success HTTP status.
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body or message.
        message: String,
    },

    /// Filesystem error while saving a download.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// HTTP status carried by this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
