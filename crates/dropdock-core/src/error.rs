use thiserror::Error;

/// Result type alias for dropdock operations
pub type Result<T> = std::result::Result<T, DropdockError>;

/// Errors that can occur while syncing the DROP list into Pi-hole
#[derive(Error, Debug)]
pub enum DropdockError {
    /// The DROP feed could not be fetched or decoded
    #[error("feed fetch failed: {0}")]
    Fetch(String),

    /// Pi-hole rejected the credential or no session could be established
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Pi-hole answered with a status outside 200/201/204
    #[error("request failed ({status}): {body}")]
    Request {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Invalid configuration or arguments, raised before any request is made
    #[error("validation error: {0}")]
    Validation(String),

    /// HTTP transport failed (connect, TLS, read)
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error (log file handling)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DropdockError {
    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Returns the HTTP status code if Pi-hole answered with an error status
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}
