//! Error types for the AoC HTTP client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AocError {
    /// Transport failure, including timeouts
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Invalid HTTP status: {status}")]
    InvalidStatus { status: reqwest::StatusCode },

    #[error("Failed to decode response as UTF-8")]
    Encoding,

    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

impl AocError {
    /// True when the server rejected the session cookie
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AocError::InvalidStatus { status }
                if *status == reqwest::StatusCode::BAD_REQUEST
                    || *status == reqwest::StatusCode::UNAUTHORIZED
                    || *status == reqwest::StatusCode::FORBIDDEN
        )
    }
}
