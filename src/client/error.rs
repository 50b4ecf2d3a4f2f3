//! Error types for the search client

/// Result type for client operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the search client
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The input produced no ingredients, so nothing was sent
    #[error("Enter at least one ingredient")]
    NoIngredients,

    /// Connection, timeout or other transport failure
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
