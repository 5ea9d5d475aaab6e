use thiserror::Error;

#[derive(Debug, Error)]
pub enum LithoError {
    /// The base URL or the underlying HTTP client could not be set up.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Rejected before anything was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A generation call failed. Displays as the bare message so it can be
    /// shown to users as-is.
    #[error("{0}")]
    RequestFailed(String),
}

impl LithoError {
    pub fn message(&self) -> &str {
        match self {
            LithoError::ConfigError(msg)
            | LithoError::InvalidRequest(msg)
            | LithoError::RequestFailed(msg) => msg,
        }
    }
}

pub type Result<T> = std::result::Result<T, LithoError>;
