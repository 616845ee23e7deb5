#[derive(Debug, thiserror::Error)]
pub enum TcgpError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required credential or setting is missing. Fatal to the feature that
    /// needs it; reported once rather than retried.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-2xx answer from the hosted model. `message` is shown to the user as-is.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("A chat request is already in flight")]
    Busy,
}

impl TcgpError {
    /// Whether the user can reasonably resend the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TcgpError::Http(_) | TcgpError::Upstream { .. } | TcgpError::EmptyResponse
        )
    }
}

pub type Result<T> = std::result::Result<T, TcgpError>;
