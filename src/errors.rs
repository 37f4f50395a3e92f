use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unexpected response status for {method} {path}: expected {expected}, got {actual}: {body}")]
    UnexpectedStatus {
        method: String,
        path: String,
        expected: String,
        actual: u16,
        body: String,
    },

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Missing field in API response: {0}")]
    MissingField(String),

    #[error("No authenticated session: {0}")]
    SessionError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to read file: {0}")]
    IoError(String),
}

impl ApiError {
    /// Status code of an `UnexpectedStatus` error, `None` for every other kind.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedStatus { actual, .. } => Some(*actual),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::ParseError(error.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(error: std::io::Error) -> Self {
        ApiError::IoError(error.to_string())
    }
}
