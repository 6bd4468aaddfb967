use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImagineError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },
    #[error("Response error: {0}")]
    Response(String),
    #[error("Response is missing field '{0}'")]
    MissingField(&'static str),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ImagineError {
    /// Validation errors are rejected before any request is made; every
    /// other variant came from talking to the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, ImagineError::Validation(_))
    }
}

impl From<reqwest::Error> for ImagineError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ImagineError::Response(e.to_string())
        } else {
            ImagineError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ImagineError {
    fn from(e: serde_json::Error) -> Self {
        ImagineError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImagineError>;
