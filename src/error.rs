use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("Dimension mismatch: vectors of length {left} and {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("ID {0} not found")]
    UnknownId(String),

    #[error("Clustering deadline exceeded after {0} candidates")]
    DeadlineExceeded(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("LLM returned empty response")]
    LlmEmptyResponse,

    #[error("No valid embedded news found in {0}")]
    NoRecords(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl NewsError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        NewsError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NewsError>;
