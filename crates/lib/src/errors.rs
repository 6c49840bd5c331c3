use thiserror::Error;

/// Errors from fetching or processing the fault-case knowledge base.
#[derive(Error, Debug, Clone)]
pub enum KbError {
    #[error("Failed to load knowledge base: {0}")]
    LoadFailed(String),
    #[error("Failed to process knowledge base: {0}")]
    ProcessFailed(String),
}

impl From<reqwest::Error> for KbError {
    fn from(err: reqwest::Error) -> Self {
        KbError::LoadFailed(err.to_string())
    }
}

/// Errors from validating a user-supplied attachment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("File '{file_name}' is too large ({size} bytes)")]
    TooLarge { file_name: String, size: usize },
    #[error("File '{file_name}' has unsupported media type '{media_type}'")]
    UnsupportedType {
        file_name: String,
        media_type: String,
    },
}

/// Errors from the generative-model provider.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to send request to model provider: {0}")]
    Request(reqwest::Error),
    #[error("Model provider rejected the request: region not supported")]
    RegionRestricted,
    #[error("Model provider rejected the credentials")]
    InvalidCredentials,
    #[error("Model provider rejected request content: {0}")]
    UnsupportedContent(String),
    #[error("Model provider error: {0}")]
    Other(String),
}
