use crate::types::Language;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BnError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Unknown resource: {0}")]
    UnknownResource(String),
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Input too large: {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },
    #[error("{language} syntax error at line {line}, column {column}: {message}")]
    Syntax {
        language: Language,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("{language} formatting failed: {message}")]
    Format { language: Language, message: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BnError {
    pub fn format(language: Language, message: impl Into<String>) -> Self {
        Self::Format { language, message: message.into() }
    }

    /// True for errors caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Other(_) | Self::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, BnError>;
