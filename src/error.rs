// File: src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NlpError>;

#[derive(Error, Debug)]
pub enum NlpError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Word '{word}' has a zero count in the global corpus")]
    ZeroWordCount { word: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
