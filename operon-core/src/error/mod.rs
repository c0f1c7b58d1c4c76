//! Core error types for operon

use thiserror::Error;

/// Main error type for operon operations
#[derive(Error, Debug)]
pub enum OperonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Source file names must tokenize into accession, code, organism and strain
    #[error("Invalid file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: String },
}

/// Result type alias for operon operations
pub type OperonResult<T> = Result<T, OperonError>;

impl OperonError {
    pub fn invalid_file_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        OperonError::InvalidFileName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for OperonError {
    fn from(err: toml::de::Error) -> Self {
        OperonError::Configuration(format!("Failed to parse config: {}", err))
    }
}
