//! Error types for finsight core

use thiserror::Error;

/// Result type alias using finsight Error
pub type Result<T> = std::result::Result<T, Error>;

/// finsight error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Task error: {0}")]
    Task(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Tool-specific errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures raised while opening or reading a paginated document.
///
/// These never leave the extractor: they are folded into
/// [`Extraction::ParseFailure`](crate::tools::document::Extraction) using
/// their `Display` text as the message.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{0}")]
    Read(#[from] std::io::Error),

    #[error("{0}")]
    Backend(String),

    #[error("{0}")]
    Panicked(String),
}
