use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse tracking JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Cycle detected in workflow tree at node '{key}'")]
    CycleDetected { key: String },

    #[error("Invalid layout configuration: {0}")]
    InvalidLayoutConfig(String),

    #[error("Node is not part of this workflow tree")]
    UnknownNode,
}

pub type Result<T> = std::result::Result<T, Error>;
