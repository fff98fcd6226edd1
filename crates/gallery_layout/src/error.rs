//! Error types for target configuration

use thiserror::Error;

/// Target configuration errors
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Config is structurally valid but violates a constraint
    #[error("Invalid target configuration: {0}")]
    InvalidConfig(String),

    /// Config could not be parsed
    #[error("Failed to parse target configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
