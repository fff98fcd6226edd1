//! Session error types

use gallery_layout::LayoutError;
use thiserror::Error;

/// Asset lookup errors
#[derive(Debug, Error)]
pub enum AssetError {
    /// No asset registered under this name
    #[error("Asset not loaded: {0}")]
    Missing(String),

    /// Asset exists but is of another kind
    #[error("Asset '{name}' is not a {expected} model")]
    WrongKind { name: String, expected: &'static str },
}

/// Session construction and reconfiguration errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Session settings violate a constraint
    #[error("Invalid session configuration: {0}")]
    Config(String),

    #[error("Failed to parse session configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
