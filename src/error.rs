//! Error types for quickgltf

use thiserror::Error;

/// Error type for glTF decoding operations
///
/// The taxonomy is deliberately flat: every schema violation inside the
/// document maps to [`GltfError::InvalidDocument`], with the payload string
/// carrying context for diagnostics only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GltfError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Missing or malformed top-level asset field")]
    MissingAssetInfo,

    #[error("Invalid glTF document: {0}")]
    InvalidDocument(String),
}

/// Result type alias for decoding operations
pub type Result<T> = std::result::Result<T, GltfError>;
