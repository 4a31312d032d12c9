//! Errors produced while assembling or serializing a stack.
//!
//! Policy generation itself is pure data construction and cannot fail;
//! errors only arise at the stack-assembly boundary (logical id and
//! output collisions) and when rendering a template to JSON.

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Stack assembly and synthesis errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two resources were registered under the same logical id.
    #[error("duplicate logical id: {0}")]
    DuplicateLogicalId(String),

    /// Two outputs were registered under the same name.
    #[error("duplicate output name: {0}")]
    DuplicateOutput(String),

    /// Template serialization failed.
    #[error("failed to serialize template")]
    Json(#[from] serde_json::Error),
}
