//! Error type for tag rendering.

use thiserror::Error;

/// A contextual tag failure carrying a short reason, constructed through
/// [`TagContext::error`](crate::TagContext::error).
///
/// Lenient parameter problems never produce this; a renderer degrades to
/// a `Null` document instead. Arity violations always do.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("tag `{tag}`: {reason}")]
pub struct TagError {
    /// Name of the tag that failed.
    pub tag: String,
    /// Short human-readable reason.
    pub reason: String,
}

/// Convenience alias used throughout stencil-tags.
pub type Result<T> = std::result::Result<T, TagError>;
