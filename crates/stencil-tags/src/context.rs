//! Tag invocation context and the renderer boundary.

use stencil_core::{Deferred, Document};

use crate::error::{Result, TagError};

/// Everything a tag renderer receives for one invocation: the tag's name
/// and its parameters, already resolved to documents in call order.
#[derive(Debug, Clone)]
pub struct TagContext {
    pub name: String,
    pub parameters: Vec<Document>,
}

impl TagContext {
    pub fn new(name: impl Into<String>, parameters: Vec<Document>) -> Self {
        TagContext {
            name: name.into(),
            parameters,
        }
    }

    /// Construct a contextual error for this invocation.
    pub fn error(&self, reason: impl Into<String>) -> TagError {
        TagError {
            tag: self.name.clone(),
            reason: reason.into(),
        }
    }
}

/// Renders a tag invocation into a deferred document.
///
/// Renderers read parameters leniently through the document accessors;
/// a missing or incompatible parameter yields a `Null` result document
/// rather than an error. Arity violations fail synchronously. The result
/// is always wrapped as deferred, even when the computation behind it is
/// synchronous.
pub trait TagRenderer {
    fn render(&self, tag: TagContext) -> Result<Deferred>;
}
