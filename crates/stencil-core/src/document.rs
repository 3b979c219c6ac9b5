//! The document value type consumed by the rendering layer.
//!
//! A [`Document`] is a closed tagged union mirroring the shapes template
//! contexts are built from: scalars, ordered arrays, insertion-ordered
//! dictionaries, and deferred leaves that resolve to further documents
//! out-of-band. Dictionaries use `Vec<(String, Document)>` to maintain
//! insertion order without depending on `IndexMap`.

use std::future::Future;

use serde::Serialize;

use crate::convert::ToDocument;
use crate::encoder::encode;
use crate::future::Deferred;

/// A template document value.
#[derive(Debug, Clone)]
pub enum Document {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    /// Elements in insertion order.
    Array(Vec<Document>),
    /// Key-value pairs in insertion order, one entry per field name.
    Dictionary(Vec<(String, Document)>),
    /// A deferred computation yielding a further document. Resolves exactly
    /// once; nested deferred results are preserved, not flattened.
    Future(Deferred),
}

impl Document {
    /// Best-effort numeric read: `Double` as-is, `Int` widened, everything
    /// else absent. No other coercions exist.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Document::Double(value) => Some(*value),
            Document::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Best-effort text read: `String` payloads only. Numbers are never
    /// stringified.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Document::String(value) => Some(value),
            _ => None,
        }
    }

    /// `Bool` payloads only.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Document::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// `Array` payloads only.
    pub fn as_array(&self) -> Option<&[Document]> {
        match self {
            Document::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// `Dictionary` payloads only.
    pub fn as_dictionary(&self) -> Option<&[(String, Document)]> {
        match self {
            Document::Dictionary(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    /// Look up a dictionary field by name.
    pub fn get(&self, key: &str) -> Option<&Document> {
        match self {
            Document::Dictionary(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Human-readable variant name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Null => "null",
            Document::Bool(_) => "bool",
            Document::Int(_) => "int",
            Document::Double(_) => "double",
            Document::String(_) => "string",
            Document::Array(_) => "array",
            Document::Dictionary(_) => "dictionary",
            Document::Future(_) => "future",
        }
    }

    /// Wrap a typed asynchronous computation as a `Future` leaf. The
    /// computation's output is converted when the leaf is awaited; the
    /// call itself returns immediately.
    pub fn future<F, T>(computation: F) -> Document
    where
        F: Future<Output = T> + Send + 'static,
        T: ToDocument + Send + 'static,
    {
        Document::Future(Deferred::new(async move {
            computation.await.to_document()
        }))
    }

    /// Wrap an asynchronous computation whose output is generically
    /// encodable rather than directly convertible. The output is routed
    /// through the structured encoder when the leaf is awaited.
    pub fn future_encodable<F, T>(computation: F) -> Document
    where
        F: Future<Output = T> + Send + 'static,
        T: Serialize + Send + 'static,
    {
        Document::Future(Deferred::new(async move { encode(&computation.await) }))
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Document::Null, Document::Null) => true,
            (Document::Bool(a), Document::Bool(b)) => a == b,
            (Document::Int(a), Document::Int(b)) => a == b,
            (Document::Double(a), Document::Double(b)) => a == b,
            (Document::String(a), Document::String(b)) => a == b,
            (Document::Array(a), Document::Array(b)) => a == b,
            (Document::Dictionary(a), Document::Dictionary(b)) => a == b,
            // A pending computation has no value identity.
            (Document::Future(_), Document::Future(_)) => false,
            _ => false,
        }
    }
}
