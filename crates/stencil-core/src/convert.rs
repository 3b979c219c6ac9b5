//! Conversion of host values into documents.
//!
//! Two entry points cover the two ways values reach the conversion layer:
//!
//! - [`ToDocument`] is the statically-typed interface. Every primitive
//!   host kind the engine accepts (booleans, fixed-width integers,
//!   floats, text, dates, unique identifiers) is registered here, along
//!   with the optional and deferred wrappers.
//! - [`HostValue`] is the dynamically-shaped interface: a closed set of
//!   exactly four capabilities, dispatched by [`convert`] in a single
//!   exhaustive match. No reflection, no downcasting.
//!
//! Conversion is synchronous. Meeting a deferred value produces an
//! unresolved `Future` leaf immediately; the wrapped computation is
//! dispatched through this module again when the leaf is awaited.

use std::future::Future;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use futures_util::future::{BoxFuture, FutureExt};
use uuid::Uuid;

use crate::document::Document;
use crate::encoder::encode;
use crate::error::{ConvertError, Result};
use crate::future::Deferred;

/// Capable of being converted into a [`Document`].
pub trait ToDocument {
    fn to_document(self) -> Result<Document>;
}

impl ToDocument for Document {
    fn to_document(self) -> Result<Document> {
        Ok(self)
    }
}

impl ToDocument for Deferred {
    fn to_document(self) -> Result<Document> {
        Ok(Document::Future(self))
    }
}

impl ToDocument for bool {
    fn to_document(self) -> Result<Document> {
        Ok(Document::Bool(self))
    }
}

impl ToDocument for String {
    fn to_document(self) -> Result<Document> {
        Ok(Document::String(self))
    }
}

impl ToDocument for &str {
    fn to_document(self) -> Result<Document> {
        Ok(Document::String(self.to_owned()))
    }
}

impl ToDocument for f64 {
    fn to_document(self) -> Result<Document> {
        Ok(Document::Double(self))
    }
}

impl ToDocument for f32 {
    fn to_document(self) -> Result<Document> {
        Ok(Document::Double(f64::from(self)))
    }
}

// The bound is strict on both ends: i64::MIN and i64::MAX themselves are
// rejected. Intentional; do not widen to an inclusive check.
macro_rules! signed_to_document {
    ($($ty:ty),* $(,)?) => {$(
        impl ToDocument for $ty {
            fn to_document(self) -> Result<Document> {
                let wide = self as i128;
                if wide <= i64::MIN as i128 || wide >= i64::MAX as i128 {
                    return Err(ConvertError::IntegerRange {
                        value: self.to_string(),
                    });
                }
                Ok(Document::Int(self as i64))
            }
        }
    )*};
}

macro_rules! unsigned_to_document {
    ($($ty:ty),* $(,)?) => {$(
        impl ToDocument for $ty {
            fn to_document(self) -> Result<Document> {
                if self as u128 >= i64::MAX as u128 {
                    return Err(ConvertError::IntegerRange {
                        value: self.to_string(),
                    });
                }
                Ok(Document::Int(self as i64))
            }
        }
    )*};
}

signed_to_document!(i8, i16, i32, i64, i128, isize);
unsigned_to_document!(u8, u16, u32, u64, u128, usize);

/// Dates become `Double` epoch seconds, fractional part preserved.
impl ToDocument for DateTime<Utc> {
    fn to_document(self) -> Result<Document> {
        let seconds =
            self.timestamp() as f64 + f64::from(self.timestamp_subsec_nanos()) / 1e9;
        Ok(Document::Double(seconds))
    }
}

impl ToDocument for SystemTime {
    fn to_document(self) -> Result<Document> {
        let seconds = match self.duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_secs_f64(),
            Err(before) => -before.duration().as_secs_f64(),
        };
        Ok(Document::Double(seconds))
    }
}

/// Unique identifiers become their canonical hyphenated string form.
impl ToDocument for Uuid {
    fn to_document(self) -> Result<Document> {
        Ok(Document::String(self.to_string()))
    }
}

impl<T: ToDocument> ToDocument for Option<T> {
    fn to_document(self) -> Result<Document> {
        match self {
            Some(value) => value.to_document(),
            None => Ok(Document::Null),
        }
    }
}

/// A primitive host payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
    Date(DateTime<Utc>),
    Uuid(Uuid),
}

impl ToDocument for Scalar {
    fn to_document(self) -> Result<Document> {
        match self {
            Scalar::Bool(value) => value.to_document(),
            Scalar::Int(value) => value.to_document(),
            Scalar::Double(value) => value.to_document(),
            Scalar::Text(value) => value.to_document(),
            Scalar::Date(value) => value.to_document(),
            Scalar::Uuid(value) => value.to_document(),
        }
    }
}

/// A dynamically-shaped host value: the closed set of capabilities the
/// conversion layer accepts.
#[derive(Debug)]
pub enum HostValue {
    /// A primitive payload mapping directly onto a scalar document.
    Scalar(Scalar),
    /// An optional wrapper; absent becomes `Null`, present recurses.
    Optional(Option<Box<HostValue>>),
    /// A deferred computation producing another host value.
    Deferred(DeferredHost),
    /// Structured data routed through the structured encoder.
    Encodable(serde_json::Value),
}

/// A pending host-value computation, converted on resolution.
pub struct DeferredHost {
    inner: BoxFuture<'static, Result<HostValue>>,
}

impl DeferredHost {
    /// Wrap a computation that yields a host value or fails.
    pub fn new<F>(computation: F) -> Self
    where
        F: Future<Output = Result<HostValue>> + Send + 'static,
    {
        DeferredHost {
            inner: computation.boxed(),
        }
    }

    /// Wrap an infallible host-value computation.
    pub fn value<F>(computation: F) -> Self
    where
        F: Future<Output = HostValue> + Send + 'static,
    {
        DeferredHost::new(computation.map(Ok))
    }

    /// A deferred computation whose payload sits outside the closed
    /// capability set. Producers bridging foreign host data use this to
    /// signal the payload's type; resolution fails with
    /// [`ConvertError::FutureNotConvertible`].
    pub fn unconvertible(type_name: impl Into<String>) -> Self {
        let error = ConvertError::future_not_convertible(type_name);
        DeferredHost::new(std::future::ready(Err(error)))
    }
}

impl std::fmt::Debug for DeferredHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DeferredHost(..)")
    }
}

/// Convert a host value into a document. Synchronous: a deferred value
/// yields its `Future` leaf immediately, and the leaf dispatches the
/// resolved payload back through this function when awaited. Resolution
/// failures surface only through the leaf, never here.
pub fn convert(value: HostValue) -> Result<Document> {
    match value {
        HostValue::Scalar(scalar) => scalar.to_document(),
        HostValue::Optional(None) => Ok(Document::Null),
        HostValue::Optional(Some(inner)) => convert(*inner),
        HostValue::Deferred(deferred) => {
            let inner = deferred.inner;
            Ok(Document::Future(Deferred::new(async move {
                convert(inner.await?)
            })))
        }
        HostValue::Encodable(value) => encode(&value),
    }
}
