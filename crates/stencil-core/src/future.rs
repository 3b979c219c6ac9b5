//! Deferred document leaves.
//!
//! A [`Deferred`] is the payload of [`Document::Future`]: a handle to an
//! asynchronous computation yielding a document. The handle is lazy (the
//! computation does not run until someone awaits it), clonable (every
//! clone observes the same single resolution), and runtime-agnostic (it
//! is driven by whichever execution context awaits it). There is no
//! cancellation and no timeout; a leaf either resolves or never does.
//!
//! [`Document::Future`]: crate::Document::Future

use std::fmt;
use std::future::Future;

use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::document::Document;
use crate::error::{ConvertError, Result};

/// A one-shot deferred document computation.
#[derive(Clone)]
pub struct Deferred {
    inner: Shared<BoxFuture<'static, Result<Document>>>,
}

impl Deferred {
    /// Wrap an asynchronous computation. The computation is not started;
    /// it runs when the leaf is first awaited, and its outcome is cached
    /// for every later awaiter.
    pub fn new<F>(computation: F) -> Self
    where
        F: Future<Output = Result<Document>> + Send + 'static,
    {
        Deferred {
            inner: computation.boxed().shared(),
        }
    }

    /// A deferred wrapper around an already-computed document. Synchronous
    /// results are wrapped this way for interface uniformity.
    pub fn ready(document: Document) -> Self {
        Deferred::new(std::future::ready(Ok(document)))
    }

    /// A deferred wrapper that fails on resolution.
    pub fn fail(error: ConvertError) -> Self {
        Deferred::new(std::future::ready(Err(error)))
    }

    /// Await the resolution. The first call drives the computation;
    /// subsequent calls (on this handle or any clone) observe the cached
    /// outcome. Failures surface only here, never to the call that
    /// produced the leaf.
    pub async fn resolve(&self) -> Result<Document> {
        self.inner.clone().await
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred(..)")
    }
}
