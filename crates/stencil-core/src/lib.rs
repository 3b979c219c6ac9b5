//! # stencil-core
//!
//! Structured-data conversion layer for a template-rendering engine.
//!
//! Host values — primitives, optionals, nested objects/arrays, and
//! deferred (asynchronous) results — become a canonical, self-describing
//! [`Document`] that a rendering layer consumes to fill template
//! placeholders and evaluate tag parameters.
//!
//! ## Quick start
//!
//! ```rust
//! use serde::Serialize;
//! use stencil_core::encode;
//!
//! #[derive(Serialize)]
//! struct Page {
//!     title: String,
//!     tags: Vec<String>,
//! }
//!
//! let page = Page {
//!     title: "hello".into(),
//!     tags: vec!["rust".into()],
//! };
//! let doc = encode(&page).unwrap();
//! assert_eq!(doc.get("title").unwrap().as_string(), Some("hello"));
//! ```
//!
//! ## Modules
//!
//! - [`document`] — the tagged-union document type and its lenient accessors
//! - [`convert`] — host-value conversion (`ToDocument`, `HostValue`, `convert`)
//! - [`encoder`] — generic structured encoding of `serde::Serialize` values
//! - [`partial`] — the path-addressed tree one encode call builds into
//! - [`future`] — deferred document leaves (`Deferred`)
//! - [`error`] — error types for conversion/encoding failures

pub mod convert;
pub mod document;
pub mod encoder;
pub mod error;
pub mod future;
pub mod partial;

pub use convert::{convert, DeferredHost, HostValue, Scalar, ToDocument};
pub use document::Document;
pub use encoder::encode;
pub use error::{ConvertError, Result};
pub use future::Deferred;
pub use partial::{PartialDocument, PathKey};
