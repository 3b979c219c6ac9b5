//! # stencil-tags
//!
//! Tag renderer boundary for the stencil template-data core.
//!
//! A [`TagRenderer`] consumes an ordered sequence of already-resolved
//! [`Document`](stencil_core::Document) parameters and produces a new,
//! deferred document. [`DateFormat`] is the built-in renderer: it formats
//! an epoch-seconds timestamp with an optional strftime pattern.
//!
//! ## Modules
//!
//! - [`context`] — `TagContext` and the `TagRenderer` trait
//! - [`date_format`] — the `dateFormat` tag
//! - [`error`] — contextual tag errors

pub mod context;
pub mod date_format;
pub mod error;

pub use context::{TagContext, TagRenderer};
pub use date_format::DateFormat;
pub use error::TagError;
