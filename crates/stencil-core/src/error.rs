//! Error types for document conversion and structured encoding.

use thiserror::Error;

/// Errors that can occur while converting host values into documents.
///
/// `Clone` + `PartialEq` because deferred resolutions hand their outcome
/// to every awaiter of the same leaf.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// An integer fell outside the open interval between the minimum and
    /// maximum representable document int. The exact boundary values are
    /// rejected too.
    #[error("integer {value} cannot be represented by a document int")]
    IntegerRange { value: String },

    /// A present optional wrapped a payload the conversion layer does not
    /// understand.
    #[error("optional payload of type `{type_name}` is not convertible to a document")]
    OptionalNotConvertible { type_name: String },

    /// A deferred computation resolved to a payload that is neither
    /// directly convertible nor generically encodable.
    #[error("deferred payload of type `{type_name}` is not convertible to a document")]
    FutureNotConvertible { type_name: String },

    /// A dictionary key did not serialize to a string.
    #[error("dictionary key must be a string, got {0}")]
    Key(String),

    /// A structural error during encoding.
    #[error("encoding error: {0}")]
    Encode(String),
}

impl ConvertError {
    /// Error for a present optional wrapping an unconvertible payload.
    pub fn optional_not_convertible(type_name: impl Into<String>) -> Self {
        ConvertError::OptionalNotConvertible {
            type_name: type_name.into(),
        }
    }

    /// Error for a deferred resolution carrying an unconvertible payload.
    pub fn future_not_convertible(type_name: impl Into<String>) -> Self {
        ConvertError::FutureNotConvertible {
            type_name: type_name.into(),
        }
    }
}

impl serde::ser::Error for ConvertError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        ConvertError::Encode(msg.to_string())
    }
}

/// Convenience alias used throughout stencil-core.
pub type Result<T> = std::result::Result<T, ConvertError>;
