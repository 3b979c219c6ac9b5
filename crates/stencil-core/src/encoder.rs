//! Structured encoding of arbitrary nested values into document trees.
//!
//! [`encode`] walks any `serde::Serialize` value and materializes it into
//! a [`Document`] via path-addressed writes to a shared
//! [`PartialDocument`]. Three cooperating contexts do the walking:
//!
//! - [`DocumentEncoder`] — the top-level context, bound to a path prefix;
//!   scalars are written directly at the prefix, containers open one of
//!   the two compound contexts below.
//! - [`KeyedEncoder`] — dictionary fields; each field write appends the
//!   field name to the path.
//! - [`UnkeyedEncoder`] — array elements; a zero-based running index is
//!   consumed by every element access, including accesses that only open
//!   a nested container.
//!
//! All contexts spawned from one `encode` call share one partial document
//! behind `Rc<RefCell<…>>`. The walk is synchronous and single-threaded;
//! there is exactly one writer, so no locking. Writes happen eagerly per
//! field/element, so a failing step leaves earlier writes in place (the
//! partially-built tree is discarded with the call).

use std::cell::RefCell;
use std::rc::Rc;

use serde::ser::{
    Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};

use crate::convert::ToDocument;
use crate::document::Document;
use crate::error::{ConvertError, Result};
use crate::partial::{PartialDocument, PathKey};

type SharedPartial = Rc<RefCell<PartialDocument>>;

/// Encode any serializable value into a document tree.
///
/// Opens a fresh partial document, walks the value, and returns the
/// finished root. Nested scalar writes of unconvertible values (for
/// example out-of-range integers) and non-string dictionary keys fail the
/// whole call.
pub fn encode<T>(value: &T) -> Result<Document>
where
    T: Serialize + ?Sized,
{
    let partial = Rc::new(RefCell::new(PartialDocument::new()));
    value.serialize(DocumentEncoder::new(Rc::clone(&partial), Vec::new()))?;
    let document = match Rc::try_unwrap(partial) {
        Ok(cell) => cell.into_inner().into_root(),
        // A container context outlived the walk; read the tree through it.
        Err(shared) => shared.borrow().root().clone(),
    };
    Ok(document)
}

/// Top-level encoding context, bound to a path prefix within the shared
/// partial document.
pub struct DocumentEncoder {
    partial: SharedPartial,
    path: Vec<PathKey>,
}

impl DocumentEncoder {
    fn new(partial: SharedPartial, path: Vec<PathKey>) -> Self {
        DocumentEncoder { partial, path }
    }

    fn write(&self, document: Document) {
        self.partial.borrow_mut().set(document, &self.path);
    }

    /// A new context one key deeper.
    fn descend(&self, key: PathKey) -> DocumentEncoder {
        let mut path = self.path.clone();
        path.push(key);
        DocumentEncoder::new(Rc::clone(&self.partial), path)
    }
}

impl Serializer for DocumentEncoder {
    type Ok = ();
    type Error = ConvertError;
    type SerializeSeq = UnkeyedEncoder;
    type SerializeTuple = UnkeyedEncoder;
    type SerializeTupleStruct = UnkeyedEncoder;
    type SerializeTupleVariant = UnkeyedEncoder;
    type SerializeMap = KeyedEncoder;
    type SerializeStruct = KeyedEncoder;
    type SerializeStructVariant = KeyedEncoder;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write(Document::Bool(v));
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.write(v.to_document()?);
        Ok(())
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.write(v.to_document()?);
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.write(v.to_document()?);
        Ok(())
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.write(v.to_document()?);
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.write(Document::Double(f64::from(v)));
        Ok(())
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.write(Document::Double(v));
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.write(Document::String(v.to_string()));
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.write(Document::String(v.to_owned()));
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        let elements = v.iter().map(|b| Document::Int(i64::from(*b))).collect();
        self.write(Document::Array(elements));
        Ok(())
    }

    /// Absence is written explicitly, never inferred by omission.
    fn serialize_none(self) -> Result<()> {
        self.write(Document::Null);
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.write(Document::Null);
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.serialize_str(variant)
    }

    /// A value wrapping a single inner encodable value encodes as that
    /// inner value, at the current position.
    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.write(Document::Dictionary(Vec::new()));
        value.serialize(self.descend(PathKey::field(variant)))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<UnkeyedEncoder> {
        Ok(UnkeyedEncoder::open(self.partial, self.path))
    }

    fn serialize_tuple(self, len: usize) -> Result<UnkeyedEncoder> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<UnkeyedEncoder> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<UnkeyedEncoder> {
        self.write(Document::Dictionary(Vec::new()));
        let inner = self.descend(PathKey::field(variant));
        Ok(UnkeyedEncoder::open(inner.partial, inner.path))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<KeyedEncoder> {
        Ok(KeyedEncoder::open(self.partial, self.path))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<KeyedEncoder> {
        Ok(KeyedEncoder::open(self.partial, self.path))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<KeyedEncoder> {
        self.write(Document::Dictionary(Vec::new()));
        let inner = self.descend(PathKey::field(variant));
        Ok(KeyedEncoder::open(inner.partial, inner.path))
    }
}

/// Keyed (dictionary) encoding context, bound to a path prefix.
pub struct KeyedEncoder {
    partial: SharedPartial,
    path: Vec<PathKey>,
    pending_key: Option<String>,
}

impl KeyedEncoder {
    /// Opening the container materializes its empty dictionary, so a
    /// container opened and never written still appears in the tree.
    fn open(partial: SharedPartial, path: Vec<PathKey>) -> Self {
        partial
            .borrow_mut()
            .set(Document::Dictionary(Vec::new()), &path);
        KeyedEncoder {
            partial,
            path,
            pending_key: None,
        }
    }

    fn field_encoder(&self, name: String) -> DocumentEncoder {
        let mut path = self.path.clone();
        path.push(PathKey::Field(name));
        DocumentEncoder::new(Rc::clone(&self.partial), path)
    }
}

/// Serialize a map key down to a dictionary field name. String keys pass
/// through; integer keys take their decimal form; anything else is a key
/// error.
fn key_string<T>(key: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    match encode(key)? {
        Document::String(name) => Ok(name),
        Document::Int(index) => Ok(index.to_string()),
        other => Err(ConvertError::Key(other.kind().to_owned())),
    }
}

impl SerializeMap for KeyedEncoder {
    type Ok = ();
    type Error = ConvertError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.pending_key = Some(key_string(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let name = self.pending_key.take().ok_or_else(|| {
            ConvertError::Encode("serialize_value called before serialize_key".to_owned())
        })?;
        value.serialize(self.field_encoder(name))
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeStruct for KeyedEncoder {
    type Ok = ();
    type Error = ConvertError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self.field_encoder(key.to_owned()))
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeStructVariant for KeyedEncoder {
    type Ok = ();
    type Error = ConvertError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self.field_encoder(key.to_owned()))
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Unkeyed (array) encoding context, bound to a path prefix.
pub struct UnkeyedEncoder {
    partial: SharedPartial,
    path: Vec<PathKey>,
    count: usize,
}

impl UnkeyedEncoder {
    /// Opening the container materializes its empty array.
    fn open(partial: SharedPartial, path: Vec<PathKey>) -> Self {
        partial.borrow_mut().set(Document::Array(Vec::new()), &path);
        UnkeyedEncoder {
            partial,
            path,
            count: 0,
        }
    }

    /// Every element access consumes the current index, whether it writes
    /// a scalar or only opens a nested container.
    fn element_encoder(&mut self) -> DocumentEncoder {
        let index = self.count;
        self.count += 1;
        let mut path = self.path.clone();
        path.push(PathKey::Index(index));
        DocumentEncoder::new(Rc::clone(&self.partial), path)
    }
}

impl SerializeSeq for UnkeyedEncoder {
    type Ok = ();
    type Error = ConvertError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self.element_encoder())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeTuple for UnkeyedEncoder {
    type Ok = ();
    type Error = ConvertError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self.element_encoder())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeTupleStruct for UnkeyedEncoder {
    type Ok = ();
    type Error = ConvertError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self.element_encoder())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeTupleVariant for UnkeyedEncoder {
    type Ok = ();
    type Error = ConvertError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self.element_encoder())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}
