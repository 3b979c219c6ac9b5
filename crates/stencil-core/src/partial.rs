//! Path-addressed construction of document trees.
//!
//! A [`PartialDocument`] is the mutable tree one top-level encode call
//! builds into. Every write goes through [`PartialDocument::set`], which
//! walks the path from the root, creates missing intermediate containers
//! with the kind matching the next key, and overwrites exactly the node
//! at the final key. Siblings are never touched.
//!
//! One partial document is exclusively owned by one encode call's stack,
//! so there is a single writer and no locking.

use crate::document::Document;

/// One step of a path: a dictionary field name or an array index.
#[derive(Debug, Clone, PartialEq)]
pub enum PathKey {
    Field(String),
    Index(usize),
}

impl PathKey {
    pub fn field(name: impl Into<String>) -> Self {
        PathKey::Field(name.into())
    }
}

/// A document tree under construction.
#[derive(Debug)]
pub struct PartialDocument {
    root: Document,
}

impl PartialDocument {
    /// An empty partial document; the root starts as `Null`.
    pub fn new() -> Self {
        PartialDocument {
            root: Document::Null,
        }
    }

    /// Write `value` at `path`, creating intermediate containers as
    /// needed. An empty path replaces the root. Index writes past the
    /// current array length pad the gap with `Null`; a node of the wrong
    /// kind for the requested key is replaced by a fresh container of the
    /// requested kind.
    pub fn set(&mut self, value: Document, path: &[PathKey]) {
        set_at(&mut self.root, value, path);
    }

    pub fn root(&self) -> &Document {
        &self.root
    }

    /// Hand the finished tree to the caller.
    pub fn into_root(self) -> Document {
        self.root
    }
}

impl Default for PartialDocument {
    fn default() -> Self {
        PartialDocument::new()
    }
}

/// Single depth-first walk from `node` along `path`. O(path length).
fn set_at(node: &mut Document, value: Document, path: &[PathKey]) {
    match path.split_first() {
        None => *node = value,
        Some((PathKey::Field(name), rest)) => {
            let entries = ensure_dictionary(node);
            let position = match entries.iter().position(|(key, _)| key == name) {
                Some(position) => position,
                None => {
                    entries.push((name.clone(), Document::Null));
                    entries.len() - 1
                }
            };
            set_at(&mut entries[position].1, value, rest);
        }
        Some((PathKey::Index(index), rest)) => {
            let elements = ensure_array(node);
            while elements.len() <= *index {
                elements.push(Document::Null);
            }
            set_at(&mut elements[*index], value, rest);
        }
    }
}

fn ensure_dictionary(node: &mut Document) -> &mut Vec<(String, Document)> {
    if !matches!(node, Document::Dictionary(_)) {
        *node = Document::Dictionary(Vec::new());
    }
    match node {
        Document::Dictionary(entries) => entries,
        _ => unreachable!(),
    }
}

fn ensure_array(node: &mut Document) -> &mut Vec<Document> {
    if !matches!(node, Document::Array(_)) {
        *node = Document::Array(Vec::new());
    }
    match node {
        Document::Array(elements) => elements,
        _ => unreachable!(),
    }
}
