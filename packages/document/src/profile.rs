//! # Document Profiles
//!
//! A profile is everything a concrete editor supplies to the generic store:
//! its shape, default value, field metadata for the guided views, and the
//! filename used when exporting.

use serde_json::{Map, Value};

use crate::path::FieldPath;
use crate::shape::DocumentShape;

/// How a declared field is edited in the guided views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text input
    Text,

    /// Exactly one of the options
    Select(&'static [&'static str]),

    /// Any subset of the options, stored as an array of strings
    MultiSelect(&'static [&'static str]),

    /// Boolean checkbox
    Toggle,

    /// Free-form list of strings
    List,

    /// One of the open-map type tags
    TypeTag,
}

/// Metadata for one declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// `field` or `parent.child`
    pub path: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(path: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { path, label, kind }
    }

    pub fn field_path(&self) -> Option<FieldPath> {
        self.path.parse().ok()
    }
}

/// Per-editor configuration of the generic document store
pub trait DocumentProfile {
    /// Short identifier (`chart`, `summary`, ...)
    fn kind(&self) -> &'static str;

    fn shape(&self) -> DocumentShape;

    /// Value the editor starts with (and returns to on reset)
    fn default_document(&self) -> Value;

    /// Record appended by "add item"; `index` is the position it will take
    fn new_item(&self, _index: usize) -> Value {
        Value::Object(Map::new())
    }

    /// Declared fields, in display order
    fn fields(&self) -> &[FieldSpec] {
        &[]
    }

    fn export_filename(&self) -> &str;

    /// Value produced by "clear"
    fn empty_document(&self) -> Value {
        self.shape().empty()
    }

    fn field_spec(&self, path: &str) -> Option<&FieldSpec> {
        self.fields().iter().find(|spec| spec.path == path)
    }
}

impl<P: DocumentProfile + ?Sized> DocumentProfile for Box<P> {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn shape(&self) -> DocumentShape {
        (**self).shape()
    }

    fn default_document(&self) -> Value {
        (**self).default_document()
    }

    fn new_item(&self, index: usize) -> Value {
        (**self).new_item(index)
    }

    fn fields(&self) -> &[FieldSpec] {
        (**self).fields()
    }

    fn export_filename(&self) -> &str {
        (**self).export_filename()
    }

    fn empty_document(&self) -> Value {
        (**self).empty_document()
    }

    fn field_spec(&self, path: &str) -> Option<&FieldSpec> {
        (**self).field_spec(path)
    }
}
