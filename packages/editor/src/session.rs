//! # Edit Session
//!
//! One editor instance: a store, the view-local tree state, and the
//! outward contract with the enclosing form.
//!
//! The enclosing form only ever sees a committed document or `None`:
//! `None` when the document is empty, cleared, or the raw text is currently
//! invalid. A session never shares its store with another session.

use std::future::Future;
use std::io;

use docsync_document::{
    DocumentProfile, DocumentStore, FieldPath, RawUpdate, StoreChange, SubscriptionId,
};
use serde_json::Value;

use crate::boundary::{self, ClipboardWriter, CopyOutcome, ExportArtifact, SelectionCopy};
use crate::config::EditorConfig;
use crate::errors::{ClipboardError, EditorError, ImportError, ViewError};
use crate::profiles::EditorKind;
use crate::views::form::{self, PropertyRow};
use crate::views::text::{self, TextPanel};
use crate::views::tree::{TreeRow, TreeView};
use crate::views::visual::{self, VisualAction, VisualLayout};

/// Single editor instance
pub struct EditSession<P: DocumentProfile> {
    store: DocumentStore<P>,
    tree: TreeView,
    config: EditorConfig,
}

impl<P: DocumentProfile> EditSession<P> {
    /// Create a session from the profile default, or hydrate it from an
    /// existing configuration (edit-existing-item flow)
    pub fn new(
        profile: P,
        initial: Option<Value>,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        let store = match initial {
            Some(value) => DocumentStore::with_document(profile, value)?,
            None => DocumentStore::new(profile),
        };
        Ok(Self::build(store, config))
    }

    /// Hydrate from stored raw text
    pub fn from_text(profile: P, text: &str, config: EditorConfig) -> Result<Self, EditorError> {
        let store = DocumentStore::from_raw(profile, text)?;
        Ok(Self::build(store, config))
    }

    fn build(store: DocumentStore<P>, config: EditorConfig) -> Self {
        Self {
            store: store.with_indent(config.indent),
            tree: TreeView::new(config.preview_length),
            config,
        }
    }

    /// Register the enclosing form's change callback
    pub fn on_change<F>(&mut self, mut callback: F) -> SubscriptionId
    where
        F: FnMut(Option<&Value>) + 'static,
    {
        self.store.subscribe(move |change, document| {
            callback(outward_value(change.validity.valid, document));
        })
    }

    pub fn store(&self) -> &DocumentStore<P> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DocumentStore<P> {
        &mut self.store
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Document the enclosing form would submit right now
    pub fn committed_value(&self) -> Option<&Value> {
        outward_value(self.store.is_valid(), self.store.document())
    }

    /// Submit gate for the enclosing form
    pub fn is_valid(&self) -> bool {
        self.store.is_valid()
    }

    // Visual view

    pub fn visual(&self) -> VisualLayout {
        visual::render(&self.store)
    }

    pub fn dispatch(&mut self, action: VisualAction) -> Result<StoreChange, ViewError> {
        visual::dispatch(&mut self.store, action)
    }

    // Text view

    pub fn text_panel(&self) -> TextPanel {
        text::render(&self.store)
    }

    pub fn edit_text(&mut self, text: impl Into<String>) -> RawUpdate {
        text::edit(&mut self.store, text)
    }

    pub fn format(&mut self) -> bool {
        text::format(&mut self.store)
    }

    pub fn minify(&mut self) -> bool {
        text::minify(&mut self.store)
    }

    // Property-form view

    pub fn properties(&self) -> Vec<PropertyRow> {
        form::render(&self.store)
    }

    pub fn edit_property(
        &mut self,
        item: usize,
        path: &FieldPath,
        input: &str,
    ) -> Result<StoreChange, ViewError> {
        form::edit(&mut self.store, item, path, input)
    }

    // Tree view

    /// Visible tree rows; expand state of vanished paths is dropped first
    pub fn tree_rows(&mut self) -> Vec<TreeRow> {
        self.tree.retain_existing(self.store.document());
        self.tree.render(self.store.document())
    }

    pub fn toggle_node(&mut self, key: &str) -> bool {
        self.tree.toggle(key)
    }

    pub fn tree_mut(&mut self) -> &mut TreeView {
        &mut self.tree
    }

    // Import / export

    pub fn reset(&mut self) -> Result<StoreChange, EditorError> {
        Ok(boundary::reset(&mut self.store)?)
    }

    pub fn clear(&mut self) -> Result<StoreChange, EditorError> {
        Ok(boundary::clear(&mut self.store)?)
    }

    /// Filename used for downloads: config override, else the profile's
    pub fn export_filename(&self) -> &str {
        self.store
            .profile()
            .kind()
            .parse::<EditorKind>()
            .ok()
            .and_then(|kind| self.config.export_filename(kind))
            .unwrap_or_else(|| self.store.profile().export_filename())
    }

    pub fn export(&self) -> ExportArtifact {
        boundary::export_file(&self.store, Some(self.export_filename()))
    }

    pub fn import_text(&mut self, text: &str) -> Result<(), ImportError> {
        boundary::import_text(&mut self.store, text)
    }

    pub async fn import_file<F>(&mut self, read: F) -> Result<(), ImportError>
    where
        F: Future<Output = io::Result<String>>,
    {
        let limit = self.config.import_timeout();
        boundary::import_file(&mut self.store, read, limit).await
    }

    pub async fn copy<C, L>(
        &self,
        clipboard: Option<&mut C>,
        legacy: &mut L,
    ) -> Result<CopyOutcome, ClipboardError>
    where
        C: ClipboardWriter + ?Sized,
        L: SelectionCopy + ?Sized,
    {
        boundary::copy(&self.store, clipboard, legacy, self.config.clipboard_timeout()).await
    }
}

/// What the enclosing form receives for a given store state
fn outward_value(valid: bool, document: &Value) -> Option<&Value> {
    let empty = match document {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    };

    (valid && !empty).then_some(document)
}
