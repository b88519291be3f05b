//! # Document Store
//!
//! Single source of truth for one editor instance.
//!
//! The store owns the canonical document and the last raw text. Two paths
//! lead into it:
//!
//! ```text
//! structural edit ──► Mutation ──► document ──► raw text re-derived
//! free-text edit  ──► decode ──┬─► ok:  document + raw text replaced
//!                              └─► err: raw text replaced, document stale
//! ```
//!
//! Every operation runs to completion (serialize + notify) before it
//! returns. Subscribers receive the change record and the current document.

use serde_json::Value;
use tracing::{debug, warn};

use crate::codec::{self, Spacing};
use crate::errors::DecodeError;
use crate::mutations::{Mutation, MutationError};
use crate::path::FieldPath;
use crate::profile::DocumentProfile;
use crate::validity::{self, Validity};

/// What kind of operation produced a change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    FieldUpdated,
    ItemAdded { index: usize },
    ItemRemoved { index: usize },
    KeyRenamed,
    KeyRemoved,
    /// Raw text decoded and became the document
    RawCommitted,
    /// Raw text failed to decode; the document is unchanged
    RawRejected,
    DocumentReplaced,
    /// Raw text re-spaced by format/minify
    Reformatted,
}

/// Notification delivered to subscribers after every operation
#[derive(Debug, Clone, PartialEq)]
pub struct StoreChange {
    pub kind: ChangeKind,
    pub version: u64,
    /// False when only the raw text moved
    pub document_changed: bool,
    pub validity: Validity,
}

/// Outcome of a free-text edit
#[derive(Debug, Clone, PartialEq)]
pub enum RawUpdate {
    Committed,
    Rejected(DecodeError),
}

impl RawUpdate {
    pub fn is_committed(&self) -> bool {
        matches!(self, RawUpdate::Committed)
    }
}

/// Change callback; receives the change and the current document
pub type ChangeCallback = Box<dyn FnMut(&StoreChange, &Value)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Generic document store, parameterized by the editor profile
pub struct DocumentStore<P: DocumentProfile> {
    profile: P,
    document: Value,
    raw: String,
    /// False while the raw text is user-supplied rather than serialized here
    raw_derived: bool,
    spacing: Spacing,
    version: u64,
    subscribers: Vec<(SubscriptionId, ChangeCallback)>,
    next_subscription: u64,
}

impl<P: DocumentProfile> DocumentStore<P> {
    /// Create a store holding the profile's default document
    pub fn new(profile: P) -> Self {
        let document = profile.default_document();
        Self::build(profile, document)
    }

    /// Hydrate from an externally supplied configuration value
    pub fn with_document(profile: P, document: Value) -> Result<Self, DecodeError> {
        profile.shape().check(&document)?;
        Ok(Self::build(profile, document))
    }

    /// Hydrate from raw text, keeping the text as given
    pub fn from_raw(profile: P, text: impl Into<String>) -> Result<Self, DecodeError> {
        let text = text.into();
        let document = codec::decode_shaped(&text, profile.shape())?;
        let mut store = Self::build(profile, document);
        store.raw = text;
        store.raw_derived = false;
        Ok(store)
    }

    fn build(profile: P, document: Value) -> Self {
        let spacing = Spacing::pretty();
        let raw = codec::serialize(&document, spacing);

        Self {
            profile,
            document,
            raw,
            raw_derived: true,
            spacing,
            version: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Use a different pretty-print indent for re-derived raw text.
    /// Text hydrated through [`DocumentStore::from_raw`] is left as given.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.spacing = Spacing::Pretty { indent };
        if self.raw_derived {
            self.raw = codec::serialize(&self.document, self.spacing);
        }
        self
    }

    pub fn profile(&self) -> &P {
        &self.profile
    }

    /// Last committed (always well-formed) document
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Raw text as the text view shows it; may be invalid
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of records for sequence documents
    pub fn item_count(&self) -> Option<usize> {
        self.document.as_array().map(Vec::len)
    }

    /// Derived from the current raw text on every call
    pub fn validity(&self) -> Validity {
        validity::check_shaped(&self.raw, self.profile.shape())
    }

    pub fn is_valid(&self) -> bool {
        self.validity().valid
    }

    /// Pure projection of the document
    pub fn serialize(&self, spacing: Spacing) -> String {
        codec::serialize(&self.document, spacing)
    }

    /// Register a change callback
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange, &Value) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Apply a structural mutation and re-derive the raw text
    pub fn apply(&mut self, mutation: Mutation) -> Result<StoreChange, MutationError> {
        mutation.apply(&mut self.document)?;
        debug!(kind = self.profile.kind(), mutation = mutation.name(), "applied mutation");

        let kind = match &mutation {
            Mutation::SetField { .. } => ChangeKind::FieldUpdated,
            Mutation::AddItem { .. } => ChangeKind::ItemAdded {
                index: self.item_count().unwrap_or(1).saturating_sub(1),
            },
            Mutation::RemoveItem { item_index } => ChangeKind::ItemRemoved { index: *item_index },
            Mutation::RenameKey { .. } => ChangeKind::KeyRenamed,
            Mutation::RemoveKey { .. } => ChangeKind::KeyRemoved,
        };

        self.raw = codec::serialize(&self.document, self.spacing);
        self.raw_derived = true;
        Ok(self.commit(kind, true))
    }

    /// Replace one field; `item_index` is ignored for map documents
    pub fn set_field(
        &mut self,
        item_index: usize,
        path: &str,
        value: Value,
    ) -> Result<StoreChange, MutationError> {
        let path: FieldPath = path.parse()?;
        self.set_field_at(item_index, path, value)
    }

    pub fn set_field_at(
        &mut self,
        item_index: usize,
        path: FieldPath,
        value: Value,
    ) -> Result<StoreChange, MutationError> {
        self.apply(Mutation::SetField { item_index, path, value })
    }

    /// Append `template`, or the profile's next default record
    pub fn add_item(&mut self, template: Option<Value>) -> Result<StoreChange, MutationError> {
        let next = self.item_count().ok_or(MutationError::NotASequence)?;
        let item = template.unwrap_or_else(|| self.profile.new_item(next));
        self.apply(Mutation::AddItem { item })
    }

    /// Remove a record; the store itself allows emptying the sequence
    pub fn remove_item(&mut self, item_index: usize) -> Result<StoreChange, MutationError> {
        self.apply(Mutation::RemoveItem { item_index })
    }

    pub fn rename_key(&mut self, from: &str, to: &str) -> Result<StoreChange, MutationError> {
        self.apply(Mutation::RenameKey {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    pub fn remove_key(&mut self, key: &str) -> Result<StoreChange, MutationError> {
        self.apply(Mutation::RemoveKey { key: key.to_string() })
    }

    /// Free-text edit. Never fails the session: an undecodable text is kept
    /// as raw text and reported, the document stays at its last valid value.
    pub fn replace_raw(&mut self, text: impl Into<String>) -> RawUpdate {
        let text = text.into();

        match codec::decode_shaped(&text, self.profile.shape()) {
            Ok(document) => {
                let changed = document != self.document;
                self.document = document;
                self.raw = text;
                self.raw_derived = false;
                self.commit(ChangeKind::RawCommitted, changed);
                RawUpdate::Committed
            }
            Err(err) => {
                warn!(kind = self.profile.kind(), error = %err, "raw text rejected");
                self.raw = text;
                self.raw_derived = false;
                self.commit(ChangeKind::RawRejected, false);
                RawUpdate::Rejected(err)
            }
        }
    }

    /// Wholesale replacement (reset, clear, validated import)
    pub fn replace_document(&mut self, document: Value) -> Result<StoreChange, DecodeError> {
        self.profile.shape().check(&document)?;

        let changed = document != self.document;
        self.document = document;
        self.raw = codec::serialize(&self.document, self.spacing);
        self.raw_derived = true;
        Ok(self.commit(ChangeKind::DocumentReplaced, changed))
    }

    /// Pretty-print the raw text; no-op on invalid text
    pub fn format(&mut self) -> bool {
        self.respace(self.spacing)
    }

    /// Strip insignificant whitespace; no-op on invalid text
    pub fn minify(&mut self) -> bool {
        self.respace(Spacing::Minified)
    }

    fn respace(&mut self, spacing: Spacing) -> bool {
        let Ok(document) = codec::decode_shaped(&self.raw, self.profile.shape()) else {
            debug!(kind = self.profile.kind(), "skipping reformat of invalid raw text");
            return false;
        };

        let text = codec::serialize(&document, spacing);
        if text != self.raw {
            let changed = document != self.document;
            self.document = document;
            self.raw = text;
            self.raw_derived = true;
            self.commit(ChangeKind::Reformatted, changed);
        }
        true
    }

    fn commit(&mut self, kind: ChangeKind, document_changed: bool) -> StoreChange {
        self.version += 1;

        let change = StoreChange {
            kind,
            version: self.version,
            document_changed,
            validity: self.validity(),
        };

        debug!(
            version = change.version,
            subscribers = self.subscribers.len(),
            "notifying subscribers"
        );

        let document = &self.document;
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&change, document);
        }

        change
    }
}

impl<P: DocumentProfile + std::fmt::Debug> std::fmt::Debug for DocumentStore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("profile", &self.profile)
            .field("document", &self.document)
            .field("raw", &self.raw)
            .field("version", &self.version)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
