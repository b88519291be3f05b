//! # Docsync Document
//!
//! Core of the synchronized configuration editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ views: visual / text / form / tree          │
//! └─────────────────────────────────────────────┘
//!            ↓ mutations        ↓ raw text
//! ┌─────────────────────────────────────────────┐
//! │ store: document + raw text + subscribers    │
//! │  - Apply structural mutations               │
//! │  - Accept or reject free-text edits         │
//! │  - Notify views after every operation       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ codec + validity: text ↔ value, diagnostics │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is source of truth**: every view re-renders from it, except
//!    the text view which shows the raw text
//! 2. **Structural edits never break the document**: mutations validate
//!    before applying and always re-derive the raw text
//! 3. **Invalid text is a state, not an error**: the document stays at its
//!    last valid value until the text decodes again
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docsync_document::DocumentStore;
//!
//! let mut store = DocumentStore::new(profile);
//! store.set_field(0, "x_axis.label", "Time".into())?;
//!
//! if !store.replace_raw("{ invalid").is_committed() {
//!     println!("{:?}", store.validity().error);
//! }
//! ```

pub mod codec;
mod errors;
mod mutations;
mod path;
mod profile;
mod shape;
mod store;
pub mod validity;

pub use codec::Spacing;
pub use errors::DecodeError;
pub use mutations::{Mutation, MutationError};
pub use path::FieldPath;
pub use profile::{DocumentProfile, FieldKind, FieldSpec};
pub use shape::{DocumentShape, FieldType, ValueKind};
pub use store::{ChangeCallback, ChangeKind, DocumentStore, RawUpdate, StoreChange, SubscriptionId};
pub use validity::Validity;
