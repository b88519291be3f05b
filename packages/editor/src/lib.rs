//! # Docsync Editor
//!
//! The chart, summary and metric-structure editors built on the generic
//! document store.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docsync_editor::{ChartProfile, EditSession, EditorConfig, VisualAction};
//!
//! let mut session = EditSession::new(ChartProfile, None, EditorConfig::default())?;
//! session.on_change(|value| submit_form.set_chart_config(value.cloned()));
//!
//! session.dispatch(VisualAction::AddRecord)?;
//! session.edit_text("{ not json");   // form receives None
//! assert!(!session.is_valid());
//! ```

pub mod boundary;
mod config;
mod errors;
mod profiles;
mod session;
pub mod views;

pub use boundary::{ClipboardWriter, CopyOutcome, ExportArtifact, SelectionCopy};
pub use config::{EditorConfig, ExportFilenames, DEFAULT_CONFIG_NAME};
pub use errors::{ClipboardError, EditorError, ImportError, ViewError};
pub use profiles::{
    ChartProfile, EditorKind, MetricStructureProfile, SummaryProfile, CHART_TYPES, OUTPUT_FORMATS,
    SUMMARY_SECTIONS, SUMMARY_TYPES,
};
pub use session::EditSession;
pub use views::visual::VisualAction;

// Re-export the core for convenience
pub use docsync_document as document;
