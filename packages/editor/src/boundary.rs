//! # Import / Export Boundary
//!
//! Operations that replace or externalize the raw text: reset, clear,
//! export, import and clipboard copy. Browser mechanics (file pickers,
//! clipboard APIs) sit behind small traits so the boundary can be driven by
//! any front end.
//!
//! File reads and clipboard writes are single-shot futures bounded by a
//! timeout; a read or write that never completes is reported as timed out
//! instead of staying pending forever.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use docsync_document::{codec, DecodeError, DocumentProfile, DocumentStore, StoreChange};
use futures::future::BoxFuture;
use tracing::{debug, warn};

use crate::errors::{ClipboardError, ImportError};

pub const EXPORT_MIME: &str = "application/json";

/// A downloadable file built from the raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the artifact into `dir`, returning the full path
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Asynchronous system clipboard
pub trait ClipboardWriter {
    fn write_text<'a>(&'a mut self, text: &'a str) -> BoxFuture<'a, Result<(), ClipboardError>>;
}

/// Legacy selection-based copy, used when the clipboard API fails
pub trait SelectionCopy {
    fn copy_via_selection(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Which mechanism ended up copying the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Clipboard,
    Legacy,
}

/// Replace the document with the profile default
pub fn reset<P: DocumentProfile>(store: &mut DocumentStore<P>) -> Result<StoreChange, DecodeError> {
    let default = store.profile().default_document();
    store.replace_document(default)
}

/// Replace the document with an empty value of the same shape
pub fn clear<P: DocumentProfile>(store: &mut DocumentStore<P>) -> Result<StoreChange, DecodeError> {
    let empty = store.profile().empty_document();
    store.replace_document(empty)
}

/// Export the raw text verbatim, never reformatted
pub fn export_file<P: DocumentProfile>(
    store: &DocumentStore<P>,
    filename: Option<&str>,
) -> ExportArtifact {
    let filename = filename
        .unwrap_or_else(|| store.profile().export_filename())
        .to_string();

    debug!(%filename, bytes = store.raw_text().len(), "exporting raw text");

    ExportArtifact {
        filename,
        mime: EXPORT_MIME,
        bytes: store.raw_text().as_bytes().to_vec(),
    }
}

/// Accept uploaded text only if it decodes to a well-formed document
pub fn import_text<P: DocumentProfile>(
    store: &mut DocumentStore<P>,
    text: &str,
) -> Result<(), ImportError> {
    if let Err(err) = codec::decode_shaped(text, store.profile().shape()) {
        warn!(kind = store.profile().kind(), error = %err, "import rejected");
        return Err(ImportError::Decode(err));
    }

    store.replace_raw(text);
    Ok(())
}

/// Read a file through `read` (bounded by `limit`) and import it
pub async fn import_file<P, F>(
    store: &mut DocumentStore<P>,
    read: F,
    limit: Duration,
) -> Result<(), ImportError>
where
    P: DocumentProfile,
    F: Future<Output = io::Result<String>>,
{
    let text = match tokio::time::timeout(limit, read).await {
        Ok(result) => result?,
        Err(_) => {
            warn!(kind = store.profile().kind(), "file read timed out");
            return Err(ImportError::TimedOut(millis(limit)));
        }
    };

    import_text(store, &text)
}

/// Import from a path on disk
pub async fn import_path<P: DocumentProfile>(
    store: &mut DocumentStore<P>,
    path: &Path,
    limit: Duration,
) -> Result<(), ImportError> {
    import_file(store, tokio::fs::read_to_string(path), limit).await
}

/// Copy the raw text. Tries the clipboard first (if there is one), then the
/// legacy mechanism; fails only when both do.
pub async fn copy<P, C, L>(
    store: &DocumentStore<P>,
    clipboard: Option<&mut C>,
    legacy: &mut L,
    limit: Duration,
) -> Result<CopyOutcome, ClipboardError>
where
    P: DocumentProfile,
    C: ClipboardWriter + ?Sized,
    L: SelectionCopy + ?Sized,
{
    let text = store.raw_text();

    let primary = match clipboard {
        None => Err(ClipboardError::Unavailable),
        Some(clipboard) => match tokio::time::timeout(limit, clipboard.write_text(text)).await {
            Ok(result) => result,
            Err(_) => Err(ClipboardError::TimedOut(millis(limit))),
        },
    };

    match primary {
        Ok(()) => Ok(CopyOutcome::Clipboard),
        Err(err) => {
            warn!(error = %err, "clipboard write failed, falling back to selection copy");
            legacy.copy_via_selection(text)?;
            Ok(CopyOutcome::Legacy)
        }
    }
}

fn millis(limit: Duration) -> u64 {
    u64::try_from(limit.as_millis()).unwrap_or(u64::MAX)
}
