//! Text view: renders the raw text, never the document

use docsync_document::{DocumentProfile, DocumentStore, RawUpdate, Validity};

/// What the text editor panel shows
#[derive(Debug, Clone, PartialEq)]
pub struct TextPanel {
    pub text: String,
    pub validity: Validity,
    /// Inline status line under the editor
    pub status: String,
    pub line_count: usize,
}

pub fn render<P: DocumentProfile>(store: &DocumentStore<P>) -> TextPanel {
    let text = store.raw_text().to_string();
    let validity = store.validity();

    let status = match &validity.error {
        None => "Valid JSON".to_string(),
        Some(error) => format!("Invalid JSON: {}", error),
    };

    TextPanel {
        line_count: text.lines().count().max(1),
        text,
        validity,
        status,
    }
}

/// Keystroke-level edit; the text is kept even when it does not decode
pub fn edit<P: DocumentProfile>(
    store: &mut DocumentStore<P>,
    text: impl Into<String>,
) -> RawUpdate {
    store.replace_raw(text)
}

pub fn format<P: DocumentProfile>(store: &mut DocumentStore<P>) -> bool {
    store.format()
}

pub fn minify<P: DocumentProfile>(store: &mut DocumentStore<P>) -> bool {
    store.minify()
}
