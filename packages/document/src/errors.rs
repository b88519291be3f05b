//! Error types for the document core

use thiserror::Error;

/// Raw text could not be turned into a document.
///
/// `Syntax` carries the decoder's own diagnostic untouched; `Shape` means the
/// text decoded fine but the top-level value is not what the profile edits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("expected {expected}, found {found}")]
    Shape { expected: &'static str, found: String },
}

impl DecodeError {
    /// Line of a syntax error (1-based), `None` for shape errors
    pub fn line(&self) -> Option<usize> {
        match self {
            DecodeError::Syntax { line, .. } => Some(*line),
            DecodeError::Shape { .. } => None,
        }
    }

    /// Column of a syntax error (1-based), `None` for shape errors
    pub fn column(&self) -> Option<usize> {
        match self {
            DecodeError::Syntax { column, .. } => Some(*column),
            DecodeError::Shape { .. } => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Syntax {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    }
}
