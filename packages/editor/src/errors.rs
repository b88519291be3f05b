//! Error types for the editor

use docsync_document::{DecodeError, MutationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("View error: {0}")]
    View(#[from] ViewError),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// A view action that cannot be turned into a store operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewError {
    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error("At least one record must remain")]
    LastRecord,

    #[error("Unknown option {option:?} for {path}")]
    UnknownOption { path: String, option: String },

    #[error("Cannot {action} on a {shape} document")]
    Unsupported {
        action: &'static str,
        shape: &'static str,
    },

    #[error("Invalid {expected} for {path}: {input:?}")]
    InvalidInput {
        path: String,
        expected: &'static str,
        input: String,
    },
}

/// Uploaded content was not accepted; the document is untouched
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File content is not a valid document: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Reading the file timed out after {0} ms")]
    TimedOut(u64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard is unavailable")]
    Unavailable,

    #[error("Clipboard write rejected: {0}")]
    Rejected(String),

    #[error("Clipboard write timed out after {0} ms")]
    TimedOut(u64),
}
