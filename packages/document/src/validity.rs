//! # Validity Oracle
//!
//! Answers "does this raw text decode?" and, when it does not, passes the
//! decoder's diagnostic through untouched. Called on every raw-text change and
//! every render that shows a badge, so it stays a plain decode with no caching.

use serde::Serialize;

use crate::codec;
use crate::errors::DecodeError;
use crate::shape::DocumentShape;

/// Derived validity of a piece of raw text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validity {
    pub valid: bool,
    pub error: Option<String>,
}

impl Validity {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

impl<T> From<&Result<T, DecodeError>> for Validity {
    fn from(result: &Result<T, DecodeError>) -> Self {
        match result {
            Ok(_) => Validity::ok(),
            Err(e) => Validity::invalid(e.to_string()),
        }
    }
}

/// Full decode of `text`, no shape requirement
pub fn check(text: &str) -> Validity {
    Validity::from(&codec::decode(text))
}

/// Full decode of `text` plus the top-level shape of the editing profile
pub fn check_shaped(text: &str, shape: DocumentShape) -> Validity {
    Validity::from(&codec::decode_shaped(text, shape))
}
