//! # Serializer / Deserializer
//!
//! Converts between the canonical document value and its text encoding.
//! Everything here is pure: no state, no notifications.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::errors::DecodeError;
use crate::shape::DocumentShape;

/// Default indent width of the pretty form
pub const DEFAULT_INDENT: usize = 2;

/// Whitespace policy used when producing raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Indented, one member per line
    Pretty { indent: usize },

    /// No insignificant whitespace
    Minified,
}

impl Spacing {
    pub const fn pretty() -> Self {
        Spacing::Pretty {
            indent: DEFAULT_INDENT,
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing::pretty()
    }
}

/// Serialize a document with the requested spacing
pub fn serialize(value: &Value, spacing: Spacing) -> String {
    match spacing {
        Spacing::Minified => value.to_string(),
        Spacing::Pretty { indent } => {
            let indent = vec![b' '; indent];
            let mut out = Vec::with_capacity(128);
            let formatter = PrettyFormatter::with_indent(&indent);
            let mut ser = Serializer::with_formatter(&mut out, formatter);

            // A Value always has string keys, so writing it into memory cannot fail.
            match value.serialize(&mut ser) {
                Ok(()) => String::from_utf8_lossy(&out).into_owned(),
                Err(_) => value.to_string(),
            }
        }
    }
}

/// Decode raw text into a value without any shape requirement
pub fn decode(text: &str) -> Result<Value, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode raw text and require the top-level shape of `shape`
pub fn decode_shaped(text: &str, shape: DocumentShape) -> Result<Value, DecodeError> {
    let value = decode(text)?;
    shape.check(&value)?;
    Ok(value)
}

/// Decode and re-serialize; `None` when `text` does not decode
pub fn reformat(text: &str, spacing: Spacing) -> Option<String> {
    decode(text).ok().map(|value| serialize(&value, spacing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_uses_indent() {
        let value = json!({"a": 1});
        assert_eq!(serialize(&value, Spacing::pretty()), "{\n  \"a\": 1\n}");
        assert_eq!(
            serialize(&value, Spacing::Pretty { indent: 4 }),
            "{\n    \"a\": 1\n}"
        );
    }

    #[test]
    fn test_minified_has_no_whitespace() {
        let value = json!({"a": [1, 2], "b": {"c": true}});
        assert_eq!(serialize(&value, Spacing::Minified), r#"{"a":[1,2],"b":{"c":true}}"#);
    }

    #[test]
    fn test_key_order_is_preserved() {
        let text = r#"{"zeta":1,"alpha":2,"mid":3}"#;
        let value = decode(text).unwrap();
        assert_eq!(serialize(&value, Spacing::Minified), text);
    }

    #[test]
    fn test_decode_shaped_rejects_wrong_shape() {
        let err = decode_shaped("[1]", DocumentShape::Record).unwrap_err();
        assert!(matches!(err, DecodeError::Shape { .. }));
    }

    #[test]
    fn test_reformat_invalid_is_none() {
        assert_eq!(reformat("{ invalid", Spacing::Minified), None);
        assert_eq!(reformat("{ \"a\" : 1 }", Spacing::Minified).as_deref(), Some(r#"{"a":1}"#));
    }
}
