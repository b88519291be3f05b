//! Document shapes and the type tags shown by the views

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::DecodeError;

/// Top-level shape a profile edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentShape {
    /// Ordered list of homogeneous records (objects)
    Sequence,

    /// One record with a fixed set of named fields
    Record,

    /// Field name → type tag map
    OpenMap,
}

impl DocumentShape {
    /// Human description used in shape errors
    pub fn describe(self) -> &'static str {
        match self {
            DocumentShape::Sequence => "an array of objects",
            DocumentShape::Record | DocumentShape::OpenMap => "an object",
        }
    }

    /// Empty document of this shape (what "clear" produces)
    pub fn empty(self) -> Value {
        match self {
            DocumentShape::Sequence => Value::Array(Vec::new()),
            DocumentShape::Record | DocumentShape::OpenMap => Value::Object(Map::new()),
        }
    }

    /// Check that a decoded value has this top-level shape
    pub fn check(self, value: &Value) -> Result<(), DecodeError> {
        match (self, value) {
            (DocumentShape::Sequence, Value::Array(items)) => {
                match items.iter().position(|item| !item.is_object()) {
                    None => Ok(()),
                    Some(index) => Err(DecodeError::Shape {
                        expected: self.describe(),
                        found: format!("{} at index {}", ValueKind::of(&items[index]), index),
                    }),
                }
            }
            (DocumentShape::Record | DocumentShape::OpenMap, Value::Object(_)) => Ok(()),
            _ => Err(DecodeError::Shape {
                expected: self.describe(),
                found: ValueKind::of(value).to_string(),
            }),
        }
    }
}

/// Runtime type of a JSON value, as shown by the tree view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }

    /// Scalars get an inline preview; containers get expanded
    pub fn is_container(self) -> bool {
        matches!(self, ValueKind::Array | ValueKind::Object)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type tag stored as the value of an open-map document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    Array,
    Object,
}

impl FieldType {
    pub const ALL: [FieldType; 6] = [
        FieldType::String,
        FieldType::Integer,
        FieldType::Float,
        FieldType::Boolean,
        FieldType::Array,
        FieldType::Object,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }

    /// Read a type tag out of a document value
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(|tag| tag.parse().ok())
    }

    pub fn to_value(self) -> Value {
        Value::String(self.as_str().to_string())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| format!("Unknown field type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sequence_requires_object_items() {
        assert!(DocumentShape::Sequence.check(&json!([{"a": 1}, {}])).is_ok());

        let err = DocumentShape::Sequence.check(&json!([{"a": 1}, 2])).unwrap_err();
        assert_eq!(err.to_string(), "expected an array of objects, found number at index 1");
    }

    #[test]
    fn test_record_requires_object() {
        assert!(DocumentShape::Record.check(&json!({})).is_ok());
        assert!(DocumentShape::OpenMap.check(&json!("x")).is_err());
        assert!(DocumentShape::Record.check(&json!([])).is_err());
    }

    #[test]
    fn test_empty_matches_shape() {
        for shape in [DocumentShape::Sequence, DocumentShape::Record, DocumentShape::OpenMap] {
            assert!(shape.check(&shape.empty()).is_ok());
        }
    }

    #[test]
    fn test_field_type_tags() {
        assert_eq!("integer".parse::<FieldType>(), Ok(FieldType::Integer));
        assert!("int".parse::<FieldType>().is_err());
        assert_eq!(FieldType::from_value(&json!("float")), Some(FieldType::Float));
        assert_eq!(FieldType::from_value(&json!(3)), None);
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!(null)).to_string(), "null");
        assert!(ValueKind::of(&json!([])).is_container());
    }
}
