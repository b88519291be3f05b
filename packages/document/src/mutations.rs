//! # Document Mutations
//!
//! Structural operations on the canonical document value.
//!
//! ## Mutation Semantics
//!
//! ### SetField
//! - Replaces one field of one record (or of the single record)
//! - Missing fields are created, a non-object parent is replaced by an object
//! - Last write wins
//!
//! ### AddItem / RemoveItem
//! - Sequence documents only
//! - Added items must be objects so the sequence stays well-formed
//! - No minimum length here; the guided views keep at least one record
//!
//! ### RenameKey
//! - Map documents only; the entry keeps its position and value
//! - Renaming onto an existing key is rejected, nothing changes
//!
//! Every mutation validates before touching the document, so a failed
//! mutation never leaves a half-applied value behind.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::path::FieldPath;
use crate::shape::ValueKind;

/// Structural edits the views translate user interaction into
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Replace a field of a record (`item_index` ignored for map documents)
    SetField {
        item_index: usize,
        path: FieldPath,
        value: Value,
    },

    /// Append a record to a sequence
    AddItem { item: Value },

    /// Remove a record from a sequence
    RemoveItem { item_index: usize },

    /// Rename a top-level key of a map document
    RenameKey { from: String, to: String },

    /// Remove a top-level key of a map document
    RemoveKey { key: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Document is not a sequence")]
    NotASequence,

    #[error("Document is not a map")]
    NotAMap,

    #[error("Key already exists: {0}")]
    KeyCollision(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Key must not be empty")]
    EmptyKey,

    #[error("Invalid field path: {0}")]
    InvalidPath(String),

    #[error("Items must be objects, found {0}")]
    InvalidItem(ValueKind),
}

impl Mutation {
    /// Apply mutation to the document with validation
    pub fn apply(&self, doc: &mut Value) -> Result<(), MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::SetField { item_index, path, value } => {
                Self::apply_set_field(doc, *item_index, path, value)
            }

            Mutation::AddItem { item } => {
                as_sequence_mut(doc)?.push(item.clone());
                Ok(())
            }

            Mutation::RemoveItem { item_index } => {
                as_sequence_mut(doc)?.remove(*item_index);
                Ok(())
            }

            Mutation::RenameKey { from, to } => Self::apply_rename(doc, from, to),

            Mutation::RemoveKey { key } => {
                as_map_mut(doc)?.retain(|k, _| k != key);
                Ok(())
            }
        }
    }

    fn apply_set_field(
        doc: &mut Value,
        item_index: usize,
        path: &FieldPath,
        value: &Value,
    ) -> Result<(), MutationError> {
        let record = match doc {
            Value::Array(items) => {
                let len = items.len();
                items
                    .get_mut(item_index)
                    .ok_or(MutationError::IndexOutOfRange { index: item_index, len })?
            }
            other => other,
        };

        let record = record.as_object_mut().ok_or(MutationError::NotAMap)?;

        match path.parent() {
            None => {
                record.insert(path.field().to_string(), value.clone());
            }
            Some(parent) => {
                let slot = record
                    .entry(parent.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));

                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }

                if let Value::Object(sub) = slot {
                    sub.insert(path.field().to_string(), value.clone());
                }
            }
        }

        Ok(())
    }

    fn apply_rename(doc: &mut Value, from: &str, to: &str) -> Result<(), MutationError> {
        if from == to {
            return Ok(());
        }

        let map = as_map_mut(doc)?;
        let entries = std::mem::take(map);

        for (key, value) in entries {
            if key == from {
                map.insert(to.to_string(), value);
            } else {
                map.insert(key, value);
            }
        }

        Ok(())
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Value) -> Result<(), MutationError> {
        match self {
            Mutation::SetField { item_index, .. } => match doc {
                Value::Array(items) => match items.get(*item_index) {
                    Some(Value::Object(_)) => Ok(()),
                    Some(other) => Err(MutationError::InvalidItem(ValueKind::of(other))),
                    None => Err(MutationError::IndexOutOfRange {
                        index: *item_index,
                        len: items.len(),
                    }),
                },
                Value::Object(_) => Ok(()),
                _ => Err(MutationError::NotAMap),
            },

            Mutation::AddItem { item } => {
                as_sequence(doc)?;
                match item {
                    Value::Object(_) => Ok(()),
                    other => Err(MutationError::InvalidItem(ValueKind::of(other))),
                }
            }

            Mutation::RemoveItem { item_index } => {
                let items = as_sequence(doc)?;
                if *item_index < items.len() {
                    Ok(())
                } else {
                    Err(MutationError::IndexOutOfRange {
                        index: *item_index,
                        len: items.len(),
                    })
                }
            }

            Mutation::RenameKey { from, to } => {
                let map = as_map(doc)?;

                if to.is_empty() {
                    return Err(MutationError::EmptyKey);
                }
                if !map.contains_key(from) {
                    return Err(MutationError::KeyNotFound(from.clone()));
                }
                if from != to && map.contains_key(to) {
                    return Err(MutationError::KeyCollision(to.clone()));
                }

                Ok(())
            }

            Mutation::RemoveKey { key } => {
                if as_map(doc)?.contains_key(key) {
                    Ok(())
                } else {
                    Err(MutationError::KeyNotFound(key.clone()))
                }
            }
        }
    }

    /// Get a debug name for this mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetField { .. } => "set_field",
            Mutation::AddItem { .. } => "add_item",
            Mutation::RemoveItem { .. } => "remove_item",
            Mutation::RenameKey { .. } => "rename_key",
            Mutation::RemoveKey { .. } => "remove_key",
        }
    }
}

fn as_sequence(doc: &Value) -> Result<&Vec<Value>, MutationError> {
    doc.as_array().ok_or(MutationError::NotASequence)
}

fn as_sequence_mut(doc: &mut Value) -> Result<&mut Vec<Value>, MutationError> {
    doc.as_array_mut().ok_or(MutationError::NotASequence)
}

fn as_map(doc: &Value) -> Result<&Map<String, Value>, MutationError> {
    doc.as_object().ok_or(MutationError::NotAMap)
}

fn as_map_mut(doc: &mut Value) -> Result<&mut Map<String, Value>, MutationError> {
    doc.as_object_mut().ok_or(MutationError::NotAMap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chart() -> Value {
        json!([{
            "chart_type": "line",
            "title": "Chart 1",
            "x_axis": {"field": "x", "label": "X-Axis"}
        }])
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::SetField {
            item_index: 0,
            path: "x_axis.label".parse().unwrap(),
            value: json!("Time"),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_set_nested_field() {
        let mut doc = chart();
        let mutation = Mutation::SetField {
            item_index: 0,
            path: "x_axis.label".parse().unwrap(),
            value: json!("Time"),
        };

        mutation.apply(&mut doc).unwrap();
        assert_eq!(doc[0]["x_axis"], json!({"field": "x", "label": "Time"}));
        assert_eq!(doc[0]["title"], json!("Chart 1"));
    }

    #[test]
    fn test_set_field_creates_missing_parent() {
        let mut doc = chart();
        let mutation = Mutation::SetField {
            item_index: 0,
            path: "y_axis.field".parse().unwrap(),
            value: json!("y"),
        };

        mutation.apply(&mut doc).unwrap();
        assert_eq!(doc[0]["y_axis"], json!({"field": "y"}));
    }

    #[test]
    fn test_set_field_replaces_scalar_parent() {
        let mut doc = json!({"x_axis": "oops"});
        let mutation = Mutation::SetField {
            item_index: 7,
            path: "x_axis.label".parse().unwrap(),
            value: json!("X"),
        };

        mutation.apply(&mut doc).unwrap();
        assert_eq!(doc, json!({"x_axis": {"label": "X"}}));
    }

    #[test]
    fn test_set_field_rejects_bad_index() {
        let mut doc = chart();
        let mutation = Mutation::SetField {
            item_index: 3,
            path: FieldPath::top("title"),
            value: json!("x"),
        };

        assert_eq!(
            mutation.apply(&mut doc),
            Err(MutationError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(doc, chart());
    }

    #[test]
    fn test_add_item_requires_object() {
        let mut doc = chart();
        let mutation = Mutation::AddItem { item: json!(42) };

        assert_eq!(
            mutation.apply(&mut doc),
            Err(MutationError::InvalidItem(ValueKind::Number))
        );
        assert_eq!(doc.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_item_can_empty_sequence() {
        let mut doc = chart();
        Mutation::RemoveItem { item_index: 0 }.apply(&mut doc).unwrap();
        assert_eq!(doc, json!([]));
    }

    #[test]
    fn test_rename_preserves_position() {
        let mut doc = json!({"a": "string", "b": "integer", "c": "float"});
        Mutation::RenameKey {
            from: "b".to_string(),
            to: "renamed".to_string(),
        }
        .apply(&mut doc)
        .unwrap();

        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "renamed", "c"]);
        assert_eq!(doc["renamed"], json!("integer"));
    }

    #[test]
    fn test_rename_collision_is_rejected() {
        let mut doc = json!({"a": "string", "b": "integer"});
        let before = doc.clone();

        let result = Mutation::RenameKey {
            from: "a".to_string(),
            to: "b".to_string(),
        }
        .apply(&mut doc);

        assert_eq!(result, Err(MutationError::KeyCollision("b".to_string())));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_rename_to_same_name_is_noop() {
        let mut doc = json!({"a": "string"});
        Mutation::RenameKey {
            from: "a".to_string(),
            to: "a".to_string(),
        }
        .apply(&mut doc)
        .unwrap();
        assert_eq!(doc, json!({"a": "string"}));
    }

    #[test]
    fn test_remove_key() {
        let mut doc = json!({"a": "string", "b": "integer"});
        Mutation::RemoveKey { key: "a".to_string() }.apply(&mut doc).unwrap();
        assert_eq!(doc, json!({"b": "integer"}));

        let err = Mutation::RemoveKey { key: "zzz".to_string() }.apply(&mut doc);
        assert_eq!(err, Err(MutationError::KeyNotFound("zzz".to_string())));
    }

    #[test]
    fn test_sequence_ops_on_map_fail() {
        let doc = json!({"a": 1});
        assert_eq!(
            Mutation::RemoveItem { item_index: 0 }.validate(&doc),
            Err(MutationError::NotASequence)
        );
        assert_eq!(
            Mutation::RemoveKey { key: "a".into() }.validate(&chart()),
            Err(MutationError::NotAMap)
        );
    }
}
