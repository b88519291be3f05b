//! # View Adapters
//!
//! Four projections of the same store:
//!
//! - [`visual`]: guided cards, option groups and key/type rows
//! - [`text`]: the raw text with a validity badge
//! - [`form`]: one row per property, textual input coerced back to JSON
//! - [`tree`]: read-only structure with view-local expand state
//!
//! Views never hold document state. They render from the store and turn
//! each user interaction into exactly one store operation.

pub mod form;
pub mod text;
pub mod tree;
pub mod visual;

use docsync_document::{DocumentShape, FieldPath};
use serde_json::Value;

/// Look up a (possibly nested) field of one record
pub(crate) fn field_value<'a>(record: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    match path.parent() {
        None => record.get(path.field()),
        Some(parent) => record.get(parent)?.get(path.field()),
    }
}

/// The records a view iterates: every item of a sequence, or the document
pub(crate) fn records(shape: DocumentShape, document: &Value) -> Vec<(Option<usize>, &Value)> {
    match (shape, document) {
        (DocumentShape::Sequence, Value::Array(items)) => {
            items.iter().enumerate().map(|(i, item)| (Some(i), item)).collect()
        }
        _ => vec![(None, document)],
    }
}

pub(crate) fn shape_name(shape: DocumentShape) -> &'static str {
    match shape {
        DocumentShape::Sequence => "sequence",
        DocumentShape::Record => "record",
        DocumentShape::OpenMap => "open-map",
    }
}

/// Display text of a scalar: strings bare, everything else as compact JSON
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value() {
        let record = json!({"title": "A", "x_axis": {"label": "X"}});
        assert_eq!(field_value(&record, &FieldPath::top("title")), Some(&json!("A")));
        assert_eq!(
            field_value(&record, &FieldPath::nested("x_axis", "label")),
            Some(&json!("X"))
        );
        assert_eq!(field_value(&record, &FieldPath::nested("y_axis", "label")), None);
    }

    #[test]
    fn test_records() {
        let seq = json!([{"a": 1}, {"a": 2}]);
        let found = records(DocumentShape::Sequence, &seq);
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].0, Some(1));

        let rec = json!({"a": 1});
        assert_eq!(records(DocumentShape::Record, &rec), vec![(None, &rec)]);
    }
}
