//! # Property-Form View
//!
//! Generic property-by-property editing. Nested sub-records are flattened
//! one level (`x_axis.label`); open-map documents get one row per key.
//! Input arrives as text and is coerced back into a JSON value using the
//! declared field kind, or failing that the kind of the current value.

use docsync_document::{
    DocumentProfile, DocumentShape, DocumentStore, FieldKind, FieldPath, FieldType, StoreChange,
    ValueKind,
};
use serde_json::Value;

use super::{display_value, field_value, records, shape_name};
use crate::errors::ViewError;

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRow {
    /// Record index for sequence documents
    pub item: Option<usize>,
    pub path: FieldPath,
    pub label: String,
    pub kind: ValueKind,
    pub declared: Option<FieldKind>,
    pub value: String,
}

pub fn render<P: DocumentProfile>(store: &DocumentStore<P>) -> Vec<PropertyRow> {
    let profile = store.profile();
    let shape = profile.shape();
    let mut rows = Vec::new();

    for (item, record) in records(shape, store.document()) {
        let Some(map) = record.as_object() else {
            continue;
        };

        for (key, value) in map {
            match value {
                Value::Object(children)
                    if shape != DocumentShape::OpenMap && !children.is_empty() =>
                {
                    for (child, child_value) in children {
                        rows.push(row(profile, item, FieldPath::nested(key, child), child_value));
                    }
                }
                _ => rows.push(row(profile, item, FieldPath::top(key), value)),
            }
        }
    }

    rows
}

fn row<P: DocumentProfile>(
    profile: &P,
    item: Option<usize>,
    path: FieldPath,
    value: &Value,
) -> PropertyRow {
    let declared = declared_kind(profile, &path);
    let label = profile
        .field_spec(&path.to_string())
        .map(|spec| spec.label.to_string())
        .unwrap_or_else(|| path.to_string());

    PropertyRow {
        item,
        label,
        kind: ValueKind::of(value),
        declared,
        value: display_value(value),
        path,
    }
}

fn declared_kind<P: DocumentProfile>(profile: &P, path: &FieldPath) -> Option<FieldKind> {
    if profile.shape() == DocumentShape::OpenMap {
        return Some(FieldKind::TypeTag);
    }
    profile.field_spec(&path.to_string()).map(|spec| spec.kind)
}

/// Commit one property edit
pub fn edit<P: DocumentProfile>(
    store: &mut DocumentStore<P>,
    item: usize,
    path: &FieldPath,
    input: &str,
) -> Result<StoreChange, ViewError> {
    let shape = store.profile().shape();
    if shape == DocumentShape::OpenMap && path.parent().is_some() {
        return Err(ViewError::Unsupported {
            action: "edit a nested field",
            shape: shape_name(shape),
        });
    }

    let current = match store.document() {
        Value::Array(items) => items.get(item).and_then(|record| field_value(record, path)),
        record => field_value(record, path),
    }
    .map(ValueKind::of);

    let declared = declared_kind(store.profile(), path);
    let value = coerce_input(path, input, declared, current)?;

    Ok(store.set_field_at(item, path.clone(), value)?)
}

/// Turn form input text into a JSON value
pub fn coerce_input(
    path: &FieldPath,
    input: &str,
    declared: Option<FieldKind>,
    current: Option<ValueKind>,
) -> Result<Value, ViewError> {
    let invalid = |expected: &'static str| ViewError::InvalidInput {
        path: path.to_string(),
        expected,
        input: input.to_string(),
    };

    match declared {
        Some(FieldKind::Text) => return Ok(Value::String(input.to_string())),
        Some(FieldKind::Toggle) => {
            return parse_bool(input)
                .map(Value::Bool)
                .ok_or_else(|| invalid("boolean"));
        }
        Some(FieldKind::Select(options)) => {
            return if options.contains(&input) {
                Ok(Value::String(input.to_string()))
            } else {
                Err(ViewError::UnknownOption {
                    path: path.to_string(),
                    option: input.to_string(),
                })
            };
        }
        Some(FieldKind::MultiSelect(_) | FieldKind::List) => return Ok(parse_list(input)),
        Some(FieldKind::TypeTag) => {
            return input
                .trim()
                .parse::<FieldType>()
                .map(FieldType::to_value)
                .map_err(|_| invalid("type tag"));
        }
        None => {}
    }

    let trimmed = input.trim();

    match current {
        None | Some(ValueKind::String) => Ok(Value::String(input.to_string())),
        Some(ValueKind::Boolean) => parse_bool(input)
            .map(Value::Bool)
            .ok_or_else(|| invalid("boolean")),
        Some(ValueKind::Number) => match serde_json::from_str::<Value>(trimmed) {
            Ok(value @ Value::Number(_)) => Ok(value),
            _ => Err(invalid("number")),
        },
        Some(ValueKind::Array) => match serde_json::from_str::<Value>(trimmed) {
            Ok(value @ Value::Array(_)) => Ok(value),
            _ => Ok(parse_list(input)),
        },
        Some(ValueKind::Object) => match serde_json::from_str::<Value>(trimmed) {
            Ok(value @ Value::Object(_)) => Ok(value),
            _ => Err(invalid("object")),
        },
        // null fields take whatever the input looks like
        Some(ValueKind::Null) => {
            Ok(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(input.to_string())))
        }
    }
}

fn parse_bool(input: &str) -> Option<bool> {
    match input.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Comma-separated list, or a JSON array of strings
fn parse_list(input: &str) -> Value {
    let trimmed = input.trim();
    if trimmed.starts_with('[') {
        if let Ok(value @ Value::Array(_)) = serde_json::from_str::<Value>(trimmed) {
            return value;
        }
    }

    Value::Array(
        trimmed
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Value::String(s.to_string()))
            .collect(),
    )
}
