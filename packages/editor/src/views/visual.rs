//! # Visual View
//!
//! Guided editing: one card per record for sequence documents, option
//! groups for a single record, and key/type rows for open-map documents.
//! Each [`VisualAction`] becomes exactly one store operation.

use docsync_document::{
    DocumentProfile, DocumentShape, DocumentStore, FieldKind, FieldPath, FieldSpec, FieldType,
    MutationError, StoreChange,
};
use serde_json::{Map, Value};

use super::{display_value, field_value, records, shape_name};
use crate::errors::ViewError;

/// Prefix of keys created by "add field" in open-map documents
pub const NEW_PROPERTY_PREFIX: &str = "new_property_";

#[derive(Debug, Clone, PartialEq)]
pub enum VisualLayout {
    /// Sequence documents
    Cards(Vec<RecordCard>),

    /// Single record
    Groups(Vec<Control>),

    /// Open map
    Entries(Vec<EntryRow>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordCard {
    pub index: usize,
    pub title: String,
    pub controls: Vec<Control>,
    /// Removal is only offered while more than one record exists
    pub removable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub path: &'static str,
    pub label: &'static str,
    pub widget: Widget,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Text(String),
    Select {
        options: &'static [&'static str],
        selected: Option<String>,
    },
    Checkboxes {
        options: &'static [&'static str],
        checked: Vec<String>,
    },
    Toggle(bool),
    List(Vec<String>),
    TypeTag(Option<FieldType>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub name: String,
    /// `None` when the value is not one of the known type tags
    pub field_type: Option<FieldType>,
    pub value: String,
}

/// User interactions on the visual view
#[derive(Debug, Clone, PartialEq)]
pub enum VisualAction {
    SetText {
        item: usize,
        path: String,
        value: String,
    },
    Select {
        item: usize,
        path: String,
        option: String,
    },
    ToggleOption {
        item: usize,
        path: String,
        option: String,
        checked: bool,
    },
    SetFlag {
        item: usize,
        path: String,
        value: bool,
    },
    SetList {
        item: usize,
        path: String,
        values: Vec<String>,
    },
    AddRecord,
    RemoveRecord { item: usize },
    AddEntry,
    RenameEntry { from: String, to: String },
    SetEntryType { name: String, field_type: FieldType },
    RemoveEntry { name: String },
}

impl VisualAction {
    fn edits_record_field(&self) -> bool {
        matches!(
            self,
            VisualAction::SetText { .. }
                | VisualAction::Select { .. }
                | VisualAction::ToggleOption { .. }
                | VisualAction::SetFlag { .. }
                | VisualAction::SetList { .. }
        )
    }
}

pub fn render<P: DocumentProfile>(store: &DocumentStore<P>) -> VisualLayout {
    let profile = store.profile();
    let document = store.document();

    match profile.shape() {
        DocumentShape::Sequence => {
            let records = records(profile.shape(), document);
            let removable = records.len() > 1;

            VisualLayout::Cards(
                records
                    .into_iter()
                    .map(|(index, record)| {
                        let index = index.unwrap_or_default();
                        RecordCard {
                            index,
                            title: record
                                .get("title")
                                .and_then(Value::as_str)
                                .map(str::to_string)
                                .unwrap_or_else(|| format!("Record {}", index + 1)),
                            controls: controls(profile.fields(), record),
                            removable,
                        }
                    })
                    .collect(),
            )
        }

        DocumentShape::Record => VisualLayout::Groups(controls(profile.fields(), document)),

        DocumentShape::OpenMap => VisualLayout::Entries(
            document
                .as_object()
                .map(|map| {
                    map.iter()
                        .map(|(name, value)| EntryRow {
                            name: name.clone(),
                            field_type: FieldType::from_value(value),
                            value: display_value(value),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        ),
    }
}

fn controls(fields: &[FieldSpec], record: &Value) -> Vec<Control> {
    fields
        .iter()
        .filter_map(|spec| {
            let path = spec.field_path()?;
            let value = field_value(record, &path);

            Some(Control {
                path: spec.path,
                label: spec.label,
                widget: widget(spec.kind, value),
            })
        })
        .collect()
}

fn widget(kind: FieldKind, value: Option<&Value>) -> Widget {
    match kind {
        FieldKind::Text => Widget::Text(value.map(display_value).unwrap_or_default()),
        FieldKind::Select(options) => Widget::Select {
            options,
            selected: value.and_then(Value::as_str).map(str::to_string),
        },
        FieldKind::MultiSelect(options) => Widget::Checkboxes {
            options,
            checked: string_list(value),
        },
        FieldKind::Toggle => Widget::Toggle(value.and_then(Value::as_bool).unwrap_or(false)),
        FieldKind::List => Widget::List(string_list(value)),
        FieldKind::TypeTag => Widget::TypeTag(value.and_then(FieldType::from_value)),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

/// Apply one visual interaction to the store
pub fn dispatch<P: DocumentProfile>(
    store: &mut DocumentStore<P>,
    action: VisualAction,
) -> Result<StoreChange, ViewError> {
    let shape = store.profile().shape();

    // Open-map values are type tags, edited only through the entry actions
    if shape == DocumentShape::OpenMap && action.edits_record_field() {
        return Err(ViewError::Unsupported {
            action: "edit a record field",
            shape: shape_name(shape),
        });
    }

    match action {
        VisualAction::SetText { item, path, value } => {
            Ok(store.set_field(item, &path, Value::String(value))?)
        }

        VisualAction::Select { item, path, option } => {
            if let Some(FieldKind::Select(options)) = declared_kind(store, &path) {
                if !options.contains(&option.as_str()) {
                    return Err(ViewError::UnknownOption { path, option });
                }
            }
            Ok(store.set_field(item, &path, Value::String(option))?)
        }

        VisualAction::ToggleOption { item, path, option, checked } => {
            if let Some(FieldKind::MultiSelect(options)) = declared_kind(store, &path) {
                if !options.contains(&option.as_str()) {
                    return Err(ViewError::UnknownOption { path, option });
                }
            }

            let field: FieldPath = path.parse()?;
            let mut selected = current_record(store, item)
                .map(|record| string_list(field_value(record, &field)))
                .unwrap_or_default();

            if checked {
                if !selected.contains(&option) {
                    selected.push(option);
                }
            } else {
                selected.retain(|s| *s != option);
            }

            Ok(store.set_field_at(item, field, string_array(selected))?)
        }

        VisualAction::SetFlag { item, path, value } => {
            Ok(store.set_field(item, &path, Value::Bool(value))?)
        }

        VisualAction::SetList { item, path, values } => {
            let values = values
                .into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect();
            Ok(store.set_field(item, &path, string_array(values))?)
        }

        VisualAction::AddRecord => {
            require(shape, DocumentShape::Sequence, "add a record")?;
            Ok(store.add_item(None)?)
        }

        VisualAction::RemoveRecord { item } => {
            require(shape, DocumentShape::Sequence, "remove a record")?;
            if store.item_count().unwrap_or_default() <= 1 {
                return Err(ViewError::LastRecord);
            }
            Ok(store.remove_item(item)?)
        }

        VisualAction::AddEntry => {
            require(shape, DocumentShape::OpenMap, "add a field")?;
            let name = next_property_name(store.document().as_object());
            Ok(store.set_field_at(0, FieldPath::top(name), FieldType::String.to_value())?)
        }

        VisualAction::RenameEntry { from, to } => {
            require(shape, DocumentShape::OpenMap, "rename a field")?;
            Ok(store.rename_key(&from, to.trim())?)
        }

        VisualAction::SetEntryType { name, field_type } => {
            require(shape, DocumentShape::OpenMap, "change a field type")?;
            let exists = store
                .document()
                .as_object()
                .is_some_and(|map| map.contains_key(&name));
            if !exists {
                return Err(MutationError::KeyNotFound(name).into());
            }
            Ok(store.set_field_at(0, FieldPath::top(name), field_type.to_value())?)
        }

        VisualAction::RemoveEntry { name } => {
            require(shape, DocumentShape::OpenMap, "remove a field")?;
            Ok(store.remove_key(&name)?)
        }
    }
}

/// `new_property_N` with the smallest unused N starting at 1
pub fn next_property_name(map: Option<&Map<String, Value>>) -> String {
    (1..)
        .map(|n| format!("{}{}", NEW_PROPERTY_PREFIX, n))
        .find(|name| map.map_or(true, |map| !map.contains_key(name)))
        .unwrap_or_else(|| NEW_PROPERTY_PREFIX.to_string())
}

fn require(
    actual: DocumentShape,
    needed: DocumentShape,
    action: &'static str,
) -> Result<(), ViewError> {
    if actual == needed {
        Ok(())
    } else {
        Err(ViewError::Unsupported {
            action,
            shape: shape_name(actual),
        })
    }
}

fn declared_kind<P: DocumentProfile>(store: &DocumentStore<P>, path: &str) -> Option<FieldKind> {
    store.profile().field_spec(path).map(|spec| spec.kind)
}

fn current_record<P: DocumentProfile>(store: &DocumentStore<P>, item: usize) -> Option<&Value> {
    match store.document() {
        Value::Array(items) => items.get(item),
        other => Some(other),
    }
}

fn string_array(values: Vec<String>) -> Value {
    Value::Array(values.into_iter().map(Value::String).collect())
}
