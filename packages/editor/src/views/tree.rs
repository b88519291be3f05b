//! # Tree View
//!
//! Read-only structural rendering. Expand/collapse state lives here, keyed
//! by node path (`[0]`, `[0].x_axis`, `sections[1]`), so it survives any
//! mutation that keeps the path alive.

use std::collections::BTreeSet;

use docsync_document::ValueKind;
use serde_json::Value;

const ELLIPSIS: char = '…';

#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    /// Path key used for expand/collapse
    pub key: String,
    pub depth: usize,
    pub label: String,
    pub kind: ValueKind,
    /// Inline preview of scalar leaves
    pub preview: Option<String>,
    /// Number of children for containers
    pub children: Option<usize>,
    pub expanded: bool,
}

#[derive(Debug, Clone)]
pub struct TreeView {
    expanded: BTreeSet<String>,
    preview_length: usize,
}

impl TreeView {
    pub fn new(preview_length: usize) -> Self {
        Self {
            expanded: BTreeSet::new(),
            preview_length,
        }
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    pub fn expand(&mut self, key: impl Into<String>) {
        self.expanded.insert(key.into());
    }

    pub fn collapse(&mut self, key: &str) {
        self.expanded.remove(key);
    }

    /// Flip a node; returns the new state
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_string());
            true
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expand every container node of `document`
    pub fn expand_all(&mut self, document: &Value) {
        let mut keys = Vec::new();
        walk(document, None, &mut |key, value| {
            if ValueKind::of(value).is_container() {
                keys.push(key.to_string());
            }
        });
        self.expanded.extend(keys);
    }

    /// Forget state of paths that no longer exist in `document`
    pub fn retain_existing(&mut self, document: &Value) {
        let mut alive = BTreeSet::new();
        walk(document, None, &mut |key, value| {
            if ValueKind::of(value).is_container() {
                alive.insert(key.to_string());
            }
        });
        self.expanded.retain(|key| alive.contains(key));
    }

    /// Visible rows, depth-first, children only under expanded nodes
    pub fn render(&self, document: &Value) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        for (key, label, child) in children(document, None) {
            self.render_node(&key, label, child, 0, &mut rows);
        }
        rows
    }

    fn render_node(
        &self,
        key: &str,
        label: String,
        value: &Value,
        depth: usize,
        rows: &mut Vec<TreeRow>,
    ) {
        let kind = ValueKind::of(value);
        let expanded = kind.is_container() && self.is_expanded(key);

        rows.push(TreeRow {
            key: key.to_string(),
            depth,
            label,
            kind,
            preview: (!kind.is_container()).then(|| preview(value, self.preview_length)),
            children: match value {
                Value::Array(items) => Some(items.len()),
                Value::Object(map) => Some(map.len()),
                _ => None,
            },
            expanded,
        });

        if expanded {
            for (child_key, child_label, child) in children(value, Some(key)) {
                self.render_node(&child_key, child_label, child, depth + 1, rows);
            }
        }
    }
}

/// `(key, label, value)` for each direct child
fn children<'a>(value: &'a Value, parent: Option<&str>) -> Vec<(String, String, &'a Value)> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let label = format!("[{}]", i);
                (join(parent, &label, true), label, item)
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (join(parent, k, false), k.clone(), v))
            .collect(),
        _ => Vec::new(),
    }
}

fn join(parent: Option<&str>, segment: &str, indexed: bool) -> String {
    match parent {
        None => segment.to_string(),
        Some(parent) if indexed => format!("{}{}", parent, segment),
        Some(parent) => format!("{}.{}", parent, segment),
    }
}

fn walk<'a>(value: &'a Value, parent: Option<&str>, visit: &mut dyn FnMut(&str, &'a Value)) {
    for (key, _, child) in children(value, parent) {
        visit(&key, child);
        walk(child, Some(&key), visit);
    }
}

/// Scalar preview truncated to `max` characters
pub fn preview(value: &Value, max: usize) -> String {
    if max == 0 {
        return String::new();
    }

    let text = value.to_string();
    if text.chars().count() <= max {
        return text;
    }

    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push(ELLIPSIS);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn charts() -> Value {
        json!([
            {"title": "Chart 1", "x_axis": {"field": "x", "label": "X-Axis"}},
            {"title": "Chart 2", "x_axis": {"field": "t", "label": "Time"}}
        ])
    }

    #[test]
    fn test_collapsed_sequence_shows_indices() {
        let tree = TreeView::new(40);
        let rows = tree.render(&charts());

        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["[0]", "[1]"]);
        assert!(rows.iter().all(|r| r.kind == ValueKind::Object && !r.expanded));
        assert_eq!(rows[0].children, Some(2));
    }

    #[test]
    fn test_expand_record() {
        let mut tree = TreeView::new(40);
        assert!(tree.toggle("[1]"));
        tree.expand("[1].x_axis");

        let rows = tree.render(&charts());
        let keys: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["[0]", "[1]", "[1].title", "[1].x_axis", "[1].x_axis.field", "[1].x_axis.label"]
        );

        let title = &rows[2];
        assert_eq!(title.depth, 1);
        assert_eq!(title.kind, ValueKind::String);
        assert_eq!(title.preview.as_deref(), Some("\"Chart 2\""));
    }

    #[test]
    fn test_record_fields_show_kinds() {
        let doc = json!({
            "summary_type": "executive",
            "sections": ["a", "b"],
            "include_charts": true
        });
        let mut tree = TreeView::new(40);
        tree.expand("sections");

        let rows = tree.render(&doc);
        let kinds: Vec<_> = rows.iter().map(|r| (r.key.as_str(), r.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("summary_type", ValueKind::String),
                ("sections", ValueKind::Array),
                ("sections[0]", ValueKind::String),
                ("sections[1]", ValueKind::String),
                ("include_charts", ValueKind::Boolean),
            ]
        );
    }

    #[test]
    fn test_state_survives_unrelated_mutation() {
        let mut tree = TreeView::new(40);
        tree.expand("[0]");

        let mut doc = charts();
        doc[1]["title"] = json!("Renamed");
        tree.retain_existing(&doc);
        assert!(tree.is_expanded("[0]"));

        doc.as_array_mut().unwrap().truncate(0);
        tree.retain_existing(&doc);
        assert!(!tree.is_expanded("[0]"));
    }

    #[test]
    fn test_expand_all_and_collapse_all() {
        let mut tree = TreeView::new(40);
        let doc = charts();

        tree.expand_all(&doc);
        assert_eq!(tree.render(&doc).len(), 2 + 2 * (2 + 2));

        tree.collapse_all();
        assert_eq!(tree.render(&doc).len(), 2);
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview(&json!("abcdefgh"), 6), "\"abcd…");
        assert_eq!(preview(&json!(12), 6), "12");
        assert_eq!(preview(&json!("ab"), 6), "\"ab\"");
        assert_eq!(preview(&json!("ab"), 1), "…");
        assert_eq!(preview(&json!("ab"), 0), "");
    }
}
