//! Chart configuration: a list of chart records

use docsync_document::{DocumentProfile, DocumentShape, FieldKind, FieldSpec};
use serde_json::{json, Value};

pub const CHART_TYPES: &[&str] = &["line", "bar", "pie", "area", "scatter"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("chart_type", "Chart type", FieldKind::Select(CHART_TYPES)),
    FieldSpec::new("title", "Title", FieldKind::Text),
    FieldSpec::new("data_source", "Data source", FieldKind::Text),
    FieldSpec::new("x_axis.field", "X-axis field", FieldKind::Text),
    FieldSpec::new("x_axis.label", "X-axis label", FieldKind::Text),
    FieldSpec::new("y_axis.field", "Y-axis field", FieldKind::Text),
    FieldSpec::new("y_axis.label", "Y-axis label", FieldKind::Text),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ChartProfile;

impl DocumentProfile for ChartProfile {
    fn kind(&self) -> &'static str {
        "chart"
    }

    fn shape(&self) -> DocumentShape {
        DocumentShape::Sequence
    }

    fn default_document(&self) -> Value {
        json!([self.new_item(0)])
    }

    fn new_item(&self, index: usize) -> Value {
        json!({
            "chart_type": "line",
            "title": format!("Chart {}", index + 1),
            "data_source": "data_source",
            "x_axis": {"field": "x", "label": "X-Axis"},
            "y_axis": {"field": "y", "label": "Y-Axis"}
        })
    }

    fn fields(&self) -> &[FieldSpec] {
        FIELDS
    }

    fn export_filename(&self) -> &str {
        "chart_config.json"
    }
}
