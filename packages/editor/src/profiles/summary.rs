//! Summary configuration: one record of enumerated settings

use docsync_document::{DocumentProfile, DocumentShape, FieldKind, FieldSpec};
use serde_json::{json, Value};

pub const SUMMARY_TYPES: &[&str] = &["executive", "detailed", "technical"];

pub const SUMMARY_SECTIONS: &[&str] = &[
    "overview",
    "key_findings",
    "trends",
    "anomalies",
    "recommendations",
];

pub const OUTPUT_FORMATS: &[&str] = &["markdown", "html", "text"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("summary_type", "Summary type", FieldKind::Select(SUMMARY_TYPES)),
    FieldSpec::new("sections", "Sections", FieldKind::MultiSelect(SUMMARY_SECTIONS)),
    FieldSpec::new("highlight_metrics", "Highlight metrics", FieldKind::List),
    FieldSpec::new("output_format", "Output format", FieldKind::Select(OUTPUT_FORMATS)),
    FieldSpec::new("include_charts", "Include charts", FieldKind::Toggle),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryProfile;

impl DocumentProfile for SummaryProfile {
    fn kind(&self) -> &'static str {
        "summary"
    }

    fn shape(&self) -> DocumentShape {
        DocumentShape::Record
    }

    fn default_document(&self) -> Value {
        json!({
            "summary_type": "executive",
            "sections": ["overview", "key_findings", "recommendations"],
            "highlight_metrics": [],
            "output_format": "markdown",
            "include_charts": true
        })
    }

    fn fields(&self) -> &[FieldSpec] {
        FIELDS
    }

    fn export_filename(&self) -> &str {
        "summary_config.json"
    }
}
