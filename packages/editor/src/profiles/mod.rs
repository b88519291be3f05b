//! Concrete editor profiles
//!
//! Each editor only contributes its default value, field metadata and export
//! filename; the store, views and boundary are shared.

mod chart;
mod metric;
mod summary;

pub use chart::{ChartProfile, CHART_TYPES};
pub use metric::MetricStructureProfile;
pub use summary::{SummaryProfile, OUTPUT_FORMATS, SUMMARY_SECTIONS, SUMMARY_TYPES};

use std::fmt;
use std::str::FromStr;

use docsync_document::DocumentProfile;
use serde::{Deserialize, Serialize};

/// The editors this crate ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditorKind {
    Chart,
    Summary,
    MetricStructure,
}

impl EditorKind {
    pub const ALL: [EditorKind; 3] = [
        EditorKind::Chart,
        EditorKind::Summary,
        EditorKind::MetricStructure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EditorKind::Chart => "chart",
            EditorKind::Summary => "summary",
            EditorKind::MetricStructure => "metric-structure",
        }
    }

    /// Boxed profile for callers that pick the editor at runtime
    pub fn profile(self) -> Box<dyn DocumentProfile> {
        match self {
            EditorKind::Chart => Box::new(ChartProfile),
            EditorKind::Summary => Box::new(SummaryProfile),
            EditorKind::MetricStructure => Box::new(MetricStructureProfile),
        }
    }
}

impl fmt::Display for EditorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown editor kind: {}. Use: chart, summary, or metric-structure",
                    s
                )
            })
    }
}
