use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::EditorError;
use crate::profiles::EditorKind;

pub const DEFAULT_CONFIG_NAME: &str = "docsync.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Indent width of pretty-printed raw text
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Max characters of a scalar preview in the tree view
    #[serde(default = "default_preview_length")]
    pub preview_length: usize,

    /// Upper bound on reading an uploaded file
    #[serde(default = "default_import_timeout_ms")]
    pub import_timeout_ms: u64,

    /// Upper bound on a clipboard write before falling back
    #[serde(default = "default_clipboard_timeout_ms")]
    pub clipboard_timeout_ms: u64,

    /// Overrides of the per-editor export filename
    #[serde(default)]
    pub export_filenames: ExportFilenames,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFilenames {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_structure: Option<String>,
}

fn default_indent() -> usize {
    2
}

fn default_preview_length() -> usize {
    40
}

fn default_import_timeout_ms() -> u64 {
    10_000
}

fn default_clipboard_timeout_ms() -> u64 {
    3_000
}

impl EditorConfig {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> Result<Self, EditorError> {
        let config_path = Self::config_path(cwd);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(EditorConfig::default())
        }
    }

    pub fn config_path(cwd: &Path) -> PathBuf {
        cwd.join(DEFAULT_CONFIG_NAME)
    }

    pub fn import_timeout(&self) -> Duration {
        Duration::from_millis(self.import_timeout_ms)
    }

    pub fn clipboard_timeout(&self) -> Duration {
        Duration::from_millis(self.clipboard_timeout_ms)
    }

    /// Configured export filename override for an editor kind
    pub fn export_filename(&self, kind: EditorKind) -> Option<&str> {
        match kind {
            EditorKind::Chart => self.export_filenames.chart.as_deref(),
            EditorKind::Summary => self.export_filenames.summary.as_deref(),
            EditorKind::MetricStructure => self.export_filenames.metric_structure.as_deref(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            preview_length: default_preview_length(),
            import_timeout_ms: default_import_timeout_ms(),
            clipboard_timeout_ms: default_clipboard_timeout_ms(),
            export_filenames: ExportFilenames::default(),
        }
    }
}
