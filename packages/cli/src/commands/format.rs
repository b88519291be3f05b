use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use docsync_document::DocumentStore;
use docsync_editor::{EditorConfig, EditorKind};
use std::fs;
use std::path::{Path, PathBuf};

use super::resolve;

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Config file to format
    pub input: PathBuf,

    /// Editor kind (chart, summary, metric-structure)
    #[arg(short, long)]
    pub kind: EditorKind,

    /// Strip insignificant whitespace instead of pretty-printing
    #[arg(short, long)]
    pub minify: bool,

    /// Write the result back to the file instead of stdout
    #[arg(short, long)]
    pub write: bool,
}

pub fn format(args: FormatArgs, cwd: &Path) -> Result<()> {
    let config = EditorConfig::load(cwd)?;
    let path = resolve(cwd, &args.input);
    let text = fs::read_to_string(&path)?;

    let formatted = format_text(&text, args.kind, args.minify, &config)?;

    if args.write {
        fs::write(&path, &formatted)?;
        println!("  {} Formatted {}", "✓".green(), path.display());
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

/// Reformat through the same store the editors use; invalid text is an error
pub(crate) fn format_text(
    text: &str,
    kind: EditorKind,
    minify: bool,
    config: &EditorConfig,
) -> Result<String> {
    let mut store = DocumentStore::new(kind.profile()).with_indent(config.indent);
    store.replace_raw(text);

    let applied = if minify { store.minify() } else { store.format() };
    if !applied {
        let error = store.validity().error.unwrap_or_default();
        return Err(anyhow!("Cannot format invalid {} config: {}", kind, error));
    }

    Ok(store.raw_text().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_minify() {
        let config = EditorConfig::default();
        let text = r#"{ "a" :"string",  "b":"float" }"#;

        assert_eq!(
            format_text(text, EditorKind::MetricStructure, true, &config).unwrap(),
            r#"{"a":"string","b":"float"}"#
        );
        assert_eq!(
            format_text(text, EditorKind::MetricStructure, false, &config).unwrap(),
            "{\n  \"a\": \"string\",\n  \"b\": \"float\"\n}"
        );
    }

    #[test]
    fn test_format_uses_config_indent() {
        let config = EditorConfig {
            indent: 4,
            ..EditorConfig::default()
        };
        assert_eq!(
            format_text("[{}]", EditorKind::Chart, false, &config).unwrap(),
            "[\n    {}\n]"
        );
    }

    #[test]
    fn test_format_invalid_is_error() {
        let config = EditorConfig::default();
        assert!(format_text("{ invalid", EditorKind::Summary, false, &config).is_err());
        assert!(format_text("[]", EditorKind::Summary, false, &config).is_err());
    }

    #[test]
    fn test_format_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        fs::write(&path, r#"{"summary_type":"executive"}"#).unwrap();

        let args = FormatArgs {
            input: PathBuf::from("summary.json"),
            kind: EditorKind::Summary,
            minify: false,
            write: true,
        };
        format(args, dir.path()).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"summary_type\": \"executive\"\n}"
        );
    }
}
