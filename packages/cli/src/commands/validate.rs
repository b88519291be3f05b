use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use docsync_document::{validity, Validity};
use docsync_editor::EditorKind;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::resolve;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Config file or directory of .json files
    pub input: PathBuf,

    /// Editor kind (chart, summary, metric-structure)
    #[arg(short, long)]
    pub kind: EditorKind,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    #[serde(flatten)]
    validity: Validity,
}

pub fn validate(args: ValidateArgs, cwd: &Path) -> Result<()> {
    let input = resolve(cwd, &args.input);

    let files = if input.is_file() {
        vec![input]
    } else if input.is_dir() {
        find_json_files(&input)
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        let validity = validate_file(&path, args.kind)?;
        reports.push(FileReport { path, validity });
    }

    let invalid = reports.iter().filter(|r| !r.validity.valid).count();

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            match &report.validity.error {
                None => println!("{} {}", "✓".green(), report.path.display()),
                Some(error) => println!("{} {}: {}", "✗".red(), report.path.display(), error),
            }
        }

        println!();
        println!("   Files checked: {}", reports.len());
        if invalid > 0 {
            println!("   {} {}", "Invalid:".red(), invalid);
        }
    }

    if invalid > 0 {
        return Err(anyhow!("{} of {} files are invalid", invalid, reports.len()));
    }

    Ok(())
}

/// Validity of one file as the given editor would judge it
pub(crate) fn validate_file(path: &Path, kind: EditorKind) -> Result<Validity> {
    debug!(path = %path.display(), kind = %kind, "validating");
    let text = fs::read_to_string(path)?;
    Ok(validity::check_shaped(&text, kind.profile().shape()))
}

fn find_json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false))
        .collect();

    files.sort();
    files
}
