use anyhow::Result;
use clap::Args;
use colored::Colorize;
use docsync_editor::{EditSession, EditorConfig, EditorKind};
use std::path::{Path, PathBuf};

use super::resolve;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Editor kind (chart, summary, metric-structure)
    #[arg(short, long)]
    pub kind: EditorKind,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Force overwrite of an existing file
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config = EditorConfig::load(cwd)?;
    let dir = resolve(cwd, &args.output);

    match write_default(args.kind, &dir, &config, args.force)? {
        Some(path) => {
            println!("  {} Created {}", "✓".green(), path.display());
        }
        None => {
            println!(
                "{} {} config already exists in {}",
                "⚠️".yellow(),
                args.kind.to_string().bright_white(),
                dir.display()
            );
            println!("Use --force to overwrite");
        }
    }

    Ok(())
}

/// Write the default document; `None` if the file exists and `force` is off
pub(crate) fn write_default(
    kind: EditorKind,
    dir: &Path,
    config: &EditorConfig,
    force: bool,
) -> Result<Option<PathBuf>> {
    let session = EditSession::new(kind.profile(), None, config.clone())?;
    let artifact = session.export();

    if dir.join(&artifact.filename).exists() && !force {
        return Ok(None);
    }

    std::fs::create_dir_all(dir)?;
    Ok(Some(artifact.write_to(dir)?))
}
