use anyhow::Result;
use clap::Args;
use colored::Colorize;
use docsync_editor::views::tree::TreeRow;
use docsync_editor::{EditSession, EditorConfig, EditorKind};
use std::fs;
use std::path::{Path, PathBuf};

use super::resolve;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Config file to show
    pub input: PathBuf,

    /// Editor kind (chart, summary, metric-structure)
    #[arg(short, long)]
    pub kind: EditorKind,

    /// Expand every node
    #[arg(short = 'a', long)]
    pub expand_all: bool,

    /// Expand specific node paths (e.g. `[0]`, `[0].x_axis`)
    #[arg(short, long)]
    pub expand: Vec<String>,
}

pub fn tree(args: TreeArgs, cwd: &Path) -> Result<()> {
    let config = EditorConfig::load(cwd)?;
    let text = fs::read_to_string(resolve(cwd, &args.input))?;

    for line in tree_lines(&text, args.kind, args.expand_all, &args.expand, &config)? {
        println!("{}", line);
    }

    Ok(())
}

pub(crate) fn tree_lines(
    text: &str,
    kind: EditorKind,
    expand_all: bool,
    expand: &[String],
    config: &EditorConfig,
) -> Result<Vec<String>> {
    let mut session = EditSession::from_text(kind.profile(), text, config.clone())?;

    if expand_all {
        let document = session.store().document().clone();
        session.tree_mut().expand_all(&document);
    }
    for key in expand {
        session.tree_mut().expand(key.as_str());
    }

    Ok(session.tree_rows().iter().map(render_row).collect())
}

fn render_row(row: &TreeRow) -> String {
    let indent = "  ".repeat(row.depth);
    let marker = match (row.children, row.expanded) {
        (Some(_), true) => "▾",
        (Some(_), false) => "▸",
        (None, _) => " ",
    };

    let detail = match (&row.preview, row.children) {
        (Some(preview), _) => preview.clone(),
        (None, Some(count)) => format!("({})", count),
        (None, None) => String::new(),
    };

    format!(
        "{}{} {} {} {}",
        indent,
        marker,
        row.label.bold(),
        row.kind.as_str().dimmed(),
        detail
    )
    .trim_end()
    .to_string()
}
