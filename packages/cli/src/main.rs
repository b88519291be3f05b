mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{format, init, tree, validate, FormatArgs, InitArgs, TreeArgs, ValidateArgs};
use tracing_subscriber::EnvFilter;

/// Docsync CLI - edit chart, summary and metric-structure configs from the terminal
#[derive(Parser, Debug)]
#[command(name = "docsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default document for an editor kind
    Init(InitArgs),

    /// Check that config files decode to well-formed documents
    Validate(ValidateArgs),

    /// Pretty-print or minify a config file
    Format(FormatArgs),

    /// Print the tree view of a config file
    Tree(TreeArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Validate(args) => validate(args, &cwd),
            Command::Format(args) => format(args, &cwd),
            Command::Tree(args) => tree(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
