mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

/// Menuforge — CSV to catalog document builder
#[derive(Parser)]
#[command(name = "menuforge", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the catalog document from the CSV exports
    Build {
        #[command(flatten)]
        input: InputArgs,

        /// Output document path
        #[arg(long, default_value = "catalog.json")]
        out: PathBuf,
    },
    /// Run the build without writing and report every diagnostic
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Blank all image references in an existing catalog document
    StripImages {
        /// Document to strip
        path: PathBuf,

        /// Write here instead of overwriting the input
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Items CSV export
    #[arg(long)]
    items: PathBuf,

    /// Options CSV export
    #[arg(long)]
    options: Option<PathBuf>,

    /// Images CSV export
    #[arg(long)]
    images: Option<PathBuf>,

    /// Language tag for display strings
    #[arg(long, default_value = "el")]
    lang: String,

    /// Name for synthetic fallback subcategories
    #[arg(long, default_value = "Misc")]
    fallback_label: String,

    /// Use sequential identifiers for reproducible output
    #[arg(long)]
    seed_ids: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, out } => commands::build::run(&input, &out)?,
        Commands::Check { input } => commands::check::run(&input)?,
        Commands::StripImages { path, out } => commands::strip::run(&path, out.as_deref())?,
    }

    Ok(())
}
