use std::path::Path;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use menuforge_core::{export, BuildProgress};

use crate::InputArgs;

const PHASES: u64 = 5;

pub fn run(input: &InputArgs, out: &Path) -> Result<()> {
    let pb = ProgressBar::new(PHASES);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_message("Building catalog...");

    let build = super::run_build(
        input,
        Some(&mut |progress| match progress {
            BuildProgress::RowsLoaded { file, count } => {
                pb.set_message(format!("loaded {count} {file} rows"));
            }
            BuildProgress::PhaseComplete { phase } => {
                pb.inc(1);
                pb.set_message(format!("{phase} done"));
            }
        }),
    )?;
    pb.finish_with_message("build complete");

    export::write_document(&build, out)?;

    let stats = build.stats();
    println!("Wrote {}", out.display());
    println!(
        "  {} categories, {} items, {} option groups",
        stats.categories, stats.items, stats.option_groups
    );
    if stats.unattached_items > 0 {
        println!("  {} items left unattached", stats.unattached_items);
    }
    if !build.diagnostics.is_empty() {
        println!(
            "  {} diagnostics; run 'menuforge check' for details",
            build.diagnostics.len()
        );
    }

    Ok(())
}
