use anyhow::{bail, Result};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::InputArgs;

pub fn run(input: &InputArgs) -> Result<()> {
    let build = super::run_build(input, None)?;
    let stats = build.stats();

    println!(
        "Built {} categories, {} items, {} option groups.",
        stats.categories, stats.items, stats.option_groups
    );

    let violations = build.leaf_violations();
    let issues = build.diagnostics.len() + violations.len();
    if issues == 0 {
        println!("No issues found.");
        return Ok(());
    }

    if !build.diagnostics.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![Cell::new("#"), Cell::new("Diagnostic")]);
        for (i, diagnostic) in build.diagnostics.iter().enumerate() {
            table.add_row(vec![Cell::new(i + 1), Cell::new(diagnostic)]);
        }
        println!("{table}");
    }

    for (category, count) in &violations {
        println!("category '{category}' has subcategories but still holds {count} items");
    }

    bail!("{issues} issue(s) found");
}
