use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use menuforge_core::export;

pub fn run(path: &Path, out: Option<&Path>) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;

    export::strip_images(&mut value);

    let target = out.unwrap_or(path);
    fs::write(target, serde_json::to_string_pretty(&value)?)
        .with_context(|| format!("writing {}", target.display()))?;
    println!("Wrote {}", target.display());
    Ok(())
}
