pub mod build;
pub mod check;
pub mod strip;

use anyhow::Result;
use menuforge_core::id::SequentialIdSource;
use menuforge_core::{BuildConfig, Builder, CatalogBuild};

use crate::InputArgs;

pub(crate) fn make_builder(input: &InputArgs) -> Builder {
    let config = BuildConfig {
        language: input.lang.clone(),
        fallback_label: input.fallback_label.clone(),
        ..BuildConfig::default()
    };
    if input.seed_ids {
        Builder::with_ids(config, Box::new(SequentialIdSource::new()))
    } else {
        Builder::new(config)
    }
}

pub(crate) fn run_build(
    input: &InputArgs,
    progress: Option<&mut dyn FnMut(menuforge_core::BuildProgress)>,
) -> Result<CatalogBuild> {
    let build = make_builder(input).build_files(
        &input.items,
        input.options.as_deref(),
        input.images.as_deref(),
        progress,
    )?;
    Ok(build)
}
