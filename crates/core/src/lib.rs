//! Catalog document builder: turns flat CSV exports (items, option values,
//! image URLs) into one nested catalog document with a two-level category
//! tree, leaf-only item placement, and propagated thumbnails.
//!
//! The [`Builder`] runs the phases in a fixed order: option groups, tree
//! skeleton, item assignment, repair, thumbnail propagation. Recoverable
//! conditions are collected as [`error::Diagnostic`] values on the result
//! instead of aborting the build.

pub mod assign;
pub mod domain;
pub mod error;
pub mod export;
pub mod id;
pub mod images;
pub mod options;
pub mod repair;
pub mod rows;
pub mod tree;

use std::path::Path;

use domain::{BuildStats, CatalogRoot, Item, OptionGroup};
use error::{Diagnostic, Result};
use id::{IdSource, RandomIdSource};
use rows::{ImageIndex, ItemRow, OptionRow};

/// Progress events emitted while a build runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildProgress {
    RowsLoaded { file: &'static str, count: usize },
    PhaseComplete { phase: &'static str },
}

/// Build parameters. The defaults reproduce the upstream venue export.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Language tag applied to every display string.
    pub language: String,
    /// Name given to synthetic fallback children.
    pub fallback_label: String,
    pub author_id: String,
    pub author_kind: String,
    /// Document creation time, epoch milliseconds.
    pub created_at: i64,
    pub max_images_per_item: usize,
    /// Applied when an item row leaves delivery_methods blank.
    pub default_delivery_methods: Vec<String>,
    /// Display name for option groups whose rows carry none.
    pub default_option_name: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            language: "el".to_string(),
            fallback_label: "Misc".to_string(),
            author_id: "60a28b421f64e098f8e21493".to_string(),
            author_kind: "user".to_string(),
            created_at: chrono::Utc::now().timestamp_millis(),
            max_images_per_item: 5,
            default_delivery_methods: vec![
                "eatin".to_string(),
                "takeaway".to_string(),
                "homedelivery".to_string(),
            ],
            default_option_name: "Επίλεξε νούμερο".to_string(),
        }
    }
}

/// A finished build: the tree, the flat item and option lists, and every
/// diagnostic raised along the way.
#[derive(Debug)]
pub struct CatalogBuild {
    pub catalog: CatalogRoot,
    pub items: Vec<Item>,
    pub options: Vec<OptionGroup>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CatalogBuild {
    pub fn stats(&self) -> BuildStats {
        BuildStats {
            categories: self.catalog.categories.len(),
            items: self.items.len(),
            unattached_items: self
                .items
                .iter()
                .filter(|item| item.category_id.is_none())
                .count(),
            option_groups: self.options.len(),
        }
    }

    /// Categories with children that still hold item references. Empty on
    /// any build whose repair pass found a fallback child for every parent.
    pub fn leaf_violations(&self) -> Vec<(&str, usize)> {
        self.catalog
            .categories
            .iter()
            .filter(|c| !c.is_leaf() && !c.items.is_empty())
            .map(|c| (c.display_name(), c.items.len()))
            .collect()
    }
}

/// Orchestrates one build. Identifier generation is injected so tests and
/// reproducible runs can pin the sequence.
pub struct Builder {
    config: BuildConfig,
    ids: Box<dyn IdSource>,
}

impl Builder {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            ids: Box::new(RandomIdSource::new()),
        }
    }

    pub fn with_ids(config: BuildConfig, ids: Box<dyn IdSource>) -> Self {
        Self { config, ids }
    }

    /// Build from CSV files. The options and images files are optional; a
    /// missing file means an empty export, never an error.
    pub fn build_files(
        &mut self,
        items: &Path,
        options: Option<&Path>,
        images: Option<&Path>,
        mut progress: Option<&mut dyn FnMut(BuildProgress)>,
    ) -> Result<CatalogBuild> {
        let mut diagnostics = Vec::new();

        let item_rows = rows::read_item_rows(items)?;
        report(&mut progress, BuildProgress::RowsLoaded {
            file: "items",
            count: item_rows.len(),
        });

        let option_rows = match options {
            Some(path) => rows::read_option_rows(path)?,
            None => Vec::new(),
        };
        report(&mut progress, BuildProgress::RowsLoaded {
            file: "options",
            count: option_rows.len(),
        });

        let image_index = match images {
            Some(path) => rows::read_image_index(path, &mut diagnostics)?,
            None => ImageIndex::new(),
        };
        report(&mut progress, BuildProgress::RowsLoaded {
            file: "images",
            count: image_index.values().map(Vec::len).sum(),
        });

        self.run(&item_rows, &option_rows, &image_index, diagnostics, progress)
    }

    /// Build from rows already in memory.
    pub fn build_rows(
        &mut self,
        item_rows: &[ItemRow],
        option_rows: &[OptionRow],
        image_index: &ImageIndex,
        progress: Option<&mut dyn FnMut(BuildProgress)>,
    ) -> Result<CatalogBuild> {
        self.run(item_rows, option_rows, image_index, Vec::new(), progress)
    }

    fn run(
        &mut self,
        item_rows: &[ItemRow],
        option_rows: &[OptionRow],
        image_index: &ImageIndex,
        mut diagnostics: Vec<Diagnostic>,
        mut progress: Option<&mut dyn FnMut(BuildProgress)>,
    ) -> Result<CatalogBuild> {
        let groups = options::build_option_groups(
            option_rows,
            &self.config,
            self.ids.as_mut(),
            &mut diagnostics,
        );
        let option_index = options::option_index(&groups);
        report(&mut progress, BuildProgress::PhaseComplete { phase: "options" });

        let mut skeleton = tree::build_skeleton(item_rows, &self.config, self.ids.as_mut());
        report(&mut progress, BuildProgress::PhaseComplete { phase: "skeleton" });

        let mut items = assign::assign_items(
            item_rows,
            &mut skeleton,
            image_index,
            &option_index,
            &self.config,
            self.ids.as_mut(),
            &mut diagnostics,
        )?;
        report(&mut progress, BuildProgress::PhaseComplete {
            phase: "assignment",
        });

        repair::repair_tree(
            &mut skeleton.root,
            &mut items,
            &self.config.fallback_label,
            &mut diagnostics,
        );
        report(&mut progress, BuildProgress::PhaseComplete { phase: "repair" });

        images::propagate_thumbnails(&mut skeleton.root, &items);
        report(&mut progress, BuildProgress::PhaseComplete {
            phase: "thumbnails",
        });

        Ok(CatalogBuild {
            catalog: skeleton.root,
            items,
            options: groups,
            diagnostics,
        })
    }
}

fn report(progress: &mut Option<&mut dyn FnMut(BuildProgress)>, event: BuildProgress) {
    if let Some(callback) = progress {
        callback(event);
    }
}
