//! Document export: serializes a finished build to the catalog JSON shape,
//! plus the image-stripping transform applied to existing documents.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::domain::{CatalogRoot, Item, OptionGroup};
use crate::error::Result;
use crate::CatalogBuild;

/// Borrowing view over a build, shaped like the output document.
#[derive(Serialize)]
pub struct DocumentView<'a> {
    pub catalog: &'a CatalogRoot,
    pub items: &'a [Item],
    pub options: &'a [OptionGroup],
}

impl<'a> DocumentView<'a> {
    pub fn new(build: &'a CatalogBuild) -> Self {
        Self {
            catalog: &build.catalog,
            items: &build.items,
            options: &build.options,
        }
    }
}

/// Write the document as pretty-printed JSON.
pub fn write_document(build: &CatalogBuild, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&DocumentView::new(build))?;
    fs::write(path, json)?;
    Ok(())
}

/// The document as an in-memory JSON value.
pub fn to_value(build: &CatalogBuild) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(DocumentView::new(build))?)
}

/// Blank every image reference in a document, wherever it sits: `thumbnail`
/// string fields become `""` and `images` arrays become `[]`. Everything
/// else is left as-is.
pub fn strip_images(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                match (key.as_str(), &mut *child) {
                    ("thumbnail", serde_json::Value::String(s)) => s.clear(),
                    ("images", serde_json::Value::Array(a)) => a.clear(),
                    _ => strip_images(child),
                }
            }
        }
        serde_json::Value::Array(values) => {
            for child in values {
                strip_images(child);
            }
        }
        _ => {}
    }
}
