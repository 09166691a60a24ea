//! Item assignment: validates each item row, converts the price to minor
//! units, resolves the owning leaf via the fallback chain, and attaches
//! images and option references. Runs against a fixed skeleton.

use std::collections::HashMap;

use crate::domain::{InventoryMode, Item, ItemRef, LocalizedText};
use crate::error::{Diagnostic, Error, Result};
use crate::id::IdSource;
use crate::rows::{ImageIndex, ItemRow};
use crate::tree::Skeleton;
use crate::BuildConfig;

/// Outcome of the leaf-resolution fallback chain.
enum Resolution {
    Leaf(usize),
    /// The `(category, "")` node exists but has children; nothing to attach to.
    ParentWithChildren,
    NoMatch,
}

/// Assign all item rows in source order. Attachment failures are recoverable
/// diagnostics; missing required fields and bad prices abort the build.
pub fn assign_items(
    rows: &[ItemRow],
    skeleton: &mut Skeleton,
    images: &ImageIndex,
    option_index: &HashMap<String, String>,
    config: &BuildConfig,
    ids: &mut dyn IdSource,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<Item>> {
    let mut items = Vec::with_capacity(rows.len());

    for row in rows {
        let mut item = build_item(row, images, option_index, config, ids, diagnostics)?;

        match resolve_leaf(skeleton, &row.category, &row.subcategory, &config.fallback_label) {
            Resolution::Leaf(index) => {
                let category = &mut skeleton.root.categories[index];
                item.category_id = Some(category.id.clone());
                category.items.push(ItemRef {
                    id: ids.next_id(),
                    item_id: item.id.clone(),
                });
            }
            Resolution::ParentWithChildren => {
                diagnostics.push(Diagnostic::UnattachedParent {
                    row: row.row,
                    category: row.category.clone(),
                });
            }
            Resolution::NoMatch => {
                diagnostics.push(Diagnostic::UnmatchedCategory {
                    row: row.row,
                    category: row.category.clone(),
                    subcategory: row.subcategory.clone(),
                });
            }
        }

        items.push(item);
    }

    Ok(items)
}

fn build_item(
    row: &ItemRow,
    images: &ImageIndex,
    option_index: &HashMap<String, String>,
    config: &BuildConfig,
    ids: &mut dyn IdSource,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Item> {
    for (field, value) in [
        ("price", &row.price),
        ("name", &row.name),
        ("cat_name", &row.category),
    ] {
        if value.is_empty() {
            return Err(Error::MissingField {
                row: row.row,
                field,
            });
        }
    }

    let base_price = minor_units(&row.price, row.row)?;
    let enabled = parse_enabled(row)?;
    let inventory_mode = parse_inventory(row)?;

    let mut urls: Vec<String> = images.get(&row.sku).cloned().unwrap_or_default();
    if urls.len() > config.max_images_per_item {
        diagnostics.push(Diagnostic::ImagesTruncated {
            row: row.row,
            sku: row.sku.clone(),
            total: urls.len(),
            kept: config.max_images_per_item,
        });
        urls.truncate(config.max_images_per_item);
    }
    let thumbnail = urls.first().cloned().unwrap_or_default();

    let option_id = if row.sku.is_empty() {
        None
    } else {
        option_index.get(&row.sku).cloned()
    };

    let description = if row.description.is_empty() {
        None
    } else {
        Some(LocalizedText::new(&config.language, &row.description))
    };

    Ok(Item {
        id: ids.next_id(),
        name: LocalizedText::new(&config.language, &row.name),
        base_price,
        sku: row.sku.clone(),
        option_id,
        images: urls,
        thumbnail,
        category_id: None,
        description,
        enabled,
        inventory_mode,
        delivery_methods: delivery_methods(row, config),
    })
}

/// Convert a decimal price string to integer minor units: parse as f64,
/// multiply by 100, round to the nearest integer (ties away from zero on the
/// binary value). "19.995" yields 1999 because the nearest f64 to 19.995 sits
/// just below it.
pub fn minor_units(value: &str, row: usize) -> Result<i64> {
    let price: f64 = value.parse().map_err(|_| Error::InvalidPrice {
        row,
        value: value.to_string(),
    })?;
    Ok((price * 100.0).round() as i64)
}

fn parse_enabled(row: &ItemRow) -> Result<bool> {
    match row.enabled.to_ascii_uppercase().as_str() {
        "" | "YES" => Ok(true),
        "NO" => Ok(false),
        _ => Err(Error::InvalidEnabledFlag {
            row: row.row,
            value: row.enabled.clone(),
        }),
    }
}

fn parse_inventory(row: &ItemRow) -> Result<InventoryMode> {
    match row.in_stock.to_ascii_uppercase().as_str() {
        "" | "Y" => Ok(InventoryMode::Normal),
        "N" => Ok(InventoryMode::ForcedOutOfStock),
        _ => Err(Error::InvalidStockFlag {
            row: row.row,
            value: row.in_stock.clone(),
        }),
    }
}

fn delivery_methods(row: &ItemRow, config: &BuildConfig) -> Vec<String> {
    if row.delivery_methods.is_empty() {
        return config.default_delivery_methods.clone();
    }
    row.delivery_methods
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// The deterministic fallback chain, first match wins:
/// exact (category, subcategory) when the subcategory is non-empty, then
/// (category, fallback label), then the (category, "") node itself — valid
/// only when it has no children.
fn resolve_leaf(
    skeleton: &Skeleton,
    category: &str,
    subcategory: &str,
    fallback_label: &str,
) -> Resolution {
    if !subcategory.is_empty() {
        if let Some(&index) = skeleton
            .lookup
            .get(&(category.to_string(), subcategory.to_string()))
        {
            return Resolution::Leaf(index);
        }
    }
    if let Some(&index) = skeleton
        .lookup
        .get(&(category.to_string(), fallback_label.to_string()))
    {
        return Resolution::Leaf(index);
    }
    if let Some(&index) = skeleton.lookup.get(&(category.to_string(), String::new())) {
        if skeleton.root.categories[index].is_leaf() {
            return Resolution::Leaf(index);
        }
        return Resolution::ParentWithChildren;
    }
    Resolution::NoMatch
}
