//! Thumbnail propagation: gives every category a representative image pulled
//! from the first item reachable beneath it.

use std::collections::HashMap;

use crate::domain::{CatalogRoot, Item};

/// Set every category's thumbnail. A category with items takes its first
/// item's thumbnail, empty or not; a category without items takes the first
/// non-empty thumbnail among its children in order. Runs after repair, so
/// the pass sees leaf-held items only.
pub fn propagate_thumbnails(root: &mut CatalogRoot, items: &[Item]) {
    let by_item: HashMap<&str, &str> = items
        .iter()
        .map(|item| (item.id.as_str(), item.thumbnail.as_str()))
        .collect();
    let by_category: HashMap<&str, usize> = root
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.as_str(), i))
        .collect();

    let thumbnails: Vec<String> = root
        .categories
        .iter()
        .map(|c| category_thumbnail(root, &by_item, &by_category, c.id.as_str()))
        .collect();
    for (category, thumbnail) in root.categories.iter_mut().zip(thumbnails) {
        category.thumbnail = thumbnail;
    }
}

fn category_thumbnail(
    root: &CatalogRoot,
    by_item: &HashMap<&str, &str>,
    by_category: &HashMap<&str, usize>,
    id: &str,
) -> String {
    let Some(&index) = by_category.get(id) else {
        return String::new();
    };
    let category = &root.categories[index];

    if let Some(first) = category.items.first() {
        return by_item
            .get(first.item_id.as_str())
            .copied()
            .unwrap_or("")
            .to_string();
    }
    for child_id in &category.child_ids {
        let thumbnail = category_thumbnail(root, by_item, by_category, child_id);
        if !thumbnail.is_empty() {
            return thumbnail;
        }
    }
    String::new()
}
