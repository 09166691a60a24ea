//! Repair pass: restores the leaf-only placement invariant. Any category
//! with children that still holds item references gets them moved into its
//! fallback child, when one exists under that name.

use std::collections::HashMap;
use std::mem;

use crate::domain::{CatalogRoot, Item};
use crate::error::Diagnostic;

/// Move item references off parent categories and into their fallback child,
/// matched by name case-insensitively. Moved items get their `category_id`
/// rewritten to the new owner. A parent with no matching child keeps its
/// items and is reported instead; repair never creates nodes.
pub fn repair_tree(
    root: &mut CatalogRoot,
    items: &mut [Item],
    fallback_label: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let wanted = fallback_label.to_lowercase();
    let item_index: HashMap<String, usize> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.id.clone(), i))
        .collect();

    let mut moves: Vec<(usize, usize)> = Vec::new();
    for (parent, category) in root.categories.iter().enumerate() {
        if category.is_leaf() || category.items.is_empty() {
            continue;
        }
        let target = category.child_ids.iter().find_map(|child_id| {
            root.categories
                .iter()
                .position(|c| &c.id == child_id && c.display_name().to_lowercase() == wanted)
        });
        match target {
            Some(child) => moves.push((parent, child)),
            None => diagnostics.push(Diagnostic::ParentHoldingItems {
                category: category.display_name().to_string(),
                count: category.items.len(),
            }),
        }
    }

    for (parent, child) in moves {
        let moved = mem::take(&mut root.categories[parent].items);
        let child_id = root.categories[child].id.clone();
        for reference in &moved {
            if let Some(&i) = item_index.get(&reference.item_id) {
                items[i].category_id = Some(child_id.clone());
            }
        }
        root.categories[child].items.extend(moved);
    }
}
