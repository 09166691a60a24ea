//! Category tree builder: derives the two-level skeleton from the distinct
//! (category, subcategory) pairs observed in item rows. The skeleton is fixed
//! before any item is assigned; assignment never creates nodes.

use std::collections::{HashMap, HashSet};

use crate::domain::{Attribution, CatalogRoot, Category, LocalizedText};
use crate::id::IdSource;
use crate::rows::ItemRow;
use crate::BuildConfig;

/// (category, subcategory) → index into `root.categories`. Contains a
/// `(name, "")` entry for every main category and a `(name, fallback)` entry
/// when a synthetic fallback child was created.
pub type CategoryLookup = HashMap<(String, String), usize>;

/// The built skeleton plus its pair lookup.
pub struct Skeleton {
    pub root: CatalogRoot,
    pub lookup: CategoryLookup,
}

/// Build the skeleton tree. Pairs are grouped by first-encounter order in
/// row order, so the same input always yields the same shape and the same
/// local sequence numbers.
pub fn build_skeleton(
    rows: &[ItemRow],
    config: &BuildConfig,
    ids: &mut dyn IdSource,
) -> Skeleton {
    let (order, subcats) = collect_pairs(rows);

    let root_id = ids.next_id();
    let mut categories: Vec<Category> = Vec::new();
    let mut lookup = CategoryLookup::new();
    let mut local: u32 = 0;

    for cat_name in order {
        let subs = &subcats[cat_name];
        let has_real_subcat = subs.iter().any(|s| !s.is_empty());
        let wants_fallback = subs.iter().any(|s| s.is_empty());

        let main_index = categories.len();
        categories.push(Category {
            id: ids.next_id(),
            parent_id: None,
            child_ids: Vec::new(),
            name: LocalizedText::new(&config.language, cat_name),
            local: take_local(&mut local),
            items: Vec::new(),
            thumbnail: String::new(),
        });
        lookup.insert((cat_name.to_string(), String::new()), main_index);

        // A category seen only with empty subcategories is itself the leaf.
        if !has_real_subcat {
            continue;
        }

        for sub in subs.iter().filter(|s| !s.is_empty()) {
            let index = push_child(
                &mut categories,
                main_index,
                ids.next_id(),
                LocalizedText::new(&config.language, sub),
                take_local(&mut local),
            );
            lookup.insert((cat_name.to_string(), sub.to_string()), index);
        }

        if wants_fallback {
            let index = push_child(
                &mut categories,
                main_index,
                ids.next_id(),
                LocalizedText::new(&config.language, &config.fallback_label),
                take_local(&mut local),
            );
            // A real subcategory sharing the fallback label is shadowed here.
            lookup.insert((cat_name.to_string(), config.fallback_label.clone()), index);
        }
    }

    Skeleton {
        root: CatalogRoot {
            id: root_id,
            categories,
            attribution: Attribution {
                author_id: config.author_id.clone(),
                author_kind: config.author_kind.clone(),
                created_at: config.created_at,
                is_removed: false,
            },
        },
        lookup,
    }
}

/// Distinct (category, subcategory) pairs in first-encounter order:
/// categories ordered by first appearance, subcategories likewise within
/// each category. The empty string marks "no subcategory".
fn collect_pairs<'a>(rows: &'a [ItemRow]) -> (Vec<&'a str>, HashMap<&'a str, Vec<&'a str>>) {
    let mut order: Vec<&str> = Vec::new();
    let mut subcats: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for row in rows {
        let cat = row.category.as_str();
        if cat.is_empty() {
            continue;
        }
        let sub = row.subcategory.as_str();
        if !seen.insert((cat, sub)) {
            continue;
        }
        if !subcats.contains_key(cat) {
            order.push(cat);
        }
        subcats.entry(cat).or_default().push(sub);
    }

    (order, subcats)
}

fn take_local(counter: &mut u32) -> u32 {
    let value = *counter;
    *counter += 1;
    value
}

fn push_child(
    categories: &mut Vec<Category>,
    parent_index: usize,
    id: String,
    name: LocalizedText,
    local: u32,
) -> usize {
    let parent_id = categories[parent_index].id.clone();
    let index = categories.len();
    categories[parent_index].child_ids.push(id.clone());
    categories.push(Category {
        id,
        parent_id: Some(parent_id),
        child_ids: Vec::new(),
        name,
        local,
        items: Vec::new(),
        thumbnail: String::new(),
    });
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIdSource;

    fn make_row(category: &str, subcategory: &str) -> ItemRow {
        ItemRow {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            ..ItemRow::default()
        }
    }

    fn build(rows: &[ItemRow]) -> Skeleton {
        let mut ids = SequentialIdSource::new();
        build_skeleton(rows, &BuildConfig::default(), &mut ids)
    }

    // ── Shape ────────────────────────────────────────────────────

    #[test]
    fn test_leaf_only_main_category() {
        let skeleton = build(&[make_row("Snacks", "")]);

        assert_eq!(skeleton.root.categories.len(), 1);
        let main = &skeleton.root.categories[0];
        assert_eq!(main.display_name(), "Snacks");
        assert!(main.is_leaf());
        assert!(skeleton.lookup.contains_key(&("Snacks".into(), "".into())));
        assert!(!skeleton.lookup.contains_key(&("Snacks".into(), "Misc".into())));
    }

    #[test]
    fn test_subcategories_become_children() {
        let skeleton = build(&[make_row("Drinks", "Soda"), make_row("Drinks", "Juice")]);

        let main = &skeleton.root.categories[0];
        assert_eq!(main.child_ids.len(), 2);
        let soda = &skeleton.root.categories[skeleton.lookup[&("Drinks".into(), "Soda".into())]];
        assert_eq!(soda.parent_id.as_deref(), Some(main.id.as_str()));
        assert!(soda.is_leaf());
    }

    #[test]
    fn test_fallback_child_created_when_empty_subcategory_present() {
        let skeleton = build(&[make_row("Drinks", "Soda"), make_row("Drinks", "")]);

        let main = &skeleton.root.categories[0];
        assert_eq!(main.child_ids.len(), 2);
        let misc_index = skeleton.lookup[&("Drinks".into(), "Misc".into())];
        let misc = &skeleton.root.categories[misc_index];
        assert_eq!(misc.display_name(), "Misc");
        assert!(misc.is_leaf());
        assert_eq!(misc.parent_id.as_deref(), Some(main.id.as_str()));
    }

    #[test]
    fn test_no_fallback_without_empty_subcategory() {
        let skeleton = build(&[make_row("Drinks", "Soda")]);

        assert_eq!(skeleton.root.categories.len(), 2);
        assert!(!skeleton.lookup.contains_key(&("Drinks".into(), "Misc".into())));
    }

    // ── Idempotent pair construction ─────────────────────────────

    #[test]
    fn test_repeated_pairs_map_to_same_node() {
        let skeleton = build(&[
            make_row("Drinks", "Soda"),
            make_row("Drinks", "Soda"),
            make_row("Drinks", "Soda"),
        ]);

        assert_eq!(skeleton.root.categories.len(), 2);
        assert_eq!(skeleton.lookup.len(), 2);
    }

    // ── Sequence numbers ─────────────────────────────────────────

    #[test]
    fn test_local_sequence_numbers_follow_creation_order() {
        let skeleton = build(&[
            make_row("Drinks", "Soda"),
            make_row("Drinks", ""),
            make_row("Snacks", ""),
        ]);

        let locals: Vec<u32> = skeleton.root.categories.iter().map(|c| c.local).collect();
        assert_eq!(locals, vec![0, 1, 2, 3]);

        let names: Vec<&str> = skeleton
            .root
            .categories
            .iter()
            .map(|c| c.display_name())
            .collect();
        assert_eq!(names, vec!["Drinks", "Soda", "Misc", "Snacks"]);
    }

    #[test]
    fn test_category_order_follows_first_encounter() {
        let skeleton = build(&[
            make_row("Snacks", ""),
            make_row("Drinks", "Soda"),
            make_row("Snacks", ""),
        ]);

        assert_eq!(skeleton.root.categories[0].display_name(), "Snacks");
        assert_eq!(skeleton.root.categories[1].display_name(), "Drinks");
    }

    // ── Determinism ──────────────────────────────────────────────

    #[test]
    fn test_same_input_same_skeleton() {
        let rows = vec![
            make_row("Drinks", "Soda"),
            make_row("Drinks", ""),
            make_row("Snacks", "Chips"),
            make_row("Snacks", "Chips"),
        ];

        let a = build(&rows);
        let b = build(&rows);
        assert_eq!(a.root, b.root);
        assert_eq!(a.lookup, b.lookup);
    }

    // ── Fallback label collisions ────────────────────────────────

    #[test]
    fn test_real_subcategory_named_like_fallback_is_shadowed() {
        let skeleton = build(&[make_row("Drinks", "Misc"), make_row("Drinks", "")]);

        // Both the real "Misc" subcategory and the synthetic child exist as
        // nodes, but the lookup entry points at the synthetic one.
        let main = &skeleton.root.categories[0];
        assert_eq!(main.child_ids.len(), 2);
        let index = skeleton.lookup[&("Drinks".into(), "Misc".into())];
        assert_eq!(skeleton.root.categories[index].local, 2);
    }

    #[test]
    fn test_rows_without_category_are_ignored() {
        let skeleton = build(&[make_row("", "Soda"), make_row("Drinks", "")]);

        assert_eq!(skeleton.root.categories.len(), 1);
        assert_eq!(skeleton.root.categories[0].display_name(), "Drinks");
    }
}
