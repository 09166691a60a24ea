//! Option-group construction: folds the options export into one choice group
//! per SKU, preserving value order and first-seen group naming.

use std::collections::HashMap;

use crate::domain::{OptionGroup, OptionValue};
use crate::error::Diagnostic;
use crate::id::IdSource;
use crate::rows::OptionRow;
use crate::BuildConfig;

/// Build one group per distinct (SKU, display name) pair, in first-seen row
/// order. An empty display name takes the configured default before keying,
/// so rows with and without one can land in the same group. Rows missing a
/// SKU or a value name are dropped with a diagnostic. The first value
/// becomes the preselected default.
pub fn build_option_groups(
    rows: &[OptionRow],
    config: &BuildConfig,
    ids: &mut dyn IdSource,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<OptionGroup> {
    let mut groups: Vec<OptionGroup> = Vec::new();
    let mut by_key: HashMap<(String, String), usize> = HashMap::new();

    for row in rows {
        if row.sku.is_empty() {
            diagnostics.push(Diagnostic::OptionRowSkipped {
                row: row.row,
                reason: "empty merchant_sku",
            });
            continue;
        }
        if row.name.is_empty() {
            diagnostics.push(Diagnostic::OptionRowSkipped {
                row: row.row,
                reason: "empty opt_name",
            });
            continue;
        }

        let display = if row.display_name.is_empty() {
            config.default_option_name.as_str()
        } else {
            row.display_name.as_str()
        };
        let key = (row.sku.clone(), display.to_string());
        let index = match by_key.get(&key) {
            Some(&index) => index,
            None => {
                let index = groups.len();
                groups.push(OptionGroup {
                    id: ids.next_id(),
                    external_key: row.sku.clone(),
                    name: crate::domain::LocalizedText::new(&config.language, display),
                    kind: "choice".to_string(),
                    default_value: None,
                    values: Vec::new(),
                });
                by_key.insert(key, index);
                index
            }
        };

        let price_markup = parse_markup(row, diagnostics);
        let value = OptionValue {
            id: ids.next_id(),
            name: crate::domain::LocalizedText::new(&config.language, &row.name),
            price_markup,
        };
        let group = &mut groups[index];
        if group.default_value.is_none() {
            group.default_value = Some(value.id.clone());
        }
        group.values.push(value);
    }

    groups
}

/// SKU → group id, for linking items during assignment. First group wins on
/// a duplicate key, matching group construction order.
pub fn option_index(groups: &[OptionGroup]) -> HashMap<String, String> {
    let mut index = HashMap::new();
    for group in groups {
        index
            .entry(group.external_key.clone())
            .or_insert_with(|| group.id.clone());
    }
    index
}

fn parse_markup(row: &OptionRow, diagnostics: &mut Vec<Diagnostic>) -> Option<i64> {
    if row.price_markup.is_empty() {
        return None;
    }
    match row.price_markup.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            diagnostics.push(Diagnostic::InvalidPriceMarkup {
                row: row.row,
                value: row.price_markup.clone(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIdSource;

    fn make_row(row: usize, sku: &str, name: &str, display_name: &str, markup: &str) -> OptionRow {
        OptionRow {
            row,
            sku: sku.to_string(),
            name: name.to_string(),
            display_name: display_name.to_string(),
            price_markup: markup.to_string(),
        }
    }

    fn build(rows: &[OptionRow]) -> (Vec<OptionGroup>, Vec<Diagnostic>) {
        let mut ids = SequentialIdSource::new();
        let mut diagnostics = Vec::new();
        let groups = build_option_groups(rows, &BuildConfig::default(), &mut ids, &mut diagnostics);
        (groups, diagnostics)
    }

    // ── Grouping ─────────────────────────────────────────────────

    #[test]
    fn test_rows_with_same_sku_fold_into_one_group() {
        let (groups, diagnostics) = build(&[
            make_row(1, "SKU1", "Small", "Size", "0"),
            make_row(2, "SKU1", "Large", "Size", "150"),
        ]);

        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.external_key, "SKU1");
        assert_eq!(group.name.value, "Size");
        assert_eq!(group.kind, "choice");
        assert_eq!(group.values.len(), 2);
        assert_eq!(group.values[0].name.value, "Small");
        assert_eq!(group.values[1].price_markup, Some(150));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let (groups, _) = build(&[
            make_row(1, "B", "x", "", ""),
            make_row(2, "A", "y", "", ""),
            make_row(3, "B", "z", "", ""),
        ]);

        let keys: Vec<&str> = groups.iter().map(|g| g.external_key.as_str()).collect();
        assert_eq!(keys, vec!["B", "A"]);
        assert_eq!(groups[0].values.len(), 2);
    }

    #[test]
    fn test_display_name_defaults_when_missing() {
        let (groups, _) = build(&[make_row(1, "SKU1", "Small", "", "")]);

        assert_eq!(groups[0].name.value, "Επίλεξε νούμερο");
    }

    #[test]
    fn test_distinct_display_names_split_the_sku() {
        let (groups, _) = build(&[
            make_row(1, "SKU1", "Small", "Size", ""),
            make_row(2, "SKU1", "Large", "Portion", ""),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name.value, "Size");
        assert_eq!(groups[1].name.value, "Portion");
        // Item linking sees one entry per SKU; the first group wins.
        let index = option_index(&groups);
        assert_eq!(index["SKU1"], groups[0].id);
    }

    #[test]
    fn test_first_value_becomes_default() {
        let (groups, _) = build(&[
            make_row(1, "SKU1", "Small", "Size", ""),
            make_row(2, "SKU1", "Large", "Size", ""),
        ]);

        let group = &groups[0];
        assert_eq!(group.default_value.as_deref(), Some(group.values[0].id.as_str()));
    }

    // ── Skipped rows ─────────────────────────────────────────────

    #[test]
    fn test_rows_without_sku_or_name_are_skipped() {
        let (groups, diagnostics) = build(&[
            make_row(1, "", "Small", "Size", ""),
            make_row(2, "SKU1", "", "Size", ""),
            make_row(3, "SKU1", "Large", "Size", ""),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].values.len(), 1);
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::OptionRowSkipped {
                    row: 1,
                    reason: "empty merchant_sku",
                },
                Diagnostic::OptionRowSkipped {
                    row: 2,
                    reason: "empty opt_name",
                },
            ]
        );
    }

    #[test]
    fn test_bad_markup_recorded_and_left_unset() {
        let (groups, diagnostics) = build(&[make_row(1, "SKU1", "Small", "Size", "1.5")]);

        assert_eq!(groups[0].values[0].price_markup, None);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::InvalidPriceMarkup {
                row: 1,
                value: "1.5".to_string(),
            }]
        );
    }

    // ── Index ────────────────────────────────────────────────────

    #[test]
    fn test_option_index_maps_sku_to_group_id() {
        let (groups, _) = build(&[
            make_row(1, "SKU1", "Small", "", ""),
            make_row(2, "SKU2", "Red", "", ""),
        ]);

        let index = option_index(&groups);
        assert_eq!(index["SKU1"], groups[0].id);
        assert_eq!(index["SKU2"], groups[1].id);
    }
}
