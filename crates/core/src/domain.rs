//! Typed records for the catalog document. Ad-hoc keyed maps from upstream
//! exports are normalized into these structs before any tree logic runs.

use serde::{Deserialize, Serialize};

/// A display string in a single language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub lang: String,
    pub value: String,
    pub verified: bool,
}

impl LocalizedText {
    pub fn new(lang: &str, value: &str) -> Self {
        Self {
            lang: lang.to_string(),
            value: value.to_string(),
            verified: true,
        }
    }
}

/// Authorship metadata passed through to the document unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub author_id: String,
    pub author_kind: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    pub is_removed: bool,
}

/// A link record placing an item under a leaf category. The link carries its
/// own identifier in addition to the item's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
    pub item_id: String,
}

/// One node of the two-level category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    /// Back-reference to the parent node; `None` for main categories.
    pub parent_id: Option<String>,
    /// Child identifiers in creation order.
    pub child_ids: Vec<String>,
    pub name: LocalizedText,
    /// Creation-order sequence number, unique within the catalog.
    pub local: u32,
    /// Item references. Must be empty on any node with children once the
    /// repair pass has run.
    pub items: Vec<ItemRef>,
    /// Representative image URL propagated from the first item beneath this
    /// node; empty when no item is reachable.
    pub thumbnail: String,
}

impl Category {
    pub fn is_leaf(&self) -> bool {
        self.child_ids.is_empty()
    }

    pub fn display_name(&self) -> &str {
        &self.name.value
    }
}

/// Root of one built catalog. Owns every category exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRoot {
    pub id: String,
    /// All categories, mains and children interleaved in creation order.
    pub categories: Vec<Category>,
    pub attribution: Attribution,
}

impl CatalogRoot {
    pub fn category_by_id(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryMode {
    Normal,
    ForcedOutOfStock,
}

/// One product from the items export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: LocalizedText,
    /// Price in integer minor currency units.
    pub base_price: i64,
    pub sku: String,
    /// At most one option-group reference, linked by SKU.
    pub option_id: Option<String>,
    /// Image URLs in source order, capped during assignment.
    pub images: Vec<String>,
    /// First image URL, or empty when the item has no images.
    pub thumbnail: String,
    /// The owning leaf category, when the fallback chain resolved one.
    pub category_id: Option<String>,
    pub description: Option<LocalizedText>,
    pub enabled: bool,
    pub inventory_mode: InventoryMode,
    pub delivery_methods: Vec<String>,
}

/// One selectable value inside an option group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    pub id: String,
    pub name: LocalizedText,
    pub price_markup: Option<i64>,
}

/// A choice group offered on items sharing its external key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub id: String,
    /// The merchant SKU this group is keyed by.
    pub external_key: String,
    pub name: LocalizedText,
    pub kind: String,
    /// Identifier of the first value, preselected.
    pub default_value: Option<String>,
    pub values: Vec<OptionValue>,
}

/// Summary counters for one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub categories: usize,
    pub items: usize,
    pub unattached_items: usize,
    pub option_groups: usize,
}
