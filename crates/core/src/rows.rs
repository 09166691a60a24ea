//! Row normalizer: reads the three CSV exports into typed records, trimming
//! every field and failing fast when a required column is absent. The csv
//! reader tolerates a UTF-8 BOM, matching the upstream export encoding.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Diagnostic, Error, Result};

/// One data row from the items export. Fields are trimmed; emptiness checks
/// happen during assignment where they can be fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemRow {
    /// 1-based data row number (header excluded), used in messages.
    pub row: usize,
    pub price: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub sku: String,
    pub description: String,
    pub enabled: String,
    pub in_stock: String,
    pub delivery_methods: String,
}

/// One data row from the options export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionRow {
    pub row: usize,
    pub sku: String,
    pub name: String,
    pub display_name: String,
    pub price_markup: String,
}

/// SKU → image URLs in source order.
pub type ImageIndex = HashMap<String, Vec<String>>;

/// Header lookup for one CSV file.
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Self { index }
    }

    fn require(&self, file: &'static str, column: &'static str) -> Result<()> {
        if self.index.contains_key(column) {
            Ok(())
        } else {
            Err(Error::MissingColumn { file, column })
        }
    }

    /// The trimmed field value, or `""` when the column or cell is absent.
    fn get<'r>(&self, record: &'r csv::StringRecord, name: &str) -> &'r str {
        self.index
            .get(name)
            .and_then(|&i| record.get(i))
            .map(str::trim)
            .unwrap_or("")
    }
}

pub fn read_item_rows(path: &Path) -> Result<Vec<ItemRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let columns = Columns::from_headers(&reader.headers()?.clone());
    for column in ["price", "name", "cat_name"] {
        columns.require("items", column)?;
    }

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(ItemRow {
            row: i + 1,
            price: columns.get(&record, "price").to_string(),
            name: columns.get(&record, "name").to_string(),
            category: columns.get(&record, "cat_name").to_string(),
            subcategory: columns.get(&record, "sub_cat").to_string(),
            sku: columns.get(&record, "merchant_sku").to_string(),
            description: columns.get(&record, "description").to_string(),
            enabled: columns.get(&record, "enabled").to_string(),
            in_stock: columns.get(&record, "in_stock").to_string(),
            delivery_methods: columns.get(&record, "delivery_methods").to_string(),
        });
    }
    Ok(rows)
}

pub fn read_option_rows(path: &Path) -> Result<Vec<OptionRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let columns = Columns::from_headers(&reader.headers()?.clone());
    for column in ["merchant_sku", "opt_name"] {
        columns.require("options", column)?;
    }

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(OptionRow {
            row: i + 1,
            sku: columns.get(&record, "merchant_sku").to_string(),
            name: columns.get(&record, "opt_name").to_string(),
            display_name: columns.get(&record, "dis_name").to_string(),
            price_markup: columns.get(&record, "price_markup").to_string(),
        });
    }
    Ok(rows)
}

/// Read the images export into an order-preserving SKU index. Rows with an
/// empty SKU or URL are dropped with a diagnostic, never an error.
pub fn read_image_index(path: &Path, diagnostics: &mut Vec<Diagnostic>) -> Result<ImageIndex> {
    let mut reader = csv::Reader::from_path(path)?;
    let columns = Columns::from_headers(&reader.headers()?.clone());
    for column in ["merchant_sku", "image_url"] {
        columns.require("images", column)?;
    }

    let mut index = ImageIndex::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let sku = columns.get(&record, "merchant_sku");
        let url = columns.get(&record, "image_url");
        if sku.is_empty() || url.is_empty() {
            diagnostics.push(Diagnostic::ImageRowSkipped { row: i + 1 });
            continue;
        }
        index
            .entry(sku.to_string())
            .or_insert_with(Vec::new)
            .push(url.to_string());
    }
    Ok(index)
}
