use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{file} CSV is missing required column '{column}'")]
    MissingColumn {
        file: &'static str,
        column: &'static str,
    },

    #[error("items row {row}: required field '{field}' is empty")]
    MissingField { row: usize, field: &'static str },

    #[error("items row {row}: price '{value}' is not a number")]
    InvalidPrice { row: usize, value: String },

    #[error("items row {row}: enabled flag '{value}' must be YES or NO")]
    InvalidEnabledFlag { row: usize, value: String },

    #[error("items row {row}: in_stock flag '{value}' must be Y or N")]
    InvalidStockFlag { row: usize, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// A recoverable condition recorded on the build result. Diagnostics never
/// abort the build; the caller decides whether a partially attached catalog
/// is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No category node matched the item's (category, subcategory) pair and
    /// no fallback leaf existed; the item stays in the flat list unattached.
    UnmatchedCategory {
        row: usize,
        category: String,
        subcategory: String,
    },
    /// The item named a main category that has subcategories but no fallback
    /// leaf, so the item could not be placed on it.
    UnattachedParent { row: usize, category: String },
    /// More images than the cap were listed for a SKU; the surplus was cut.
    ImagesTruncated {
        row: usize,
        sku: String,
        total: usize,
        kept: usize,
    },
    /// After repair, a category with children still holds item references
    /// because it has no fallback child to move them into.
    ParentHoldingItems { category: String, count: usize },
    /// An options row was dropped during group construction.
    OptionRowSkipped { row: usize, reason: &'static str },
    /// A price markup value was not an integer and was left unset.
    InvalidPriceMarkup { row: usize, value: String },
    /// An images row with an empty SKU or URL was dropped.
    ImageRowSkipped { row: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnmatchedCategory {
                row,
                category,
                subcategory,
            } => write!(
                f,
                "items row {row}: no category matches ('{category}', '{subcategory}'); item left unattached"
            ),
            Diagnostic::UnattachedParent { row, category } => write!(
                f,
                "items row {row}: category '{category}' has subcategories and no fallback leaf; item left unattached"
            ),
            Diagnostic::ImagesTruncated {
                row,
                sku,
                total,
                kept,
            } => write!(
                f,
                "items row {row}: sku '{sku}' lists {total} images; keeping first {kept}"
            ),
            Diagnostic::ParentHoldingItems { category, count } => write!(
                f,
                "category '{category}' has subcategories but still holds {count} items and no fallback child"
            ),
            Diagnostic::OptionRowSkipped { row, reason } => {
                write!(f, "options row {row}: skipped ({reason})")
            }
            Diagnostic::InvalidPriceMarkup { row, value } => {
                write!(
                    f,
                    "options row {row}: price markup '{value}' is not an integer; ignored"
                )
            }
            Diagnostic::ImageRowSkipped { row } => {
                write!(f, "images row {row}: empty sku or url; skipped")
            }
        }
    }
}
