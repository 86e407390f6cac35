//! Inventory items and spreadsheet import
//!
//! Stock sheets use the columns `Qty`, `Model No.`, `Description`,
//! `Project Name` and `Price`. Blank cells import as `None` rather than zero,
//! so that an unknown price stays distinguishable from a free item.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::csv::CsvTable;
use crate::error::{FiretrackError, Result};
use crate::numeric::{leading_int, parse_money};

/// Stock sheet column names
pub const QTY_COLUMN: &str = "Qty";
pub const MODEL_NO_COLUMN: &str = "Model No.";
pub const DESCRIPTION_COLUMN: &str = "Description";
pub const PROJECT_NAME_COLUMN: &str = "Project Name";
pub const PRICE_COLUMN: &str = "Price";

/// A stocked part, optionally allocated to a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Units on hand
    pub qty: Option<i64>,
    /// Manufacturer model number
    pub model_no: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Project the stock is allocated to
    pub project_name: Option<String>,
    /// Unit price in USD
    pub price: Option<f64>,
}

impl InventoryItem {
    /// Validate a manually entered item
    ///
    /// Quantity, model number and project name are required; description and
    /// price are optional.
    pub fn manual(
        qty: Option<i64>,
        model_no: &str,
        description: &str,
        project_name: &str,
        price: Option<f64>,
    ) -> Result<Self> {
        let model_no = model_no.trim();
        let project_name = project_name.trim();

        let qty = match qty {
            Some(qty) if !model_no.is_empty() && !project_name.is_empty() => qty,
            _ => {
                return Err(FiretrackError::InvalidArgument(
                    "Qty, Model No., and Project Name are required".to_string(),
                ));
            }
        };

        let description = description.trim();
        Ok(Self {
            qty: Some(qty),
            model_no: Some(model_no.to_string()),
            description: (!description.is_empty()).then(|| description.to_string()),
            project_name: Some(project_name.to_string()),
            price,
        })
    }

    /// Quantity times unit price, when both are known
    pub fn value(&self) -> Option<f64> {
        Some(self.qty? as f64 * self.price?)
    }
}

/// Convert every row of a stock sheet into an item
pub fn items_from_csv(table: &CsvTable) -> Vec<InventoryItem> {
    let items: Vec<InventoryItem> = table
        .rows
        .iter()
        .map(|row| InventoryItem {
            qty: row.non_empty(QTY_COLUMN).and_then(leading_int),
            model_no: row.non_empty(MODEL_NO_COLUMN).map(str::to_string),
            description: row.non_empty(DESCRIPTION_COLUMN).map(str::to_string),
            project_name: row.non_empty(PROJECT_NAME_COLUMN).map(str::to_string),
            price: row.non_empty(PRICE_COLUMN).and_then(parse_money),
        })
        .collect();

    debug!("Mapped {} inventory rows", items.len());
    items
}

/// Total stock value over items with both a quantity and a price
pub fn total_value(items: &[InventoryItem]) -> f64 {
    items.iter().filter_map(InventoryItem::value).sum()
}
