//! Change order pricing
//!
//! A change order prices extra scope from four inputs: a material list
//! (usually imported from a supplier CSV), internal labor, subcontracted
//! work and a margin percentage applied on top of the subtotal.
//!
//! # Examples
//!
//! ```
//! use firetrack_core::change_order::{ChangeOrder, MaterialLine};
//!
//! let order = ChangeOrder {
//!     materials: vec![MaterialLine::new(4, "Horn strobe", 85.0)],
//!     margin_percent: 10.0,
//!     ..Default::default()
//! };
//! let pricing = order.pricing();
//! assert_eq!(pricing.subtotal, 340.0);
//! assert_eq!(pricing.final_price, 374.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::csv::CsvTable;
use crate::labor::{LaborCategory, LaborMatrix};
use crate::numeric::{deserialize_decimal_or_zero, leading_int, parse_money};

/// CSV column holding the quantity
pub const QTY_COLUMN: &str = "Qty";
/// CSV column holding the description
pub const DESCRIPTION_COLUMN: &str = "Description";
/// CSV column holding the unit price
pub const UNIT_PRICE_COLUMN: &str = "Unit Price";

/// One material on the change order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialLine {
    /// Units ordered
    #[serde(default)]
    pub qty: i64,
    /// Part description as printed on the supplier sheet
    #[serde(default)]
    pub description: String,
    /// Price per unit in dollars
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub unit_price: f64,
}

impl MaterialLine {
    /// Create a material line
    pub fn new(qty: i64, description: impl Into<String>, unit_price: f64) -> Self {
        Self {
            qty,
            description: description.into(),
            unit_price,
        }
    }

    /// Quantity times unit price
    pub fn extended(&self) -> f64 {
        self.qty as f64 * self.unit_price
    }
}

/// Read material lines from a `Qty, Description, Unit Price` sheet
///
/// Unreadable quantities and prices count as zero so that one bad cell does
/// not block the import.
pub fn materials_from_csv(table: &CsvTable) -> Vec<MaterialLine> {
    table
        .rows
        .iter()
        .map(|row| MaterialLine {
            qty: leading_int(row.get(QTY_COLUMN)).unwrap_or(0),
            description: row.get(DESCRIPTION_COLUMN).to_string(),
            unit_price: parse_money(row.get(UNIT_PRICE_COLUMN)).unwrap_or(0.0),
        })
        .collect()
}

/// In-house labor cost per category
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InternalLabor {
    /// Engineering and design
    #[serde(default, alias = "design_cost", deserialize_with = "deserialize_decimal_or_zero")]
    pub design: f64,
    /// Drafting
    #[serde(default, alias = "cad_cost", deserialize_with = "deserialize_decimal_or_zero")]
    pub cad: f64,
    /// Project management
    #[serde(default, alias = "pm_cost", deserialize_with = "deserialize_decimal_or_zero")]
    pub pm: f64,
    /// Shop prep and programming
    #[serde(default, alias = "prep_cost", deserialize_with = "deserialize_decimal_or_zero")]
    pub prep: f64,
    /// Technician time
    #[serde(default, alias = "tech_cost", deserialize_with = "deserialize_decimal_or_zero")]
    pub tech: f64,
    /// Installation crew
    #[serde(default, alias = "install_cost", deserialize_with = "deserialize_decimal_or_zero")]
    pub install: f64,
}

impl InternalLabor {
    /// Sum of every labor category
    pub fn total(&self) -> f64 {
        self.design + self.cad + self.pm + self.prep + self.tech + self.install
    }
}

impl From<&LaborMatrix> for InternalLabor {
    /// Price the change order from the quoted column of the labor matrix
    fn from(matrix: &LaborMatrix) -> Self {
        let quoted = |category| matrix.get(category).quoted;
        Self {
            design: quoted(LaborCategory::Design),
            cad: quoted(LaborCategory::Cad),
            pm: quoted(LaborCategory::ProjectManagement),
            prep: quoted(LaborCategory::Prep),
            tech: quoted(LaborCategory::Tech),
            install: quoted(LaborCategory::Install),
        }
    }
}

/// Subcontracted work and pass-through fees
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subcontractor {
    /// Fire alarm subcontractor labor
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub fire_alarm_labor: f64,
    /// Other subcontracted labor
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub subcontractor_labor: f64,
    /// Permit fees
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub permit_fees: f64,
    /// Equipment rental fees
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub rental_fees: f64,
}

impl Subcontractor {
    /// Sum of subcontracted labor and fees
    pub fn total(&self) -> f64 {
        self.fire_alarm_labor + self.subcontractor_labor + self.permit_fees + self.rental_fees
    }
}

/// Customer block printed on the change order
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    /// Billed customer
    #[serde(default)]
    pub customer_name: String,
    /// Customer phone number, free text
    #[serde(default)]
    pub customer_phone: String,
    /// Person on site who approves the work
    #[serde(default)]
    pub contact_name: String,
}

/// A change order document
///
/// The default document is the first change order of a project (`CO-001`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeOrder {
    /// Sequence number within the project, starting at 1
    #[serde(default = "default_number")]
    pub number: u32,
    /// Project the change order belongs to
    #[serde(default)]
    pub project_id: Option<String>,
    /// Customer block
    #[serde(default)]
    pub customer: CustomerInfo,
    /// Material list, usually imported from a supplier sheet
    #[serde(default)]
    pub materials: Vec<MaterialLine>,
    /// In-house labor cost
    #[serde(default)]
    pub internal_labor: InternalLabor,
    /// Subcontracted work and fees
    #[serde(default)]
    pub subcontractor: Subcontractor,
    /// Margin added on top of the subtotal, in percent
    #[serde(default, alias = "margin", deserialize_with = "deserialize_decimal_or_zero")]
    pub margin_percent: f64,
}

fn default_number() -> u32 {
    1
}

impl Default for ChangeOrder {
    fn default() -> Self {
        Self {
            number: default_number(),
            project_id: None,
            customer: CustomerInfo::default(),
            materials: Vec::new(),
            internal_labor: InternalLabor::default(),
            subcontractor: Subcontractor::default(),
            margin_percent: 0.0,
        }
    }
}

/// Priced totals of a change order
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeOrderPricing {
    /// Sum of extended material lines
    pub materials_total: f64,
    /// Sum of internal labor
    pub internal_labor_total: f64,
    /// Sum of subcontracted labor and fees
    pub subcontractor_total: f64,
    /// Materials, labor and subcontractor totals combined
    pub subtotal: f64,
    /// Margin applied, in percent
    pub margin_percent: f64,
    /// Subtotal times the margin percentage
    pub margin_amount: f64,
    /// Subtotal plus margin
    pub final_price: f64,
}

impl ChangeOrder {
    /// Total every section and apply the margin
    pub fn pricing(&self) -> ChangeOrderPricing {
        let materials_total: f64 = self.materials.iter().map(MaterialLine::extended).sum();
        let internal_labor_total = self.internal_labor.total();
        let subcontractor_total = self.subcontractor.total();
        let subtotal = materials_total + internal_labor_total + subcontractor_total;
        let margin_amount = subtotal * self.margin_percent / 100.0;

        ChangeOrderPricing {
            materials_total,
            internal_labor_total,
            subcontractor_total,
            subtotal,
            margin_percent: self.margin_percent,
            margin_amount,
            final_price: subtotal + margin_amount,
        }
    }

    /// Printed change order number, e.g. `CO-001`
    pub fn display_number(&self) -> String {
        format_change_order_number(self.number)
    }
}

/// Format a change order sequence number as `CO-NNN`
pub fn format_change_order_number(number: u32) -> String {
    format!("CO-{number:03}")
}
