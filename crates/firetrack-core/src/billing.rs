//! Billing schedule for applications for payment
//!
//! The contract amount is split across fixed billing categories, the way the
//! AIA continuation sheet is filled in.
//!
//! | Category       | Share |
//! |----------------|-------|
//! | Design         | 14 %  |
//! | Material       | 46 %  |
//! | Install Labor  | 20 %  |
//! | Tech Labor     | 10 %  |
//! | Commissioning  | 10 %  |

use serde::{Deserialize, Serialize};

use crate::types::ProjectRecord;

/// A billing category and its share of the contract
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillingSection {
    /// Category label
    pub label: &'static str,
    /// Share of the contract amount in percent
    pub percent: f64,
}

/// Standard billing categories; the shares add up to 100
pub const BILLING_SECTIONS: [BillingSection; 5] = [
    BillingSection { label: "Design", percent: 14.0 },
    BillingSection { label: "Material", percent: 46.0 },
    BillingSection { label: "Install Labor", percent: 20.0 },
    BillingSection { label: "Tech Labor", percent: 10.0 },
    BillingSection { label: "Commissioning", percent: 10.0 },
];

/// One line of the continuation sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingLine {
    /// Billing category, e.g. `Material`
    pub label: String,
    /// Share of the contract, in percent
    pub percent: f64,
    /// Dollar amount billed for this category
    pub amount: f64,
}

/// Contract amount split into billing lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingSchedule {
    /// Contract amount being split
    pub contract_amount: f64,
    /// One line per billing category, in sheet order
    pub lines: Vec<BillingLine>,
}

impl BillingSchedule {
    /// Sum of all line amounts
    pub fn total(&self) -> f64 {
        self.lines.iter().map(|l| l.amount).sum()
    }
}

/// Split a contract amount over the standard billing categories
pub fn schedule(contract_amount: f64) -> BillingSchedule {
    let lines = BILLING_SECTIONS
        .iter()
        .map(|section| BillingLine {
            label: section.label.to_string(),
            percent: section.percent,
            amount: contract_amount * section.percent / 100.0,
        })
        .collect();

    BillingSchedule {
        contract_amount,
        lines,
    }
}

/// Billing schedule for a project; a missing contract amount bills nothing
pub fn schedule_for(project: &ProjectRecord) -> BillingSchedule {
    schedule(project.contract_amount.unwrap_or(0.0))
}
