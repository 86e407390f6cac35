//! Labor matrix: quoted, estimated and actual cost per labor category
//!
//! Each labor category carries one [`LaborLineItem`]. Spreadsheet exports
//! flatten the matrix into columns such as `design_quoted` or
//! `tech_actual`; [`LaborMatrix::from_row`] reads that layout back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};

use crate::csv::CsvRow;
use crate::numeric::leading_float;

/// Labor category on a fire-alarm job
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaborCategory {
    Design,
    Cad,
    #[serde(rename = "pm")]
    ProjectManagement,
    Prep,
    Tech,
    Install,
}

impl LaborCategory {
    /// Every category, in quoting order
    pub const ALL: [LaborCategory; 6] = [
        Self::Design,
        Self::Cad,
        Self::ProjectManagement,
        Self::Prep,
        Self::Tech,
        Self::Install,
    ];

    /// Column prefix used in flattened exports
    pub fn key(&self) -> &'static str {
        match self {
            Self::Design => "design",
            Self::Cad => "cad",
            Self::ProjectManagement => "pm",
            Self::Prep => "prep",
            Self::Tech => "tech",
            Self::Install => "install",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Design => "Design",
            Self::Cad => "CAD",
            Self::ProjectManagement => "Project Management",
            Self::Prep => "Prep",
            Self::Tech => "Tech",
            Self::Install => "Install",
        }
    }
}

impl fmt::Display for LaborCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cost of one labor category at three stages of a job
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaborLineItem {
    /// Amount quoted to the customer
    #[serde(default)]
    pub quoted: f64,
    /// Internal estimate
    #[serde(default)]
    pub estimated: f64,
    /// Amount actually spent
    #[serde(default)]
    pub actual: f64,
}

impl LaborLineItem {
    pub fn new(quoted: f64, estimated: f64, actual: f64) -> Self {
        Self {
            quoted,
            estimated,
            actual,
        }
    }

    /// Actual minus quoted; positive means the quote was exceeded
    pub fn variance(&self) -> f64 {
        self.actual - self.quoted
    }

    pub fn is_over_budget(&self) -> bool {
        self.actual > self.quoted
    }
}

impl Add for LaborLineItem {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            quoted: self.quoted + other.quoted,
            estimated: self.estimated + other.estimated,
            actual: self.actual + other.actual,
        }
    }
}

impl AddAssign for LaborLineItem {
    fn add_assign(&mut self, other: Self) {
        self.quoted += other.quoted;
        self.estimated += other.estimated;
        self.actual += other.actual;
    }
}

/// One line item per labor category
///
/// Categories that were never set read as an all-zero line item.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaborMatrix(BTreeMap<LaborCategory, LaborLineItem>);

impl LaborMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, category: LaborCategory, item: LaborLineItem) -> Self {
        self.set(category, item);
        self
    }

    pub fn set(&mut self, category: LaborCategory, item: LaborLineItem) {
        self.0.insert(category, item);
    }

    pub fn get(&self, category: LaborCategory) -> LaborLineItem {
        self.0.get(&category).copied().unwrap_or_default()
    }

    /// Line items for every category in quoting order
    pub fn items(&self) -> impl Iterator<Item = (LaborCategory, LaborLineItem)> + '_ {
        LaborCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Column sums across all categories
    pub fn totals(&self) -> LaborLineItem {
        self.0.values().copied().fold(LaborLineItem::default(), |acc, item| acc + item)
    }

    /// Categories whose actual cost exceeds the quote
    pub fn over_budget(&self) -> Vec<LaborCategory> {
        self.items()
            .filter(|(_, item)| item.is_over_budget())
            .map(|(category, _)| category)
            .collect()
    }

    /// Read a flattened row with `<category>_quoted`, `<category>_estimated`
    /// and `<category>_actual` columns; blank or unreadable cells are zero
    pub fn from_row(row: &CsvRow) -> Self {
        let cell = |category: LaborCategory, stage: &str| {
            leading_float(row.get(&format!("{}_{stage}", category.key()))).unwrap_or(0.0)
        };

        let mut matrix = Self::new();
        for category in LaborCategory::ALL {
            let item = LaborLineItem::new(
                cell(category, "quoted"),
                cell(category, "estimated"),
                cell(category, "actual"),
            );
            if item != LaborLineItem::default() {
                matrix.set(category, item);
            }
        }
        matrix
    }
}
