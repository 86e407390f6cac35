//! Core types, traits, and utilities for firetrack
//!
//! This crate provides the domain types, error handling, the CSV ingest
//! parser, project statistics and the office calculations (billing split,
//! change orders, labor matrix, inventory import, closeout forms) used by
//! the other firetrack crates.

pub mod billing;
pub mod change_order;
pub mod closeout;
pub mod csv;
pub mod error;
pub mod filters;
pub mod inventory;
pub mod labor;
pub mod numeric;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use csv::{CsvRow, CsvTable};
pub use error::{FiretrackError, Result};
pub use stats::ProjectStats;
pub use types::{ManagerName, ProjectCategory, ProjectId, ProjectRecord};
