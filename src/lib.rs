//! firetrack - Project tracking calculations for fire-alarm contractors
//!
//! This library provides functionality to:
//! - Parse spreadsheet CSV exports into header-keyed rows
//! - Compute company-wide and per-manager project statistics
//! - Split contract amounts into the standard billing schedule
//! - Price change orders and import inventory sheets
//! - Render every report as a table or as JSON
//!
//! # Examples
//!
//! ```no_run
//! use firetrack::{data_loader::DataLoader, stats};
//!
//! fn main() -> firetrack::Result<()> {
//!     let loader = DataLoader::new(None)?;
//!     let projects = loader.load_projects()?;
//!
//!     if let Some(global) = stats::aggregate(&projects, None) {
//!         println!("{} projects, ${:.2} booked", global.total_projects, global.total_contract_amount);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod data_loader;

// Domain modules live in the workspace crates
pub use firetrack_core::{
    billing, change_order, closeout, csv, error, filters, inventory, labor, numeric, stats, types,
};
pub use firetrack_terminal::output;

// Re-export commonly used types
pub use error::{FiretrackError, Result};
pub use types::{ManagerName, ProjectCategory, ProjectId, ProjectRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
