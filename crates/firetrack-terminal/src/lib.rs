//! Terminal output formatting for firetrack
//!
//! Provides the table and JSON renderings of project statistics, CSV
//! previews, billing schedules, change orders, inventory imports and
//! closeout forms.

pub mod output;

pub use output::{JsonFormatter, OutputFormatter, TableFormatter, get_formatter};
