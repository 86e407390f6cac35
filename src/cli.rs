//! CLI interface for firetrack
//!
//! This module defines the command-line interface using clap. Each report
//! is a subcommand; output format and data location are global flags.
//!
//! # Example
//!
//! ```bash
//! # Company-wide statistics next to one manager's
//! firetrack stats --pm "Alice Smith"
//!
//! # Preview a supplier sheet before importing it
//! firetrack csv materials.csv --limit 20
//!
//! # Price a change order with materials from a CSV export
//! firetrack change-order co.json --materials materials.csv --margin 15 --json
//! ```

use crate::error::{FiretrackError, Result};
use crate::types::ProjectCategory;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Project tracking calculations for fire-alarm contractors
#[derive(Parser, Debug, Clone)]
#[command(name = "firetrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Project export (JSON or CSV); discovered automatically when omitted
    #[arg(long, global = true, env = "FIRETRACK_DATA_PATH")]
    pub data: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Arguments for the statistics report
#[derive(Args, Debug, Clone, Default)]
pub struct StatsArgs {
    /// Show statistics for this project manager next to the global view
    #[arg(long)]
    pub pm: Option<String>,

    /// Show one row per project manager
    #[arg(long, conflicts_with = "pm")]
    pub by_manager: bool,

    /// Only include projects of this category (prime or retrofit)
    #[arg(long, value_parser = parse_category)]
    pub category: Option<ProjectCategory>,

    /// Only include projects booked on or after this date (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    pub since: Option<String>,

    /// Only include projects booked on or before this date (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    pub until: Option<String>,
}

/// Arguments for the CSV preview
#[derive(Args, Debug, Clone)]
pub struct CsvArgs {
    /// CSV file to preview
    pub file: PathBuf,

    /// Maximum number of rows to show
    #[arg(long, short = 'n', default_value = "25")]
    pub limit: usize,
}

/// Arguments for the billing schedule
#[derive(Args, Debug, Clone)]
pub struct BillingArgs {
    /// Project id from the project export
    #[arg(long, required_unless_present = "amount")]
    pub project: Option<String>,

    /// Contract amount in USD, instead of a project lookup
    #[arg(long, conflicts_with = "project")]
    pub amount: Option<f64>,
}

/// Arguments for change order pricing
#[derive(Args, Debug, Clone)]
pub struct ChangeOrderArgs {
    /// Change order document (JSON); omit to price from flags alone
    pub file: Option<PathBuf>,

    /// Replace the material list with a `Qty, Description, Unit Price` sheet
    #[arg(long)]
    pub materials: Option<PathBuf>,

    /// Take internal labor from the quoted column of a labor matrix sheet
    #[arg(long)]
    pub labor: Option<PathBuf>,

    /// Override the margin percentage
    #[arg(long)]
    pub margin: Option<f64>,
}

/// Arguments for the inventory import preview
#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    /// Stock sheet with `Qty, Model No., Description, Project Name, Price` columns
    pub file: PathBuf,

    /// Only show items allocated to this project name
    #[arg(long)]
    pub project: Option<String>,
}

/// Arguments for the closeout summary
#[derive(Args, Debug, Clone)]
pub struct CloseoutArgs {
    /// Closeout form document (JSON)
    pub file: PathBuf,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Project statistics: count, contract value, margin improvement, durations
    Stats(StatsArgs),

    /// List project managers found in the project export
    Managers,

    /// Preview a CSV file as headers and rows
    Csv(CsvArgs),

    /// Split a contract amount into the billing schedule
    Billing(BillingArgs),

    /// Price a change order
    ChangeOrder(ChangeOrderArgs),

    /// Preview an inventory sheet import
    Inventory(InventoryArgs),

    /// Summarize a closeout inspection form
    Closeout(CloseoutArgs),
}

fn parse_category(s: &str) -> std::result::Result<ProjectCategory, String> {
    s.parse()
}

/// Parse a date filter argument
///
/// Accepts `YYYY-MM-DD`, or `YYYY-MM` meaning the first day of that month.
pub fn parse_date_filter(date_str: &str) -> Result<chrono::NaiveDate> {
    // Try YYYY-MM-DD format first
    if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    // Try YYYY-MM format (convert to first day of month)
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() == 2 {
        let year = parts[0]
            .parse::<i32>()
            .map_err(|_| FiretrackError::InvalidDate(format!("Invalid year in '{date_str}'")))?;
        let month = parts[1]
            .parse::<u32>()
            .map_err(|_| FiretrackError::InvalidDate(format!("Invalid month in '{date_str}'")))?;

        if !(1..=12).contains(&month) {
            return Err(FiretrackError::InvalidDate(format!(
                "Month must be between 1-12, got {month}"
            )));
        }

        chrono::NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| FiretrackError::InvalidDate(format!("Invalid date: {date_str}")))
    } else {
        Err(FiretrackError::InvalidDate(format!(
            "Invalid date format: {date_str}. Use YYYY-MM-DD or YYYY-MM"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["firetrack", "--json"]);
        assert!(cli.json);
        assert!(cli.command.is_none());

        let cli = Cli::parse_from(["firetrack", "stats", "--pm", "Alice", "--category", "Retrofit"]);
        match &cli.command {
            Some(Command::Stats(args)) => {
                assert_eq!(args.pm.as_deref(), Some("Alice"));
                assert_eq!(args.category, Some(ProjectCategory::Retrofit));
            }
            _ => panic!("Expected Stats command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["firetrack", "managers", "--data", "export.json", "-v"]);
        assert!(matches!(cli.command, Some(Command::Managers)));
        assert_eq!(cli.data, Some(PathBuf::from("export.json")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_pm_conflicts_with_by_manager() {
        let result = Cli::try_parse_from(["firetrack", "stats", "--pm", "Alice", "--by-manager"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_billing_requires_project_or_amount() {
        assert!(Cli::try_parse_from(["firetrack", "billing"]).is_err());
        let cli = Cli::parse_from(["firetrack", "billing", "--amount", "125000"]);
        match &cli.command {
            Some(Command::Billing(args)) => assert_eq!(args.amount, Some(125000.0)),
            _ => panic!("Expected Billing command"),
        }
    }

    #[test]
    fn test_csv_default_limit() {
        let cli = Cli::parse_from(["firetrack", "csv", "sheet.csv"]);
        match &cli.command {
            Some(Command::Csv(args)) => {
                assert_eq!(args.file, PathBuf::from("sheet.csv"));
                assert_eq!(args.limit, 25);
            }
            _ => panic!("Expected Csv command"),
        }
    }

    #[test]
    fn test_change_order_without_document() {
        let cli = Cli::parse_from([
            "firetrack",
            "change-order",
            "--materials",
            "parts.csv",
            "--margin",
            "12.5",
        ]);
        match &cli.command {
            Some(Command::ChangeOrder(args)) => {
                assert!(args.file.is_none());
                assert_eq!(args.materials, Some(PathBuf::from("parts.csv")));
                assert_eq!(args.margin, Some(12.5));
            }
            _ => panic!("Expected ChangeOrder command"),
        }
    }

    #[test]
    fn test_parse_date_filter() {
        let date = parse_date_filter("2024-03-15").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 15));

        let date = parse_date_filter("2024-03").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 1));

        assert!(parse_date_filter("2024-13").is_err());
        assert!(parse_date_filter("March 2024").is_err());
    }
}
