//! Output formatting module for firetrack
//!
//! This module provides formatters for displaying results in different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```
//! use firetrack_core::stats::aggregate;
//! use firetrack_terminal::output::get_formatter;
//!
//! let global = aggregate(&[], None).unwrap();
//!
//! let formatter = get_formatter(false, false);
//! println!("{}", formatter.format_stats(&global, None));
//!
//! let json_formatter = get_formatter(true, false);
//! println!("{}", json_formatter.format_stats(&global, None));
//! ```

use colored::Colorize;
use firetrack_core::billing::BillingSchedule;
use firetrack_core::change_order::{ChangeOrder, ChangeOrderPricing};
use firetrack_core::closeout::CloseoutForm;
use firetrack_core::csv::CsvTable;
use firetrack_core::inventory::{InventoryItem, total_value};
use firetrack_core::stats::{ManagerStats, ProjectStats};
use firetrack_core::types::ManagerName;
use prettytable::{Cell, Row, Table, format, row};
use serde_json::json;

/// Statistics for the selected manager, if one was selected
///
/// `stats` is `None` when the manager has no projects.
#[derive(Debug, Clone, Copy)]
pub struct ManagerView<'a> {
    pub manager: &'a str,
    pub stats: Option<&'a ProjectStats>,
}

/// Trait for output formatters
///
/// Implementations render each report of the CLI in one output format.
pub trait OutputFormatter {
    /// Global statistics, optionally next to one manager's statistics
    fn format_stats(&self, global: &ProjectStats, manager: Option<ManagerView<'_>>) -> String;

    /// Statistics for every manager
    fn format_manager_stats(&self, data: &[ManagerStats]) -> String;

    /// Distinct manager names
    fn format_managers(&self, managers: &[ManagerName]) -> String;

    /// Headers and the first `limit` rows of a CSV document
    fn format_csv(&self, table: &CsvTable, limit: usize) -> String;

    /// Billing schedule for a project
    fn format_billing(&self, schedule: &BillingSchedule, project_name: Option<&str>) -> String;

    /// Priced change order
    fn format_change_order(&self, order: &ChangeOrder, pricing: &ChangeOrderPricing) -> String;

    /// Inventory import preview
    fn format_inventory(&self, items: &[InventoryItem]) -> String;

    /// Closeout checklist summary
    fn format_closeout(&self, form: &CloseoutForm) -> String;
}

/// Table formatter for human-readable output
///
/// Produces ASCII tables suitable for terminal display. Currency is shown
/// with a dollar sign and thousands separators.
pub struct TableFormatter {
    /// Whether to color pass/fail and negative values
    pub use_color: bool,
}

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Format a number with thousands separators
    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    /// Format currency as `$1,234.56`
    fn format_currency(amount: f64) -> String {
        let cents = (amount.abs() * 100.0).round() as u64;
        let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
        format!(
            "{sign}${}.{:02}",
            Self::format_number(cents / 100),
            cents % 100
        )
    }

    /// Format percentage points with an explicit sign
    fn format_points(&self, value: f64) -> String {
        let text = format!("{value:+.2} pts");
        if !self.use_color {
            text
        } else if value < 0.0 {
            text.red().to_string()
        } else {
            text.green().to_string()
        }
    }

    fn format_days(value: f64) -> String {
        format!("{value:.1} days")
    }

    fn format_pass(&self, passed: bool) -> String {
        let text = if passed { "PASS" } else { "OPEN" };
        match (self.use_color, passed) {
            (false, _) => text.to_string(),
            (true, true) => text.green().bold().to_string(),
            (true, false) => text.yellow().bold().to_string(),
        }
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table
    }

    /// Metric rows shared by the stats and per-manager reports
    fn stats_cells(&self, stats: &ProjectStats) -> [String; 8] {
        [
            Self::format_number(stats.total_projects as u64),
            Self::format_currency(stats.total_contract_amount),
            self.format_points(stats.avg_margin_improvement),
            self.format_points(stats.median_margin_improvement),
            Self::format_days(stats.avg_prime_duration),
            Self::format_days(stats.median_prime_duration),
            Self::format_days(stats.avg_retrofit_duration),
            Self::format_days(stats.median_retrofit_duration),
        ]
    }
}

const STAT_LABELS: [&str; 8] = [
    "Projects",
    "Contract Value",
    "Avg Margin Improvement",
    "Median Margin Improvement",
    "Avg Prime Duration",
    "Median Prime Duration",
    "Avg Retrofit Duration",
    "Median Retrofit Duration",
];

impl OutputFormatter for TableFormatter {
    fn format_stats(&self, global: &ProjectStats, manager: Option<ManagerView<'_>>) -> String {
        let mut table = Self::new_table();
        let global_cells = self.stats_cells(global);

        match manager {
            None => {
                table.set_titles(row![b -> "Metric", b -> "All Projects"]);
                for (label, value) in STAT_LABELS.iter().zip(global_cells) {
                    table.add_row(row![label, r -> value]);
                }
            }
            Some(view) => {
                table.set_titles(row![b -> "Metric", b -> view.manager, b -> "All Projects"]);
                let manager_cells = view
                    .stats
                    .map(|s| self.stats_cells(s))
                    .unwrap_or_else(|| std::array::from_fn(|_| "-".to_string()));
                for ((label, mine), all) in STAT_LABELS.iter().zip(manager_cells).zip(global_cells)
                {
                    table.add_row(row![label, r -> mine, r -> all]);
                }
            }
        }

        let mut output = table.to_string();
        if let Some(ManagerView {
            manager,
            stats: None,
        }) = manager
        {
            output.push_str(&format!("\nNo projects found for {manager}\n"));
        }
        output
    }

    fn format_manager_stats(&self, data: &[ManagerStats]) -> String {
        let mut table = Self::new_table();

        table.set_titles(row![
            b -> "Manager",
            b -> "Projects",
            b -> "Contract Value",
            b -> "Avg Margin",
            b -> "Median Margin",
            b -> "Avg Prime",
            b -> "Median Prime",
            b -> "Avg Retrofit",
            b -> "Median Retrofit"
        ]);

        for entry in data {
            let [projects, value, avg_m, med_m, avg_p, med_p, avg_r, med_r] =
                self.stats_cells(&entry.stats);
            table.add_row(row![
                entry.manager,
                r -> projects,
                r -> value,
                r -> avg_m,
                r -> med_m,
                r -> avg_p,
                r -> med_p,
                r -> avg_r,
                r -> med_r
            ]);
        }

        table.to_string()
    }

    fn format_managers(&self, managers: &[ManagerName]) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![b -> "Project Manager"]);
        for manager in managers {
            table.add_row(row![manager]);
        }
        table.to_string()
    }

    fn format_csv(&self, data: &CsvTable, limit: usize) -> String {
        if data.headers.is_empty() {
            return "No CSV data\n".to_string();
        }

        let mut table = Self::new_table();
        table.set_titles(Row::new(
            data.headers.iter().map(|h| Cell::new(h).style_spec("b")).collect(),
        ));

        for row in data.preview(limit) {
            table.add_row(Row::new(data.ordered_values(row).map(Cell::new).collect()));
        }

        let mut output = table.to_string();
        if data.len() > limit {
            output.push_str(&format!(
                "\n... {} more rows ({} total)\n",
                data.len() - limit,
                data.len()
            ));
        }
        output
    }

    fn format_billing(&self, schedule: &BillingSchedule, project_name: Option<&str>) -> String {
        let mut output = String::new();
        if let Some(name) = project_name {
            output.push_str(&format!("Project: {name}\n"));
        }
        output.push_str(&format!(
            "Contract Amount: {}\n\n",
            Self::format_currency(schedule.contract_amount)
        ));

        let mut table = Self::new_table();
        table.set_titles(row![b -> "Billing Category", b -> "Percentage", b -> "Amount"]);

        for line in &schedule.lines {
            table.add_row(row![
                line.label,
                c -> format!("{}%", line.percent),
                r -> Self::format_currency(line.amount)
            ]);
        }

        table.add_row(Row::new(vec![Cell::new(""); 3]));
        table.add_row(row![
            b -> "TOTAL",
            "",
            b -> Self::format_currency(schedule.total())
        ]);

        output.push_str(&table.to_string());
        output
    }

    fn format_change_order(&self, order: &ChangeOrder, pricing: &ChangeOrderPricing) -> String {
        let mut output = format!("CHANGE ORDER {}\n", order.display_number());
        if !order.customer.customer_name.is_empty() {
            output.push_str(&format!("Customer: {}\n", order.customer.customer_name));
        }
        output.push('\n');

        if !order.materials.is_empty() {
            let mut materials = Self::new_table();
            materials.set_titles(row![b -> "Qty", b -> "Description", b -> "Unit Price", b -> "Total"]);
            for line in &order.materials {
                materials.add_row(row![
                    r -> line.qty,
                    line.description,
                    r -> Self::format_currency(line.unit_price),
                    r -> Self::format_currency(line.extended())
                ]);
            }
            output.push_str(&materials.to_string());
            output.push('\n');
        }

        let mut summary = Self::new_table();
        summary.set_titles(row![b -> "Section", b -> "Amount"]);
        summary.add_row(row!["Materials", r -> Self::format_currency(pricing.materials_total)]);
        summary.add_row(row![
            "Internal Labor",
            r -> Self::format_currency(pricing.internal_labor_total)
        ]);
        summary.add_row(row![
            "Subcontractor",
            r -> Self::format_currency(pricing.subcontractor_total)
        ]);
        summary.add_row(row![b -> "Subtotal", r -> Self::format_currency(pricing.subtotal)]);
        if pricing.margin_percent > 0.0 {
            summary.add_row(row![
                format!("Margin ({}%)", pricing.margin_percent),
                r -> Self::format_currency(pricing.margin_amount)
            ]);
        }
        summary.add_row(row![b -> "FINAL PRICE", rb -> Self::format_currency(pricing.final_price)]);

        output.push_str(&summary.to_string());
        output
    }

    fn format_inventory(&self, items: &[InventoryItem]) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "Qty",
            b -> "Model No.",
            b -> "Description",
            b -> "Project",
            b -> "Price"
        ]);

        let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();

        for item in items {
            table.add_row(row![
                r -> item.qty.map(|q| q.to_string()).unwrap_or_else(|| "-".to_string()),
                or_dash(item.model_no.as_deref()),
                or_dash(item.description.as_deref()),
                or_dash(item.project_name.as_deref()),
                r -> item.price.map(Self::format_currency).unwrap_or_else(|| "-".to_string())
            ]);
        }

        format!(
            "{}\n{} items, stock value {}\n",
            table,
            items.len(),
            Self::format_currency(total_value(items))
        )
    }

    fn format_closeout(&self, form: &CloseoutForm) -> String {
        let mut output = String::from("Fire Alarm System Inspection\n");
        let date = if form.inspection_date.is_empty() {
            "-"
        } else {
            form.inspection_date.as_str()
        };
        let inspector = if form.inspector_name.is_empty() {
            "-"
        } else {
            form.inspector_name.as_str()
        };
        output.push_str(&format!("Date: {date}  Inspector: {inspector}\n\n"));

        let mut table = Self::new_table();
        table.set_titles(row![b -> "Checklist Item", b -> "Status"]);
        for (label, passed) in form.checklist() {
            table.add_row(row![label, c -> self.format_pass(passed)]);
        }
        output.push_str(&table.to_string());

        output.push_str(&format!(
            "\n{}/{} items passed - {}\n",
            form.passed_count(),
            form.checklist().len(),
            if form.is_complete() {
                "ready for closeout"
            } else {
                "incomplete"
            }
        ));
        if !form.notes.is_empty() {
            output.push_str(&format!("Notes: {}\n", form.notes));
        }
        output
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_stats(&self, global: &ProjectStats, manager: Option<ManagerView<'_>>) -> String {
        let mut output = json!({ "global": global });
        if let Some(view) = manager {
            output["manager"] = json!(view.manager);
            output["managerStats"] = json!(view.stats);
        }
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_manager_stats(&self, data: &[ManagerStats]) -> String {
        let output = json!({ "managers": data });
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_managers(&self, managers: &[ManagerName]) -> String {
        let output = json!({ "managers": managers });
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_csv(&self, table: &CsvTable, limit: usize) -> String {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = table
            .preview(limit)
            .iter()
            .map(|row| {
                table
                    .headers
                    .iter()
                    .map(|h| (h.clone(), json!(row.get(h))))
                    .collect()
            })
            .collect();

        let output = json!({
            "headers": table.headers,
            "rows": rows,
            "totalRows": table.len(),
        });
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_billing(&self, schedule: &BillingSchedule, project_name: Option<&str>) -> String {
        let output = json!({
            "project": project_name,
            "contractAmount": schedule.contract_amount,
            "lines": schedule.lines,
            "total": schedule.total(),
        });
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_change_order(&self, order: &ChangeOrder, pricing: &ChangeOrderPricing) -> String {
        let output = json!({
            "changeOrder": order.display_number(),
            "customer": order.customer,
            "materials": order.materials,
            "pricing": pricing,
        });
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_inventory(&self, items: &[InventoryItem]) -> String {
        let output = json!({
            "items": items,
            "count": items.len(),
            "totalValue": total_value(items),
        });
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_closeout(&self, form: &CloseoutForm) -> String {
        let output = json!({
            "form": form,
            "passed": form.passed_count(),
            "outstanding": form.outstanding(),
            "complete": form.is_complete(),
        });
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Get the appropriate formatter based on output preference
pub fn get_formatter(json: bool, use_color: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(use_color))
    }
}
