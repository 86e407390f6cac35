//! firetrack - Project tracking calculations for fire-alarm contractors

use firetrack::{
    billing,
    change_order::{ChangeOrder, materials_from_csv},
    cli::{
        BillingArgs, ChangeOrderArgs, CloseoutArgs, Cli, Command, CsvArgs, InventoryArgs,
        StatsArgs, parse_date_filter,
    },
    closeout::CloseoutForm,
    data_loader::{DataLoader, load_json_document, read_csv_file},
    error::{FiretrackError, Result},
    filters::ProjectFilter,
    inventory,
    labor::LaborMatrix,
    output::{ManagerView, OutputFormatter, get_formatter},
    stats,
    types::ProjectRecord,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. --verbose overrides RUST_LOG; logs go to stderr so
    // JSON on stdout stays parseable.
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("firetrack=info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("firetrack=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let use_color = !cli.no_color && is_terminal::is_terminal(std::io::stdout());
    if !use_color {
        colored::control::set_override(false);
    }
    let formatter = get_formatter(cli.json, use_color);

    // Handle commands
    match cli.command {
        Some(Command::Stats(args)) => run_stats(cli.data, &args, formatter.as_ref())?,
        Some(Command::Managers) => {
            info!("Listing project managers");
            let projects = load_projects(cli.data)?;
            println!("{}", formatter.format_managers(&stats::managers(&projects)));
        }
        Some(Command::Csv(args)) => run_csv(&args, formatter.as_ref())?,
        Some(Command::Billing(args)) => run_billing(cli.data, &args, formatter.as_ref())?,
        Some(Command::ChangeOrder(args)) => run_change_order(&args, formatter.as_ref())?,
        Some(Command::Inventory(args)) => run_inventory(&args, formatter.as_ref())?,
        Some(Command::Closeout(args)) => run_closeout(&args, formatter.as_ref())?,
        None => run_stats(cli.data, &StatsArgs::default(), formatter.as_ref())?,
    }

    Ok(())
}

fn load_projects(data: Option<PathBuf>) -> Result<Vec<ProjectRecord>> {
    DataLoader::new(data)?.load_projects()
}

fn run_stats(
    data: Option<PathBuf>,
    args: &StatsArgs,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    info!("Running project statistics report");
    let projects = load_projects(data)?;

    // Build filter
    let mut filter = ProjectFilter::new();
    if let Some(category) = args.category {
        filter = filter.with_category(category);
    }
    if let Some(since_str) = &args.since {
        filter = filter.with_booked_since(parse_date_filter(since_str)?);
    }
    if let Some(until_str) = &args.until {
        filter = filter.with_booked_until(parse_date_filter(until_str)?);
    }

    let scoped: Vec<ProjectRecord> = if filter.is_unrestricted() {
        projects
    } else {
        filter.apply(&projects).into_iter().cloned().collect()
    };

    if args.by_manager {
        let by_manager = stats::aggregate_by_manager(&scoped);
        println!("{}", formatter.format_manager_stats(&by_manager));
        return Ok(());
    }

    let global = stats::aggregate(&scoped, None).unwrap_or_default();
    let manager_stats = args
        .pm
        .as_deref()
        .map(|pm| (pm, stats::aggregate(&scoped, Some(pm))));
    if let Some((pm, None)) = &manager_stats {
        warn!("No projects found for manager {pm}");
    }

    let view = manager_stats.as_ref().map(|(pm, stats)| ManagerView {
        manager: pm,
        stats: stats.as_ref(),
    });
    println!("{}", formatter.format_stats(&global, view));
    Ok(())
}

fn run_csv(args: &CsvArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    info!("Previewing {}", args.file.display());
    let table = read_csv_file(&args.file)?;
    println!("{}", formatter.format_csv(&table, args.limit));
    Ok(())
}

fn run_billing(
    data: Option<PathBuf>,
    args: &BillingArgs,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    if let Some(amount) = args.amount {
        println!("{}", formatter.format_billing(&billing::schedule(amount), None));
        return Ok(());
    }

    let id = args.project.as_deref().ok_or_else(|| {
        FiretrackError::InvalidArgument("either --project or --amount is required".to_string())
    })?;
    let projects = load_projects(data)?;
    let project = projects
        .iter()
        .find(|p| p.id.as_str() == id)
        .ok_or_else(|| FiretrackError::ProjectNotFound(id.to_string()))?;

    if project.contract_amount.is_none() {
        warn!("Project {id} has no contract amount; billing at $0");
    }
    let schedule = billing::schedule_for(project);
    println!(
        "{}",
        formatter.format_billing(&schedule, Some(project.display_name()))
    );
    Ok(())
}

fn run_change_order(args: &ChangeOrderArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let mut order = match &args.file {
        Some(path) => load_json_document::<ChangeOrder>(path)?,
        None => ChangeOrder::default(),
    };

    if let Some(path) = &args.materials {
        let table = read_csv_file(path)?;
        order.materials = materials_from_csv(&table);
        info!("Loaded {} material lines", order.materials.len());
    }

    if let Some(path) = &args.labor {
        let table = read_csv_file(path)?;
        let row = table.rows.first().ok_or_else(|| FiretrackError::Parse {
            file: path.clone(),
            error: "labor sheet has no data row".to_string(),
        })?;
        let matrix = LaborMatrix::from_row(row);
        for category in matrix.over_budget() {
            warn!("{category} labor is over its quoted budget");
        }
        order.internal_labor = (&matrix).into();
    }

    if let Some(margin) = args.margin {
        order.margin_percent = margin;
    }

    let pricing = order.pricing();
    println!("{}", formatter.format_change_order(&order, &pricing));
    Ok(())
}

fn run_inventory(args: &InventoryArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let table = read_csv_file(&args.file)?;
    let mut items = inventory::items_from_csv(&table);
    if let Some(project) = &args.project {
        items.retain(|item| item.project_name.as_deref() == Some(project.as_str()));
    }

    let incomplete = items
        .iter()
        .filter(|item| item.qty.is_none() || item.model_no.is_none())
        .count();
    if incomplete > 0 {
        warn!("{incomplete} inventory rows are missing a quantity or model number");
    }

    println!("{}", formatter.format_inventory(&items));
    Ok(())
}

fn run_closeout(args: &CloseoutArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let form: CloseoutForm = load_json_document(&args.file)?;
    if let Err(e) = form.parsed_inspection_date() {
        warn!("{e}");
    }
    println!("{}", formatter.format_closeout(&form));
    Ok(())
}
