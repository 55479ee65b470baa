//! wayfare report CLI
//!
//! Loads a search-log CSV once, derives the dataset, and prints conversion
//! tables. Table output only; charts belong to other frontends.

use clap::{Parser, Subcommand};
use comfy_table::Table;

use wayfare_core::Dataset;
use wayfare_stats::{
    aggregate_by_name, crosstab_by_name, mobile_growth_percent, monthly_summary, GroupKey,
    KeyError, Overview, MIN_RANK_SEARCHES,
};

#[derive(Parser)]
#[command(name = "wayfare", version, about = "Travel search-log conversion reports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Headline metrics for the whole log
    Overview {
        /// Path to the search-log CSV
        file: String,
    },

    /// Conversion rates grouped by one key
    Group {
        /// Path to the search-log CSV
        file: String,

        /// Grouping key, e.g. device_package or travel_group
        key: String,

        /// Show only the N best-converting groups
        #[arg(long)]
        top: Option<usize>,

        /// Minimum searches a group needs to be ranked
        #[arg(long, default_value_t = MIN_RANK_SEARCHES)]
        min_searches: u64,
    },

    /// Monthly search volume, conversion rate, and mobile share
    Monthly {
        /// Path to the search-log CSV
        file: String,
    },

    /// Conversion-rate matrix over two keys
    Crosstab {
        /// Path to the search-log CSV
        file: String,

        /// Key spanning the rows
        row_key: String,

        /// Key spanning the columns
        col_key: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Overview { file } => {
            let dataset = load(&file)?;
            print_overview(&dataset);
        }
        Command::Group {
            file,
            key,
            top,
            min_searches,
        } => {
            let dataset = load(&file)?;
            print_group(&dataset, &key, top, min_searches)?;
        }
        Command::Monthly { file } => {
            let dataset = load(&file)?;
            print_monthly(&dataset);
        }
        Command::Crosstab {
            file,
            row_key,
            col_key,
        } => {
            let dataset = load(&file)?;
            print_crosstab(&dataset, &row_key, &col_key)?;
        }
    }

    Ok(())
}

fn load(file: &str) -> Result<Dataset, Box<dyn std::error::Error>> {
    let records = wayfare_io::load_path(file)?;
    Ok(Dataset::derive(records))
}

fn key_hint(err: KeyError) -> Box<dyn std::error::Error> {
    let names: Vec<&str> = GroupKey::ALL.iter().map(|k| k.name()).collect();
    eprintln!("Supported keys: {}", names.join(", "));
    Box::new(err)
}

fn print_overview(dataset: &Dataset) {
    let overview = Overview::of(dataset);

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Total searches".to_string(),
        overview.total_searches.to_string(),
    ]);
    table.add_row(vec![
        "Total bookings".to_string(),
        overview.total_bookings.to_string(),
    ]);
    table.add_row(vec![
        "Conversion rate".to_string(),
        format!("{:.2}%", overview.conversion_rate),
    ]);
    table.add_row(vec![
        "Mobile share".to_string(),
        format!("{:.2}%", overview.mobile_share_percent),
    ]);
    println!("{table}");
}

fn print_group(
    dataset: &Dataset,
    key: &str,
    top: Option<usize>,
    min_searches: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = aggregate_by_name(dataset, key).map_err(key_hint)?;

    let groups = match top {
        Some(n) => summary.top_by_conversion(n, min_searches),
        None => summary.groups,
    };

    let mut table = Table::new();
    table.set_header(vec![key, "Searches", "Bookings", "Conversion"]);
    for group in &groups {
        table.add_row(vec![
            group.group.clone(),
            group.searches.to_string(),
            group.bookings.to_string(),
            format!("{:.2}%", group.conversion_rate),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn print_monthly(dataset: &Dataset) {
    let rows = monthly_summary(dataset);

    let mut table = Table::new();
    table.set_header(vec![
        "Month",
        "Searches",
        "Bookings",
        "Conversion",
        "Mobile share",
    ]);
    for row in &rows {
        table.add_row(vec![
            row.year_month.clone(),
            row.searches.to_string(),
            row.bookings.to_string(),
            format!("{:.2}%", row.conversion_rate),
            format!("{:.2}%", row.mobile_percentage),
        ]);
    }
    println!("{table}");

    if let Some(growth) = mobile_growth_percent(&rows) {
        println!("Mobile share growth over the period: {growth:+.1}%");
    }
}

fn print_crosstab(
    dataset: &Dataset,
    row_key: &str,
    col_key: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let tab = crosstab_by_name(dataset, row_key, col_key).map_err(key_hint)?;

    let mut header = vec![format!("{} \\ {}", tab.row_key, tab.col_key)];
    header.extend(tab.col_labels.iter().cloned());

    let mut table = Table::new();
    table.set_header(header);
    for (label, cells) in tab.row_labels.iter().zip(&tab.cells) {
        let mut row = vec![label.clone()];
        row.extend(cells.iter().map(|cell| match cell {
            Some(rate) => format!("{rate:.2}%"),
            None => "-".to_string(),
        }));
        table.add_row(row);
    }
    println!("{table}");
    Ok(())
}
