use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

use spendview_core::{search, spending_by_category};
use spendview_ingest::load_statement_csv;

mod persist;
mod settings;
mod view;

#[derive(Parser, Debug)]
#[command(name = "spendview", version, about = "Bank-statement reporting utility")]
struct Cli {
    /// Statement CSV export to load
    #[arg(long, default_value = "data/operations.csv", global = true)]
    csv: PathBuf,

    /// User settings file (currencies, stocks, provider endpoints)
    #[arg(long, default_value = "spendview.toml", global = true)]
    settings: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Month-to-date summary with currency and stock enrichment
    View {
        /// Reference instant, e.g. "2021-12-31 19:00:00"
        #[arg(long)]
        date: String,
    },

    /// Spend in one category over the trailing three months
    Report {
        #[arg(long)]
        category: String,

        /// Window end date (YYYY-MM-DD); defaults to the latest date in the data
        #[arg(long)]
        date: Option<String>,

        /// Persist the report under reports/ with a generated name
        #[arg(long)]
        save: bool,

        /// Persist the report under reports/ with this file name
        #[arg(long)]
        output: Option<String>,
    },

    /// Search transactions by description or category substring
    Search {
        #[arg(long)]
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Write a default settings file
    InitSettings,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }

    if let Command::InitSettings = cli.command {
        return settings::init_settings(&cli.settings);
    }

    if !cli.csv.exists() {
        bail!("statement CSV not found: {} (pass --csv <path>)", cli.csv.display());
    }
    let table = load_statement_csv(&cli.csv)
        .with_context(|| format!("loading {}", cli.csv.display()))?;

    match cli.command {
        Command::View { date } => {
            let settings = settings::load_settings(&cli.settings)?;
            let client = reqwest::Client::new();
            let api_key = std::env::var("FMP_API_KEY").ok();
            let json =
                view::main_view(&table, &date, &settings, &client, api_key.as_deref()).await?;
            println!("{json}");
        }

        Command::Report {
            category,
            date,
            save,
            output,
        } => {
            let end = match date {
                Some(d) => Some(
                    NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                        .with_context(|| format!("invalid date '{d}', expected YYYY-MM-DD"))?
                        .and_hms_opt(0, 0, 0)
                        .context("constructing window end")?,
                ),
                None => None,
            };

            let report = spending_by_category(&table, &category, end)?;
            if report.is_unavailable() {
                eprintln!("note: statement lacks the columns this report needs");
            }
            println!("{}", serde_json::to_string_pretty(&report)?);

            if save || output.is_some() {
                let path = persist::save_report(
                    std::path::Path::new("reports"),
                    "spending_by_category",
                    output.as_deref(),
                    &report,
                )?;
                println!("saved: {}", path.display());
            }
        }

        Command::Search { query, limit } => {
            let response = search(&query, &table.rows, Some(limit));
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Command::InitSettings => unreachable!("handled before loading the table"),
    }

    Ok(())
}
