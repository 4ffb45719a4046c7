//! Finsight CLI - Business financial analytics in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{breakdown, config, export, insights, list, summary};

/// Finsight - analytics over your business's financial activities
#[derive(Parser)]
#[command(name = "finsight", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the analytics summary (totals, breakdowns, monthly trend)
    Summary {
        /// Activities JSON file ("-" for stdin; the configured API if omitted)
        file: Option<PathBuf>,
        /// Date treated as "today" (YYYY-MM-DD)
        #[arg(long)]
        reference_date: Option<String>,
        /// Sort the monthly series by calendar month
        #[arg(long)]
        chronological: bool,
        /// Only count the current month of the current year
        #[arg(long)]
        same_year: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List activities with filters
    List {
        /// Activities JSON file ("-" for stdin; the configured API if omitted)
        file: Option<PathBuf>,
        /// Search reference number, client and description
        #[arg(long, short)]
        search: Option<String>,
        /// Activity type (income, expense, receivable, payable, invoice, quotation)
        #[arg(long = "type")]
        activity_type: Option<String>,
        /// Activity status (pending, approved, paid, rejected, cancelled, overdue)
        #[arg(long)]
        status: Option<String>,
        /// Exact client name
        #[arg(long)]
        client: Option<String>,
        /// Earliest transaction date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Latest transaction date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Sort field (date, amount, status, type, client)
        #[arg(long, default_value = "date")]
        sort: String,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
        /// Output format
        #[arg(long, default_value = "table")]
        format: String,
        /// Output as JSON (shorthand for --format json)
        #[arg(long)]
        json: bool,
    },

    /// Count and total activities by type and status
    Breakdown {
        /// Activities JSON file ("-" for stdin; the configured API if omitted)
        file: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show dashboard insights and the cash-flow trend
    Insights {
        /// Activities JSON file ("-" for stdin; the configured API if omitted)
        file: Option<PathBuf>,
        /// Date treated as "today" (YYYY-MM-DD)
        #[arg(long)]
        reference_date: Option<String>,
        /// Number of months in the cash-flow trend
        #[arg(long)]
        months: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export activities to CSV
    Export {
        /// Activities JSON file ("-" for stdin; the configured API if omitted)
        file: Option<PathBuf>,
        /// Destination CSV file
        #[arg(long, short)]
        output: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Summary { file, reference_date, chronological, same_year, json } => {
            summary::run(file.as_deref(), reference_date.as_deref(), chronological, same_year, json)
        }
        Commands::List { file, search, activity_type, status, client, from, to, sort, asc, format, json } => {
            let fmt = if json { "json".to_string() } else { format };
            let filters = list::ListFilters {
                search,
                activity_type,
                status,
                client,
                from,
                to,
                sort,
                ascending: asc,
            };
            list::run(file.as_deref(), filters, &fmt)
        }
        Commands::Breakdown { file, json } => breakdown::run(file.as_deref(), json),
        Commands::Insights { file, reference_date, months, json } => {
            insights::run(file.as_deref(), reference_date.as_deref(), months, json)
        }
        Commands::Export { file, output, json } => export::run(file.as_deref(), &output, json),
        Commands::Config { command } => config::run(command),
    }
}
