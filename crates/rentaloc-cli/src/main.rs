mod commands;
mod input;
mod output;
mod storage;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;

use commands::profile::ProfileArgs;
use commands::profitability::ProfitabilityArgs;
use commands::project::ProjectArgs;
use commands::quick::QuickArgs;
use commands::report::ReportArgs;
use commands::schedule::ScheduleArgs;
use storage::DataDir;

/// Rental investment profitability and loan amortization
#[derive(Parser)]
#[command(
    name = "rentaloc",
    version,
    about = "Rental investment profitability and loan amortization",
    long_about = "A CLI for evaluating buy-to-let investments with decimal precision. \
                  Computes gross, net and net-net yields, cashflow before and after \
                  French income tax (micro or réel, bare or furnished), cash-on-cash \
                  return and yearly loan amortization tables."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Directory holding the saved profile and projects
    #[arg(long, env = "RENTALOC_DATA_DIR", default_value = ".rentaloc", global = true)]
    data_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute yields, cashflow and tax for a rental investment
    Profitability(ProfitabilityArgs),
    /// Print the yearly amortization table of a loan
    Schedule(ScheduleArgs),
    /// Gross yield from purchase price and monthly rent only
    Quick(QuickArgs),
    /// Build an investment report with hypotheses, key results and loan table
    Report(ReportArgs),
    /// Show or edit the investor profile
    Profile(ProfileArgs),
    /// Manage saved projects
    Project(ProjectArgs),
    /// Show version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let data = DataDir::new(cli.data_dir);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Profitability(args) => commands::profitability::run_profitability(args, &data),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Quick(args) => commands::quick::run_quick(args),
        Commands::Report(args) => commands::report::run_report(args, &data),
        Commands::Profile(args) => commands::profile::run_profile(args, &data),
        Commands::Project(args) => commands::project::run_project(args, &data),
        Commands::Version => {
            println!("rentaloc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
