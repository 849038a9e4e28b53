use chrono::Local;
use clap::Args;
use serde_json::Value;

use rentaloc_core::profitability;
use rentaloc_core::report;

use super::{resolve_input, InputArgs};
use crate::storage::DataDir;

/// Arguments for the investment report
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Title of the report (defaults to the saved project's name)
    #[arg(long)]
    pub project_name: Option<String>,
}

pub fn run_report(args: ReportArgs, data: &DataDir) -> Result<Value, Box<dyn std::error::Error>> {
    let resolved = resolve_input(&args.source, data)?;
    let name = args.project_name.or(resolved.project_name);

    let output = profitability::compute(&resolved.input);
    let built = report::build_report(
        name.as_deref(),
        &resolved.input,
        &output,
        Local::now().date_naive(),
    );
    Ok(serde_json::to_value(built)?)
}
