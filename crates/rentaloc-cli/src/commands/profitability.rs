use clap::Args;
use serde_json::Value;

use rentaloc_core::profitability;

use super::{resolve_input, InputArgs};
use crate::storage::DataDir;

/// Arguments for the rental profitability calculation
#[derive(Args)]
pub struct ProfitabilityArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Reject negative amounts and out-of-range rates instead of computing
    #[arg(long)]
    pub strict: bool,
}

pub fn run_profitability(
    args: ProfitabilityArgs,
    data: &DataDir,
) -> Result<Value, Box<dyn std::error::Error>> {
    let resolved = resolve_input(&args.source, data)?;
    if args.strict {
        profitability::validate_input(&resolved.input)?;
    }
    let result = profitability::analyze_investment(&resolved.input);
    Ok(serde_json::to_value(result)?)
}
