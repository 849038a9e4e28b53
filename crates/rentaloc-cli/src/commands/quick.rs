use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use rentaloc_core::profitability::QuickEstimate;

/// Arguments for the two-field gross yield estimate
#[derive(Args)]
pub struct QuickArgs {
    /// Purchase price
    #[arg(long)]
    pub price: Decimal,

    /// Monthly rent
    #[arg(long)]
    pub rent: Decimal,
}

pub fn run_quick(args: QuickArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let estimate = QuickEstimate {
        purchase_price: args.price,
        monthly_rent: args.rent,
    };
    Ok(json!({
        "purchase_price": estimate.purchase_price,
        "monthly_rent": estimate.monthly_rent,
        "gross_yield_percent": estimate.gross_yield_percent().round_dp(2),
    }))
}
