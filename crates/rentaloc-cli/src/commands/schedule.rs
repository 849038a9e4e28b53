use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use rentaloc_core::amortization::{
    self, AmortizationRow, AmortizationSchedule, ScheduleInput, ScheduleTotals,
};
use rentaloc_core::InvestmentInput;

use crate::input;

/// Arguments for the yearly amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual nominal rate, in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Duration in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Annual insurance rate on the initial principal, in percent
    #[arg(long, default_value = "0")]
    pub insurance_rate: Decimal,

    /// Path to JSON investment input (its loan fields are used)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Serialize)]
struct ScheduleOutput {
    monthly_payment: Decimal,
    monthly_insurance: Decimal,
    totals: ScheduleTotals,
    rows: Vec<AmortizationRow>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = if let Some(ref path) = args.input {
        let record: InvestmentInput = input::file::read_json(path)?;
        ScheduleInput::from(&record)
    } else if let (Some(principal), Some(annual_rate), Some(years)) =
        (args.principal, args.rate, args.years)
    {
        ScheduleInput {
            principal,
            annual_rate,
            years,
            insurance_rate: args.insurance_rate,
        }
    } else if let Some(record) = input::stdin::read_stdin::<InvestmentInput>()? {
        ScheduleInput::from(&record)
    } else {
        return Err(
            "--principal, --rate and --years (or --input <file.json>) required for schedule".into(),
        );
    };

    let schedule = AmortizationSchedule::from_input(&loan);
    let monthly_payment = schedule.monthly_payment().round_dp(2);
    let monthly_insurance = schedule.monthly_insurance().round_dp(2);
    let rows: Vec<AmortizationRow> = schedule.collect();
    let totals = amortization::totals(&rows);

    let output = ScheduleOutput {
        monthly_payment,
        monthly_insurance,
        totals,
        rows,
    };
    Ok(serde_json::to_value(output)?)
}
