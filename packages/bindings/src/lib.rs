use napi::Result as NapiResult;
use napi_derive::napi;

use rentaloc_core::amortization::{self, ScheduleInput};
use rentaloc_core::profile::UserProfile;
use rentaloc_core::profitability::{self, InvestmentInput, QuickEstimate};
use rentaloc_core::report;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Profitability
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_profitability(input_json: String) -> NapiResult<String> {
    let input: InvestmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = profitability::compute(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_investment(input_json: String) -> NapiResult<String> {
    let input: InvestmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = profitability::analyze_investment(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Rejects out-of-range entries with the offending field in the message.
#[napi]
pub fn validate_investment_input(input_json: String) -> NapiResult<bool> {
    let input: InvestmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    profitability::validate_input(&input).map_err(to_napi_error)?;
    Ok(true)
}

#[napi]
pub fn quick_gross_yield(input_json: String) -> NapiResult<String> {
    let estimate: QuickEstimate = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    serde_json::to_string(&estimate.gross_yield_percent()).map_err(to_napi_error)
}

/// Full input seeded from a profile; an empty string uses the default profile.
#[napi]
pub fn default_investment_input(profile_json: String) -> NapiResult<String> {
    let profile: UserProfile = if profile_json.trim().is_empty() {
        UserProfile::default()
    } else {
        serde_json::from_str(&profile_json).map_err(to_napi_error)?
    };
    serde_json::to_string(&InvestmentInput::from_profile(&profile)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: ScheduleInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rows = amortization::schedule(
        input.principal,
        input.annual_rate,
        input.years,
        input.insurance_rate,
    );
    serde_json::to_string(&rows).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// `generated_on` is an ISO date (`YYYY-MM-DD`) supplied by the caller.
#[napi]
pub fn build_report(
    project_name: Option<String>,
    input_json: String,
    generated_on: String,
) -> NapiResult<String> {
    let input: InvestmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let date = generated_on
        .parse::<chrono::NaiveDate>()
        .map_err(to_napi_error)?;
    let output = profitability::compute(&input);
    let built = report::build_report(project_name.as_deref(), &input, &output, date);
    serde_json::to_string(&built).map_err(to_napi_error)
}
