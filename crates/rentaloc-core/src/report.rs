//! Investment report: the figures a printable summary needs, assembled
//! from one input and its computed output. Layout is left to the caller.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{self, AmortizationRow, ScheduleTotals};
use crate::profitability::{InvestmentInput, InvestmentOutput};
use crate::time_value;
use crate::types::{Money, Percent, RentalType, TaxRegime, UNNAMED_PROJECT};

const REPORT_PREFIX: &str = "Rapport_";
const DEFAULT_FILE_SUFFIX: &str = "Rentaloc";

/// Project assumptions shown at the top of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHypotheses {
    pub purchase_price: Money,
    pub works_and_furniture: Money,
    /// Agency fees plus notary fees
    pub acquisition_fees: Money,
    pub personal_cash_invested: Money,
    pub loan_amount: Money,
    pub loan_rate: Percent,
    pub loan_duration_years: u32,
    pub monthly_rent: Money,
    pub rental_type: RentalType,
    pub tax_regime: TaxRegime,
}

/// Headline results, rounded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyResults {
    pub gross_yield_percent: Percent,
    pub net_yield_percent: Percent,
    pub net_net_yield_percent: Percent,
    pub monthly_cashflow_after_tax: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentReport {
    pub project_name: String,
    pub generated_on: NaiveDate,
    /// Suggested export file name, without extension
    pub file_stem: String,
    pub hypotheses: ReportHypotheses,
    pub key_results: KeyResults,
    /// Yearly table; absent when nothing is borrowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortization: Option<Vec<AmortizationRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortization_totals: Option<ScheduleTotals>,
}

/// Assemble a report. The amortization table is only generated when the
/// loan amount is positive.
pub fn build_report(
    project_name: Option<&str>,
    input: &InvestmentInput,
    output: &InvestmentOutput,
    generated_on: NaiveDate,
) -> InvestmentReport {
    let notary_fees = time_value::percent_of(input.purchase_price, input.notary_fees_rate);

    let hypotheses = ReportHypotheses {
        purchase_price: input.purchase_price,
        works_and_furniture: input.works_cost.saturating_add(input.furniture_cost),
        acquisition_fees: input.agency_fees.saturating_add(notary_fees).round_dp(2),
        personal_cash_invested: input.personal_cash_invested,
        loan_amount: input.loan_amount,
        loan_rate: input.loan_rate,
        loan_duration_years: input.loan_duration_years,
        monthly_rent: input.monthly_rent,
        rental_type: input.rental_type,
        tax_regime: input.tax_regime,
    };

    let key_results = KeyResults {
        gross_yield_percent: output.summary.gross_yield_percent.round_dp(2),
        net_yield_percent: output.summary.net_yield_percent.round_dp(2),
        net_net_yield_percent: output.summary.net_net_yield_percent.round_dp(2),
        monthly_cashflow_after_tax: output.cashflow.monthly_after_tax.round_dp(2),
    };

    let (amortization, amortization_totals) = if input.loan_amount > Decimal::ZERO {
        let rows = amortization::schedule(
            input.loan_amount,
            input.loan_rate,
            input.loan_duration_years,
            input.loan_insurance_rate,
        );
        let totals = round_totals(amortization::totals(&rows));
        (Some(rows.into_iter().map(round_row).collect()), Some(totals))
    } else {
        (None, None)
    };

    let title = project_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNNAMED_PROJECT);

    log::debug!(
        "report '{}' built with {} amortization row(s)",
        title,
        amortization.as_ref().map_or(0, Vec::len)
    );

    InvestmentReport {
        project_name: title.to_string(),
        generated_on,
        file_stem: report_file_stem(project_name),
        hypotheses,
        key_results,
        amortization,
        amortization_totals,
    }
}

/// `Rapport_<name>` with every whitespace run (leading and trailing ones
/// included) replaced by a single `_`, or `Rapport_Rentaloc` for a missing
/// or empty name.
pub fn report_file_stem(project_name: Option<&str>) -> String {
    let mut stem = String::from(REPORT_PREFIX);
    match project_name {
        Some(name) if !name.is_empty() => {
            let mut in_whitespace = false;
            for c in name.chars() {
                if c.is_whitespace() {
                    if !in_whitespace {
                        stem.push('_');
                    }
                    in_whitespace = true;
                } else {
                    stem.push(c);
                    in_whitespace = false;
                }
            }
        }
        _ => stem.push_str(DEFAULT_FILE_SUFFIX),
    }
    stem
}

fn round_row(row: AmortizationRow) -> AmortizationRow {
    AmortizationRow {
        year: row.year,
        interest: row.interest.round_dp(2),
        principal: row.principal.round_dp(2),
        insurance: row.insurance.round_dp(2),
        remaining_principal: row.remaining_principal.round_dp(2),
    }
}

fn round_totals(totals: ScheduleTotals) -> ScheduleTotals {
    ScheduleTotals {
        total_interest: totals.total_interest.round_dp(2),
        total_principal: totals.total_principal.round_dp(2),
        total_insurance: totals.total_insurance.round_dp(2),
        total_paid: totals.total_paid.round_dp(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profitability::compute;
    use rust_decimal_macros::dec;

    fn generated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn leveraged_input() -> InvestmentInput {
        InvestmentInput {
            purchase_price: dec!(100000),
            notary_fees_rate: dec!(7.5),
            agency_fees: dec!(5000),
            works_cost: dec!(4000),
            furniture_cost: dec!(3000),
            monthly_rent: dec!(800),
            loan_amount: dec!(80000),
            loan_rate: dec!(3.5),
            loan_duration_years: 20,
            loan_insurance_rate: dec!(0.3),
            personal_cash_invested: dec!(30000),
            ..Default::default()
        }
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(report_file_stem(Some("T2  Lyon 3e")), "Rapport_T2_Lyon_3e");
        assert_eq!(report_file_stem(Some(" T2\tLyon ")), "Rapport__T2_Lyon_");
        assert_eq!(report_file_stem(Some("  ")), "Rapport__");
        assert_eq!(report_file_stem(Some("")), "Rapport_Rentaloc");
        assert_eq!(report_file_stem(None), "Rapport_Rentaloc");
    }

    #[test]
    fn test_report_with_loan_has_table() {
        let input = leveraged_input();
        let report = build_report(Some("T2 Lyon"), &input, &compute(&input), generated_on());
        assert_eq!(report.project_name, "T2 Lyon");
        assert_eq!(report.hypotheses.works_and_furniture, dec!(7000));
        assert_eq!(report.hypotheses.acquisition_fees, dec!(12500));
        let rows = report.amortization.unwrap();
        assert_eq!(rows.len(), 20);
        assert_eq!(rows[0].insurance, dec!(240));
    }

    #[test]
    fn test_report_without_loan_skips_table() {
        let mut input = leveraged_input();
        input.loan_amount = dec!(0);
        let report = build_report(None, &input, &compute(&input), generated_on());
        assert_eq!(report.project_name, UNNAMED_PROJECT);
        assert!(report.amortization.is_none());
        assert!(report.amortization_totals.is_none());
    }

    #[test]
    fn test_key_results_rounded() {
        let input = leveraged_input();
        let report = build_report(None, &input, &compute(&input), generated_on());
        // 9600 / 119500
        assert_eq!(report.key_results.gross_yield_percent, dec!(8.03));
    }
}
