use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::taxation::{self, Deductions, TaxTreatment, TaxableIncome};
use crate::error::RentalocError;
use crate::time_value;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, RentalType, TaxRegime};
use crate::RentalocResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Acquisition, income, charges, financing and fiscal parameters of one
/// rental investment. All money fields share the caller's unit; all rates
/// are percent-scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentInput {
    // --- Acquisition ---
    pub purchase_price: Money,
    /// Notary fees as a percent of the purchase price
    pub notary_fees_rate: Percent,
    pub agency_fees: Money,
    pub works_cost: Money,
    pub furniture_cost: Money,
    /// Loan guarantee / mortgage registration fees
    pub guarantee_fees: Money,

    // --- Income ---
    pub monthly_rent: Money,
    /// Parking, storage and other monthly income
    pub extra_monthly_income: Money,
    /// Expected vacancy, 0-100 (not enforced)
    pub vacancy_rate: Percent,

    // --- Owner charges (annual) ---
    /// Taxe foncière
    pub property_tax: Money,
    /// Non-recoverable co-ownership charges
    pub co_ownership_charges: Money,
    /// Propriétaire non occupant insurance
    pub insurance_pno: Money,
    /// Garantie loyers impayés insurance
    pub insurance_gli: Money,
    pub maintenance_budget: Money,
    /// Management fee as a percent of effective rent
    pub property_management_rate: Percent,

    // --- Financing ---
    pub loan_amount: Money,
    /// Annual nominal rate
    pub loan_rate: Percent,
    pub loan_duration_years: u32,
    /// Annual borrower insurance as a percent of the initial principal
    pub loan_insurance_rate: Percent,

    // --- Fiscal ---
    pub rental_type: RentalType,
    pub tax_regime: TaxRegime,
    /// Marginal income tax rate (tranche marginale d'imposition)
    pub tmi: Percent,
    /// Flat social levies rate
    pub social_tax_rate: Percent,
    /// Annual depreciation, deducted only for furnished lettings under the
    /// actual-expense regime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortization_annual: Option<Money>,

    // --- Capital ---
    pub personal_cash_invested: Money,
}

/// Headline yields, percent-scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldSummary {
    pub gross_yield_percent: Percent,
    pub net_yield_percent: Percent,
    pub net_net_yield_percent: Percent,
}

/// Cashflow after owner charges and loan service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowSummary {
    pub annual_before_tax: Money,
    pub monthly_before_tax: Money,
    pub annual_after_tax: Money,
    pub monthly_after_tax: Money,
    /// Annual after-tax cashflow / personal cash invested
    pub cash_on_cash_percent: Percent,
}

/// Intermediate amounts behind the headline figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationDetails {
    pub acquisition_cost: Money,
    pub effective_annual_rent: Money,
    pub owner_annual_charges: Money,
    pub monthly_loan_payment: Money,
    pub annual_loan_payment: Money,
    pub annual_tax: Money,
}

/// Fiscal inputs echoed back with the computed base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalSummary {
    pub rental_type: RentalType,
    pub tax_regime: TaxRegime,
    pub tmi: Percent,
    pub social_tax_rate: Percent,
    pub deductible_charges: Money,
    pub taxable_base: Money,
}

/// Complete profitability output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentOutput {
    pub summary: YieldSummary,
    pub cashflow: CashflowSummary,
    pub details: ComputationDetails,
    pub fiscal: FiscalSummary,
}

/// Loan service figures used by the profitability computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanService {
    pub monthly_payment: Money,
    pub annual_payment: Money,
    /// Flat `loan × rate` first-year interest, used only as a tax deduction
    pub year_one_interest: Money,
    pub annual_insurance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute yields, cashflow and tax for one investment.
///
/// Total over its inputs: every ratio with a non-positive denominator is
/// reported as zero, a zero loan amount or duration means no annuity, and
/// amounts beyond Decimal's range saturate at its bounds.
pub fn compute(input: &InvestmentInput) -> InvestmentOutput {
    evaluate(input).0
}

/// Run [`compute`] and wrap the result with review warnings and metadata.
pub fn analyze_investment(input: &InvestmentInput) -> ComputationOutput<InvestmentOutput> {
    let start = Instant::now();
    let (output, income) = evaluate(input);
    let warnings = review(input, &output, &income);

    log::debug!(
        "profitability computed: gross {}%, net-net {}%, {} warning(s)",
        output.summary.gross_yield_percent.round_dp(2),
        output.summary.net_net_yield_percent.round_dp(2),
        warnings.len()
    );

    let elapsed = start.elapsed().as_micros() as u64;

    with_metadata(
        "Rental profitability (French micro / réel taxation, year-1 approximation)",
        input,
        warnings,
        elapsed,
        output,
    )
}

/// Strict input checks for collection layers that want to reject entries
/// [`compute`] would otherwise accept.
pub fn validate_input(input: &InvestmentInput) -> RentalocResult<()> {
    let amounts = [
        ("purchase_price", input.purchase_price),
        ("agency_fees", input.agency_fees),
        ("works_cost", input.works_cost),
        ("furniture_cost", input.furniture_cost),
        ("guarantee_fees", input.guarantee_fees),
        ("monthly_rent", input.monthly_rent),
        ("extra_monthly_income", input.extra_monthly_income),
        ("property_tax", input.property_tax),
        ("co_ownership_charges", input.co_ownership_charges),
        ("insurance_pno", input.insurance_pno),
        ("insurance_gli", input.insurance_gli),
        ("maintenance_budget", input.maintenance_budget),
        ("loan_amount", input.loan_amount),
        ("personal_cash_invested", input.personal_cash_invested),
    ];
    for (field, value) in amounts {
        if value < Decimal::ZERO {
            return Err(RentalocError::InvalidInput {
                field: field.into(),
                reason: "Amount must not be negative".into(),
            });
        }
    }

    let rates = [
        ("notary_fees_rate", input.notary_fees_rate),
        ("vacancy_rate", input.vacancy_rate),
        ("property_management_rate", input.property_management_rate),
        ("loan_rate", input.loan_rate),
        ("loan_insurance_rate", input.loan_insurance_rate),
        ("tmi", input.tmi),
        ("social_tax_rate", input.social_tax_rate),
    ];
    for (field, value) in rates {
        if value < Decimal::ZERO || value > dec!(100) {
            return Err(RentalocError::InvalidInput {
                field: field.into(),
                reason: "Rate must be a percentage between 0 and 100".into(),
            });
        }
    }

    if let Some(amortization) = input.amortization_annual {
        if amortization < Decimal::ZERO {
            return Err(RentalocError::InvalidInput {
                field: "amortization_annual".into(),
                reason: "Depreciation must not be negative".into(),
            });
        }
    }

    if input.loan_amount > Decimal::ZERO && input.loan_duration_years == 0 {
        return Err(RentalocError::InvalidInput {
            field: "loan_duration_years".into(),
            reason: "A loan needs a duration of at least one year".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Purchase price plus notary fees, agency fees, works, furniture and guarantee.
pub fn acquisition_cost(input: &InvestmentInput) -> Money {
    let notary_fees = time_value::percent_of(input.purchase_price, input.notary_fees_rate);
    [
        notary_fees,
        input.agency_fees,
        input.works_cost,
        input.furniture_cost,
        input.guarantee_fees,
    ]
    .into_iter()
    .fold(input.purchase_price, Decimal::saturating_add)
}

/// Annual rent and extra income net of vacancy.
pub fn effective_annual_rent(input: &InvestmentInput) -> Money {
    let gross_annual_rent = input
        .monthly_rent
        .saturating_add(input.extra_monthly_income)
        .saturating_mul(dec!(12));
    let occupancy = Decimal::ONE.saturating_sub(input.vacancy_rate / dec!(100));
    gross_annual_rent.saturating_mul(occupancy)
}

/// Annual charges borne by the owner. Management fees apply to effective rent.
pub fn owner_annual_charges(input: &InvestmentInput, effective_annual_rent: Money) -> Money {
    let management_fees =
        time_value::percent_of(effective_annual_rent, input.property_management_rate);
    [
        input.co_ownership_charges,
        input.insurance_pno,
        input.insurance_gli,
        input.maintenance_budget,
        management_fees,
    ]
    .into_iter()
    .fold(input.property_tax, Decimal::saturating_add)
}

/// Annuity, flat first-year interest and insurance premium of the loan.
pub fn loan_service(input: &InvestmentInput) -> LoanService {
    let monthly_payment =
        if input.loan_amount > Decimal::ZERO && input.loan_duration_years > 0 {
            time_value::monthly_payment(
                input.loan_amount,
                time_value::monthly_rate(input.loan_rate),
                time_value::total_months(input.loan_duration_years),
            )
        } else {
            Decimal::ZERO
        };

    LoanService {
        monthly_payment,
        annual_payment: monthly_payment.saturating_mul(dec!(12)),
        year_one_interest: time_value::percent_of(input.loan_amount, input.loan_rate),
        annual_insurance: time_value::percent_of(input.loan_amount, input.loan_insurance_rate),
    }
}

fn evaluate(input: &InvestmentInput) -> (InvestmentOutput, TaxableIncome) {
    let acquisition_cost = acquisition_cost(input);
    let effective_annual_rent = effective_annual_rent(input);
    let owner_annual_charges = owner_annual_charges(input, effective_annual_rent);
    let loan = loan_service(input);

    let net_operating_income = effective_annual_rent.saturating_sub(owner_annual_charges);
    let gross_yield_percent = ratio_percent(effective_annual_rent, acquisition_cost);
    let net_yield_percent = ratio_percent(net_operating_income, acquisition_cost);

    let treatment = TaxTreatment::for_pair(input.rental_type, input.tax_regime);
    let deductions = Deductions {
        owner_charges: owner_annual_charges,
        year_one_interest: loan.year_one_interest,
        loan_insurance: loan.annual_insurance,
        depreciation: input.amortization_annual.unwrap_or(Decimal::ZERO),
    };
    let income = taxation::taxable_income(treatment, effective_annual_rent, &deductions);
    let annual_tax = taxation::annual_tax(income.taxable_base, input.tmi, input.social_tax_rate);

    let net_net_yield_percent =
        ratio_percent(net_operating_income.saturating_sub(annual_tax), acquisition_cost);

    let annual_before_tax = net_operating_income.saturating_sub(loan.annual_payment);
    let annual_after_tax = annual_before_tax.saturating_sub(annual_tax);

    let output = InvestmentOutput {
        summary: YieldSummary {
            gross_yield_percent,
            net_yield_percent,
            net_net_yield_percent,
        },
        cashflow: CashflowSummary {
            annual_before_tax,
            monthly_before_tax: annual_before_tax / dec!(12),
            annual_after_tax,
            monthly_after_tax: annual_after_tax / dec!(12),
            cash_on_cash_percent: ratio_percent(annual_after_tax, input.personal_cash_invested),
        },
        details: ComputationDetails {
            acquisition_cost,
            effective_annual_rent,
            owner_annual_charges,
            monthly_loan_payment: loan.monthly_payment,
            annual_loan_payment: loan.annual_payment,
            annual_tax,
        },
        fiscal: FiscalSummary {
            rental_type: input.rental_type,
            tax_regime: input.tax_regime,
            tmi: input.tmi,
            social_tax_rate: input.social_tax_rate,
            deductible_charges: income.deductible_charges,
            taxable_base: income.taxable_base,
        },
    };
    (output, income)
}

/// `numerator / denominator` in percent; zero for a non-positive denominator.
fn ratio_percent(numerator: Money, denominator: Money) -> Percent {
    if denominator <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        time_value::saturating_div(numerator, denominator).saturating_mul(dec!(100))
    }
}

fn review(
    input: &InvestmentInput,
    output: &InvestmentOutput,
    income: &TaxableIncome,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.vacancy_rate < Decimal::ZERO || input.vacancy_rate > dec!(100) {
        warnings.push(format!(
            "Vacancy rate {}% is outside 0-100, effective rent may be meaningless",
            input.vacancy_rate
        ));
    }

    let treatment = TaxTreatment::for_pair(input.rental_type, input.tax_regime);
    if income.is_clamped() {
        warnings.push(format!(
            "Taxable base {} floored at 0 (deductible charges {}), deficit not carried forward",
            income.raw_base.round_dp(2),
            income.deductible_charges.round_dp(2)
        ));
    }

    let uses_depreciation = treatment
        == TaxTreatment::ActualExpenses {
            deduct_depreciation: true,
        };
    if !uses_depreciation && input.amortization_annual.is_some_and(|a| !a.is_zero()) {
        warnings.push(format!(
            "Annual depreciation ignored: only deductible for furnished lettings under the actual-expense regime ({} / {})",
            input.rental_type, input.tax_regime
        ));
    }

    if output.cashflow.monthly_after_tax < Decimal::ZERO {
        warnings.push(format!(
            "Negative monthly cashflow after tax: {}",
            output.cashflow.monthly_after_tax.round_dp(2)
        ));
    }

    if output.details.acquisition_cost > Decimal::ZERO
        && input.loan_amount > output.details.acquisition_cost
    {
        warnings.push(format!(
            "Loan amount {} exceeds total acquisition cost {}",
            input.loan_amount,
            output.details.acquisition_cost.round_dp(2)
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// 100k flat, 800/month rent, 80k borrowed over 20 years
    fn sample_input() -> InvestmentInput {
        InvestmentInput {
            purchase_price: dec!(100000),
            notary_fees_rate: dec!(7.5),
            agency_fees: dec!(5000),
            guarantee_fees: dec!(1000),
            monthly_rent: dec!(800),
            property_tax: dec!(800),
            co_ownership_charges: dec!(500),
            insurance_pno: dec!(150),
            insurance_gli: dec!(200),
            maintenance_budget: dec!(300),
            loan_amount: dec!(80000),
            loan_rate: dec!(3.5),
            loan_duration_years: 20,
            loan_insurance_rate: dec!(0.3),
            rental_type: RentalType::Furnished,
            tax_regime: TaxRegime::Real,
            tmi: dec!(30),
            social_tax_rate: dec!(17.2),
            amortization_annual: Some(dec!(3000)),
            personal_cash_invested: dec!(30000),
            ..Default::default()
        }
    }

    #[test]
    fn test_acquisition_cost_includes_notary_fees() {
        // 100000 + 7500 + 5000 + 1000
        assert_eq!(acquisition_cost(&sample_input()), dec!(113500));
    }

    #[test]
    fn test_vacancy_reduces_rent() {
        let mut input = sample_input();
        input.extra_monthly_income = dec!(50);
        input.vacancy_rate = dec!(10);
        // 850 * 12 * 0.9
        assert_eq!(effective_annual_rent(&input), dec!(9180));
    }

    #[test]
    fn test_management_fee_on_effective_rent() {
        let mut input = sample_input();
        input.vacancy_rate = dec!(50);
        input.property_management_rate = dec!(10);
        let rent = effective_annual_rent(&input);
        assert_eq!(rent, dec!(4800));
        // 1950 fixed + 10% of 4800
        assert_eq!(owner_annual_charges(&input, rent), dec!(2430));
    }

    #[test]
    fn test_loan_service_flat_interest_and_insurance() {
        let loan = loan_service(&sample_input());
        assert_eq!(loan.year_one_interest, dec!(2800));
        assert_eq!(loan.annual_insurance, dec!(240));
        assert!((loan.monthly_payment - dec!(463.97)).abs() < dec!(0.01));
        assert_eq!(loan.annual_payment, loan.monthly_payment * dec!(12));
    }

    #[test]
    fn test_furnished_real_full_chain() {
        let out = compute(&sample_input());
        // charges 1950, deductions 1950 + 2800 + 240 + 3000 = 7990
        assert_eq!(out.details.owner_annual_charges, dec!(1950));
        assert_eq!(out.fiscal.deductible_charges, dec!(7990));
        assert_eq!(out.fiscal.taxable_base, dec!(1610));
        // 1610 * 47.2%
        assert_eq!(out.details.annual_tax, dec!(759.92));
        assert_eq!(
            out.cashflow.annual_after_tax,
            dec!(9600) - dec!(1950) - out.details.annual_loan_payment - dec!(759.92)
        );
    }

    #[test]
    fn test_zero_acquisition_cost_gives_zero_yields() {
        let input = InvestmentInput {
            monthly_rent: dec!(800),
            ..Default::default()
        };
        let out = compute(&input);
        assert_eq!(out.summary.gross_yield_percent, Decimal::ZERO);
        assert_eq!(out.summary.net_yield_percent, Decimal::ZERO);
        assert_eq!(out.summary.net_net_yield_percent, Decimal::ZERO);
    }

    #[test]
    fn test_negative_acquisition_cost_gives_zero_yields() {
        let input = InvestmentInput {
            purchase_price: dec!(-1000),
            monthly_rent: dec!(800),
            ..Default::default()
        };
        let out = compute(&input);
        assert_eq!(out.summary.gross_yield_percent, Decimal::ZERO);
    }

    #[test]
    fn test_no_personal_cash_gives_zero_cash_on_cash() {
        let mut input = sample_input();
        input.personal_cash_invested = Decimal::ZERO;
        assert_eq!(compute(&input).cashflow.cash_on_cash_percent, Decimal::ZERO);
    }

    #[test]
    fn test_review_flags_ignored_depreciation() {
        let mut input = sample_input();
        input.rental_type = RentalType::Bare;
        let env = analyze_investment(&input);
        assert!(env
            .warnings
            .iter()
            .any(|w| w.contains("depreciation ignored")));
    }

    #[test]
    fn test_review_flags_clamped_base() {
        let mut input = sample_input();
        input.monthly_rent = dec!(300);
        let env = analyze_investment(&input);
        assert_eq!(env.result.fiscal.taxable_base, Decimal::ZERO);
        assert!(env.warnings.iter().any(|w| w.contains("floored at 0")));
        assert!(env.warnings.iter().any(|w| w.contains("Negative monthly cashflow")));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut input = sample_input();
        input.purchase_price = dec!(-1);
        match validate_input(&input) {
            Err(RentalocError::InvalidInput { field, .. }) => assert_eq!(field, "purchase_price"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_loan_without_duration() {
        let mut input = sample_input();
        input.loan_duration_years = 0;
        assert!(validate_input(&input).is_err());
        assert!(validate_input(&sample_input()).is_ok());
    }

    #[test]
    fn test_huge_purchase_price_does_not_overflow() {
        let input = InvestmentInput {
            purchase_price: Decimal::from_i128_with_scale(10_i128.pow(28), 0),
            notary_fees_rate: dec!(10),
            monthly_rent: dec!(800),
            ..Default::default()
        };
        let out = compute(&input);
        assert_eq!(
            out.details.acquisition_cost,
            Decimal::from_i128_with_scale(11 * 10_i128.pow(27), 0)
        );
        assert!(out.summary.gross_yield_percent >= Decimal::ZERO);
        assert!(out.summary.gross_yield_percent < dec!(0.000001));
    }

    #[test]
    fn test_huge_rent_saturates() {
        let mut input = sample_input();
        input.monthly_rent = Decimal::MAX / dec!(2);
        let out = compute(&input);
        assert_eq!(out.details.effective_annual_rent, Decimal::MAX);
        assert_eq!(out.fiscal.taxable_base, Decimal::MAX - dec!(7990));
        assert!(out.summary.gross_yield_percent > Decimal::ZERO);
        assert!(out.cashflow.annual_after_tax > Decimal::ZERO);
    }

    #[test]
    fn test_extreme_rates_and_amounts_stay_total() {
        let input = InvestmentInput {
            purchase_price: Decimal::MAX,
            notary_fees_rate: Decimal::MAX,
            monthly_rent: Decimal::MIN,
            vacancy_rate: Decimal::MIN,
            property_management_rate: Decimal::MAX,
            loan_amount: Decimal::MAX,
            loan_rate: Decimal::MAX,
            loan_duration_years: u32::MAX,
            loan_insurance_rate: Decimal::MAX,
            tmi: Decimal::MAX,
            social_tax_rate: Decimal::MAX,
            amortization_annual: Some(Decimal::MAX),
            personal_cash_invested: dec!(0.0000001),
            ..Default::default()
        };
        let env = analyze_investment(&input);
        assert!(env.result.fiscal.taxable_base >= Decimal::ZERO);
        assert_eq!(env.result.details.acquisition_cost, Decimal::MAX);
    }

    #[test]
    fn test_review_flags_negative_rent_under_flat_allowance() {
        let mut input = sample_input();
        input.tax_regime = TaxRegime::Micro;
        input.amortization_annual = None;
        input.vacancy_rate = dec!(150);
        let env = analyze_investment(&input);
        assert_eq!(env.result.fiscal.taxable_base, Decimal::ZERO);
        assert!(env.warnings.iter().any(|w| w.contains("outside 0-100")));
        assert!(env.warnings.iter().any(|w| w.contains("floored at 0")));
    }
}
