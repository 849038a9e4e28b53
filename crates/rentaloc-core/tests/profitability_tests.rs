use pretty_assertions::assert_eq;
use rentaloc_core::profitability::{self, analyze_investment, compute, InvestmentInput};
use rentaloc_core::{RentalType, TaxRegime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn unleveraged_flat() -> InvestmentInput {
    InvestmentInput {
        purchase_price: dec!(100000),
        monthly_rent: dec!(800),
        tmi: dec!(30),
        social_tax_rate: dec!(17.2),
        ..Default::default()
    }
}

fn leveraged_studio() -> InvestmentInput {
    InvestmentInput {
        purchase_price: dec!(100000),
        notary_fees_rate: dec!(7.5),
        agency_fees: dec!(5000),
        guarantee_fees: dec!(1000),
        monthly_rent: dec!(800),
        vacancy_rate: dec!(5),
        property_tax: dec!(800),
        co_ownership_charges: dec!(500),
        insurance_pno: dec!(150),
        insurance_gli: dec!(200),
        maintenance_budget: dec!(300),
        property_management_rate: dec!(7),
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

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_gross_yield_scenario() {
    let out = compute(&unleveraged_flat());
    // 800 * 12 / 100000 * 100
    assert_eq!(out.summary.gross_yield_percent, dec!(9.6));
    assert_eq!(out.details.acquisition_cost, dec!(100000));
    assert_eq!(out.details.effective_annual_rent, dec!(9600));
}

#[test]
fn test_loan_annuity_scenario() {
    let input = InvestmentInput {
        loan_amount: dec!(80000),
        loan_rate: dec!(3.5),
        loan_duration_years: 20,
        ..Default::default()
    };
    let out = compute(&input);
    assert!(
        (out.details.monthly_loan_payment - dec!(463.97)).abs() < dec!(0.01),
        "monthly payment {}",
        out.details.monthly_loan_payment
    );
    assert!((out.details.annual_loan_payment - dec!(5567.61)).abs() < dec!(0.01));
}

#[test]
fn test_zero_rate_loan_is_straight_line() {
    let input = InvestmentInput {
        loan_amount: dec!(96000),
        loan_rate: Decimal::ZERO,
        loan_duration_years: 20,
        ..Default::default()
    };
    let out = compute(&input);
    // 96000 / 240
    assert_eq!(out.details.monthly_loan_payment, dec!(400));
    assert_eq!(out.details.annual_loan_payment, dec!(4800));
}

#[test]
fn test_no_loan_means_no_annuity() {
    let mut input = leveraged_studio();
    input.loan_amount = Decimal::ZERO;
    assert_eq!(compute(&input).details.annual_loan_payment, Decimal::ZERO);

    let mut input = leveraged_studio();
    input.loan_duration_years = 0;
    assert_eq!(compute(&input).details.annual_loan_payment, Decimal::ZERO);
}

#[test]
fn test_bare_micro_taxable_base() {
    let mut input = unleveraged_flat();
    input.rental_type = RentalType::Bare;
    input.tax_regime = TaxRegime::Micro;
    let out = compute(&input);
    assert_eq!(out.fiscal.taxable_base, dec!(6720));
    // 6720 * 47.2%
    assert_eq!(out.details.annual_tax, dec!(3171.84));
}

#[test]
fn test_furnished_micro_taxable_base() {
    let mut input = unleveraged_flat();
    input.rental_type = RentalType::Furnished;
    input.tax_regime = TaxRegime::Micro;
    assert_eq!(compute(&input).fiscal.taxable_base, dec!(4800));
}

#[test]
fn test_bare_real_deducts_interest_and_insurance() {
    let mut input = leveraged_studio();
    input.rental_type = RentalType::Bare;
    let out = compute(&input);
    let expected = out.details.owner_annual_charges + dec!(2800) + dec!(240);
    assert_eq!(out.fiscal.deductible_charges, expected);
    assert_eq!(
        out.fiscal.taxable_base,
        (out.details.effective_annual_rent - expected).max(Decimal::ZERO)
    );
}

#[test]
fn test_furnished_real_deducts_depreciation() {
    let input = leveraged_studio();
    let with = compute(&input);
    let mut without_input = input.clone();
    without_input.amortization_annual = None;
    let without = compute(&without_input);
    assert_eq!(
        with.fiscal.deductible_charges - without.fiscal.deductible_charges,
        dec!(3000)
    );
}

#[test]
fn test_net_net_below_net_below_gross() {
    let out = compute(&leveraged_studio());
    assert!(out.summary.gross_yield_percent > out.summary.net_yield_percent);
    assert!(out.summary.net_yield_percent >= out.summary.net_net_yield_percent);
}

#[test]
fn test_cashflow_identities() {
    let out = compute(&leveraged_studio());
    let d = &out.details;
    assert_eq!(
        out.cashflow.annual_before_tax,
        d.effective_annual_rent - d.owner_annual_charges - d.annual_loan_payment
    );
    assert_eq!(out.cashflow.annual_after_tax, out.cashflow.annual_before_tax - d.annual_tax);
    assert_eq!(out.cashflow.monthly_after_tax, out.cashflow.annual_after_tax / dec!(12));
    assert_eq!(
        out.cashflow.cash_on_cash_percent,
        out.cashflow.annual_after_tax / dec!(30000) * dec!(100)
    );
}

// ===========================================================================
// Degenerate inputs
// ===========================================================================

#[test]
fn test_default_input_is_all_zero() {
    let out = compute(&InvestmentInput::default());
    assert_eq!(out.summary.gross_yield_percent, Decimal::ZERO);
    assert_eq!(out.cashflow.cash_on_cash_percent, Decimal::ZERO);
    assert_eq!(out.details.annual_tax, Decimal::ZERO);
}

#[test]
fn test_taxable_base_never_negative() {
    let regimes = [
        (RentalType::Bare, TaxRegime::Micro),
        (RentalType::Bare, TaxRegime::Real),
        (RentalType::Furnished, TaxRegime::Micro),
        (RentalType::Furnished, TaxRegime::Real),
    ];
    for rent in [dec!(-500), dec!(0), dec!(100), dec!(800)] {
        for (rental_type, tax_regime) in regimes {
            let mut input = leveraged_studio();
            input.monthly_rent = rent;
            input.rental_type = rental_type;
            input.tax_regime = tax_regime;
            let out = compute(&input);
            assert!(
                out.fiscal.taxable_base >= Decimal::ZERO,
                "{rental_type:?}/{tax_regime:?} rent {rent}: {}",
                out.fiscal.taxable_base
            );
        }
    }
}

#[test]
fn test_out_of_range_amounts_from_json_saturate() {
    let json = r#"{
        "purchase_price": "10000000000000000000000000000",
        "notary_fees_rate": "10",
        "monthly_rent": "39614081257132168796771975167",
        "loan_amount": "79228162514264337593543950335",
        "loan_rate": "3.5",
        "loan_duration_years": 20,
        "tmi": "30",
        "social_tax_rate": "17.2"
    }"#;
    let input: InvestmentInput = serde_json::from_str(json).unwrap();
    let env = analyze_investment(&input);
    assert_eq!(env.result.details.effective_annual_rent, Decimal::MAX);
    assert!(env.result.details.acquisition_cost > Decimal::ZERO);
    assert!(env.result.fiscal.taxable_base >= Decimal::ZERO);
    assert_eq!(compute(&input), env.result);
}

#[test]
fn test_negative_cash_invested_gives_zero_cash_on_cash() {
    let mut input = leveraged_studio();
    input.personal_cash_invested = dec!(-10);
    assert_eq!(compute(&input).cashflow.cash_on_cash_percent, Decimal::ZERO);
}

#[test]
fn test_compute_is_deterministic() {
    let input = leveraged_studio();
    let first = compute(&input);
    let second = compute(&input);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// ===========================================================================
// Envelope and validation
// ===========================================================================

#[test]
fn test_envelope_echoes_input() {
    let input = leveraged_studio();
    let env = analyze_investment(&input);
    assert_eq!(env.result, compute(&input));
    let echoed: InvestmentInput = serde_json::from_value(env.assumptions.clone()).unwrap();
    assert_eq!(echoed, input);
    assert!(env.methodology.contains("Rental profitability"));
}

#[test]
fn test_envelope_flags_out_of_range_vacancy() {
    let mut input = unleveraged_flat();
    input.vacancy_rate = dec!(120);
    let env = analyze_investment(&input);
    assert!(env.warnings.iter().any(|w| w.contains("Vacancy rate")));
    assert!(profitability::validate_input(&input).is_err());
}

#[test]
fn test_input_accepts_partial_json() {
    let input: InvestmentInput = serde_json::from_str(
        r#"{"purchase_price": 100000, "monthly_rent": "800", "rental_type": "NU", "tax_regime": "MICRO"}"#,
    )
    .unwrap();
    assert_eq!(input.rental_type, RentalType::Bare);
    assert_eq!(compute(&input).fiscal.taxable_base, dec!(6720));
}
