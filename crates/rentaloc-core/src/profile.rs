//! Investor profile: fiscal situation and default assumptions used to seed
//! new projects.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::profitability::InvestmentInput;
use crate::types::{Money, Percent, RentalType, TaxRegime};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Marginal income tax rate
    pub tmi: Percent,
    pub tax_regime: TaxRegime,
    pub rental_type: RentalType,
    pub default_loan_rate: Percent,
    pub default_loan_duration: u32,
    pub default_loan_insurance: Percent,
    pub default_notary_rate: Percent,
    /// Annual PNO insurance premium
    pub default_pno_cost: Money,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            tmi: dec!(30),
            tax_regime: TaxRegime::Real,
            rental_type: RentalType::Furnished,
            default_loan_rate: dec!(3.5),
            default_loan_duration: 20,
            default_loan_insurance: dec!(0.3),
            default_notary_rate: dec!(7.5),
            default_pno_cost: dec!(150),
        }
    }
}

/// French flat social levies on property income (prélèvements sociaux).
pub const DEFAULT_SOCIAL_TAX_RATE: Percent = dec!(17.2);

impl InvestmentInput {
    /// Starting point for a new project, filled from the profile defaults.
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            purchase_price: dec!(100000),
            notary_fees_rate: profile.default_notary_rate,
            agency_fees: dec!(5000),
            works_cost: Decimal::ZERO,
            furniture_cost: Decimal::ZERO,
            guarantee_fees: dec!(1000),
            monthly_rent: dec!(800),
            extra_monthly_income: Decimal::ZERO,
            vacancy_rate: Decimal::ZERO,
            property_tax: dec!(800),
            co_ownership_charges: dec!(500),
            insurance_pno: profile.default_pno_cost,
            insurance_gli: dec!(200),
            maintenance_budget: dec!(300),
            property_management_rate: Decimal::ZERO,
            loan_amount: dec!(80000),
            loan_rate: profile.default_loan_rate,
            loan_duration_years: profile.default_loan_duration,
            loan_insurance_rate: profile.default_loan_insurance,
            rental_type: profile.rental_type,
            tax_regime: profile.tax_regime,
            tmi: profile.tmi,
            social_tax_rate: DEFAULT_SOCIAL_TAX_RATE,
            amortization_annual: Some(dec!(3000)),
            personal_cash_invested: dec!(30000),
        }
    }
}
