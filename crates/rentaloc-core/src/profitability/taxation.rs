use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value;
use crate::types::{Money, Percent, RentalType, TaxRegime};

/// Share of rent kept taxable under the bare micro-foncier allowance (30% off).
const BARE_MICRO_TAXABLE_SHARE: Decimal = dec!(0.70);

/// Share of rent kept taxable under the furnished micro-BIC allowance (50% off).
const FURNISHED_MICRO_TAXABLE_SHARE: Decimal = dec!(0.50);

/// How a (rental type, regime) pair turns rent into taxable income.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxTreatment {
    /// Fixed fraction of effective rent is taxable
    FlatAllowance { taxable_share: Decimal },
    /// Itemised deductions; furnished lettings may also deduct depreciation
    ActualExpenses { deduct_depreciation: bool },
}

impl TaxTreatment {
    pub fn for_pair(rental_type: RentalType, regime: TaxRegime) -> Self {
        match (rental_type, regime) {
            (RentalType::Bare, TaxRegime::Micro) => TaxTreatment::FlatAllowance {
                taxable_share: BARE_MICRO_TAXABLE_SHARE,
            },
            (RentalType::Furnished, TaxRegime::Micro) => TaxTreatment::FlatAllowance {
                taxable_share: FURNISHED_MICRO_TAXABLE_SHARE,
            },
            (RentalType::Bare, TaxRegime::Real) => TaxTreatment::ActualExpenses {
                deduct_depreciation: false,
            },
            (RentalType::Furnished, TaxRegime::Real) => TaxTreatment::ActualExpenses {
                deduct_depreciation: true,
            },
        }
    }
}

/// Expense items the actual-expense regime may deduct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deductions {
    pub owner_charges: Money,
    pub year_one_interest: Money,
    pub loan_insurance: Money,
    pub depreciation: Money,
}

/// Taxable income derived from effective rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableIncome {
    /// Itemised deductions applied (zero under a flat allowance)
    pub deductible_charges: Money,
    /// Taxable base before the zero floor; negative means a deficit
    pub raw_base: Money,
    /// Taxable base floored at zero
    pub taxable_base: Money,
}

impl TaxableIncome {
    /// Deductions exceeded rent and the deficit was dropped.
    pub fn is_clamped(&self) -> bool {
        self.raw_base < Decimal::ZERO
    }
}

/// Taxable base for one year of effective rent.
pub fn taxable_income(
    treatment: TaxTreatment,
    effective_annual_rent: Money,
    deductions: &Deductions,
) -> TaxableIncome {
    let (deductible_charges, raw_base) = match treatment {
        TaxTreatment::FlatAllowance { taxable_share } => {
            (Decimal::ZERO, effective_annual_rent.saturating_mul(taxable_share))
        }
        TaxTreatment::ActualExpenses {
            deduct_depreciation,
        } => {
            let mut deductible = deductions
                .owner_charges
                .saturating_add(deductions.year_one_interest)
                .saturating_add(deductions.loan_insurance);
            if deduct_depreciation {
                deductible = deductible.saturating_add(deductions.depreciation);
            }
            (deductible, effective_annual_rent.saturating_sub(deductible))
        }
    };

    TaxableIncome {
        deductible_charges,
        raw_base,
        taxable_base: raw_base.max(Decimal::ZERO),
    }
}

/// Annual tax at the marginal income-tax rate plus flat social levies.
pub fn annual_tax(taxable_base: Money, tmi: Percent, social_tax_rate: Percent) -> Money {
    time_value::percent_of(taxable_base, tmi.saturating_add(social_tax_rate))
}
