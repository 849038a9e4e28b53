use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value;
use crate::types::{Money, Percent};

/// Two-field estimate: purchase price and monthly rent only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickEstimate {
    pub purchase_price: Money,
    pub monthly_rent: Money,
}

impl QuickEstimate {
    pub fn gross_yield_percent(&self) -> Percent {
        quick_gross_yield(self.purchase_price, self.monthly_rent)
    }

    /// Seed a full input from profile defaults, carrying over price and rent.
    #[cfg(feature = "profiles")]
    pub fn into_input(
        self,
        profile: &crate::profile::UserProfile,
    ) -> super::calculator::InvestmentInput {
        let mut input = super::calculator::InvestmentInput::from_profile(profile);
        input.purchase_price = self.purchase_price;
        input.monthly_rent = self.monthly_rent;
        input
    }
}

/// Annual rent over purchase price, in percent; zero for a non-positive price.
pub fn quick_gross_yield(purchase_price: Money, monthly_rent: Money) -> Percent {
    if purchase_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let annual_rent = monthly_rent.saturating_mul(dec!(12));
    time_value::saturating_div(annual_rent, purchase_price).saturating_mul(dec!(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_gross_yield() {
        assert_eq!(quick_gross_yield(dec!(100000), dec!(800)), dec!(9.6));
    }

    #[test]
    fn test_quick_gross_yield_saturates() {
        assert_eq!(quick_gross_yield(dec!(0.0001), Decimal::MAX), Decimal::MAX);
    }

    #[test]
    fn test_quick_gross_yield_zero_price() {
        assert_eq!(quick_gross_yield(Decimal::ZERO, dec!(800)), Decimal::ZERO);
    }

    #[cfg(feature = "profiles")]
    #[test]
    fn test_into_input_keeps_price_and_rent() {
        let estimate = QuickEstimate {
            purchase_price: dec!(150000),
            monthly_rent: dec!(950),
        };
        let input = estimate.into_input(&crate::profile::UserProfile::default());
        assert_eq!(input.purchase_price, dec!(150000));
        assert_eq!(input.monthly_rent, dec!(950));
        assert_eq!(input.notary_fees_rate, dec!(7.5));
    }
}
