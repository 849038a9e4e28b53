use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent};

const MONTHS_PER_YEAR: u32 = 12;

/// Monthly periodic rate (as a fraction) from an annual nominal rate in percent.
pub fn monthly_rate(annual_rate: Percent) -> Decimal {
    annual_rate / dec!(100) / dec!(12)
}

/// `amount × rate / 100`, saturating at Decimal's bounds.
pub fn percent_of(amount: Money, rate: Percent) -> Money {
    amount.saturating_mul(rate / dec!(100))
}

/// Quotient saturating at Decimal's bounds; zero for a zero divisor.
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() != denominator.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// Number of monthly instalments in a loan of `years` years.
pub fn total_months(years: u32) -> u32 {
    years.saturating_mul(MONTHS_PER_YEAR)
}

/// (1 + r)^n by iterative multiplication.
///
/// Returns `None` when the factor leaves Decimal's representable range.
pub fn compound_factor(periodic_rate: Decimal, periods: u32) -> Option<Decimal> {
    let base = Decimal::ONE + periodic_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..periods {
        compound = compound.checked_mul(base)?;
    }
    Some(compound)
}

/// Level monthly instalment of a fully amortising loan:
/// `P * r / (1 - (1 + r)^-n)`, or `P / n` when the rate is zero.
///
/// Total over its inputs: zero months gives a zero payment, and a compound
/// factor too large to represent yields the limit `P * r`.
pub fn monthly_payment(principal: Money, periodic_rate: Decimal, months: u32) -> Money {
    if months == 0 {
        return Decimal::ZERO;
    }
    if periodic_rate.is_zero() {
        return principal / Decimal::from(months);
    }

    match compound_factor(periodic_rate, months) {
        // (1 + r)^-n vanishes
        None => principal.saturating_mul(periodic_rate),
        // (1 + r)^-n unbounded
        Some(compound) if compound.is_zero() => Decimal::ZERO,
        Some(compound) => {
            let denominator = Decimal::ONE.saturating_sub(saturating_div(Decimal::ONE, compound));
            if denominator.is_zero() {
                principal / Decimal::from(months)
            } else {
                saturating_div(principal.saturating_mul(periodic_rate), denominator)
            }
        }
    }
}
