use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

use crate::profitability::InvestmentInput;
use crate::time_value;
use crate::types::{Money, Percent};

const MONTHS_PER_YEAR: u32 = 12;

/// Loan parameters of a yearly amortization table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleInput {
    pub principal: Money,
    /// Annual nominal rate
    pub annual_rate: Percent,
    pub years: u32,
    /// Annual borrower insurance as a percent of the initial principal
    pub insurance_rate: Percent,
}

impl From<&InvestmentInput> for ScheduleInput {
    fn from(input: &InvestmentInput) -> Self {
        Self {
            principal: input.loan_amount,
            annual_rate: input.loan_rate,
            years: input.loan_duration_years,
            insurance_rate: input.loan_insurance_rate,
        }
    }
}

/// One loan year of the amortization table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based loan year
    pub year: u32,
    pub interest: Money,
    pub principal: Money,
    pub insurance: Money,
    /// Outstanding principal at year end, floored at zero
    pub remaining_principal: Money,
}

/// Sums over a whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_insurance: Money,
    /// Interest + principal + insurance
    pub total_paid: Money,
}

/// Month-by-month simulation of a level-payment loan, yielding one row per
/// year. Cloning restarts from the same position.
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    monthly_rate: Decimal,
    monthly_payment: Money,
    monthly_insurance: Money,
    balance: Money,
    total_months: u32,
    month: u32,
}

impl AmortizationSchedule {
    pub fn new(principal: Money, annual_rate: Percent, years: u32, insurance_rate: Percent) -> Self {
        let monthly_rate = time_value::monthly_rate(annual_rate);
        let total_months = time_value::total_months(years);
        Self {
            monthly_rate,
            monthly_payment: time_value::monthly_payment(principal, monthly_rate, total_months),
            monthly_insurance: time_value::percent_of(principal, insurance_rate) / dec!(12),
            balance: principal,
            total_months,
            month: 0,
        }
    }

    pub fn from_input(input: &ScheduleInput) -> Self {
        Self::new(
            input.principal,
            input.annual_rate,
            input.years,
            input.insurance_rate,
        )
    }

    /// Level instalment excluding insurance.
    pub fn monthly_payment(&self) -> Money {
        self.monthly_payment
    }

    pub fn monthly_insurance(&self) -> Money {
        self.monthly_insurance
    }

    fn remaining_years(&self) -> usize {
        ((self.total_months - self.month) / MONTHS_PER_YEAR) as usize
    }
}

impl Iterator for AmortizationSchedule {
    type Item = AmortizationRow;

    fn next(&mut self) -> Option<AmortizationRow> {
        if self.remaining_years() == 0 {
            return None;
        }

        let mut interest = Decimal::ZERO;
        let mut principal = Decimal::ZERO;
        let mut insurance = Decimal::ZERO;

        for _ in 0..MONTHS_PER_YEAR {
            let month_interest = self.balance.saturating_mul(self.monthly_rate);
            let month_principal = self.monthly_payment.saturating_sub(month_interest);

            interest = interest.saturating_add(month_interest);
            principal = principal.saturating_add(month_principal);
            insurance = insurance.saturating_add(self.monthly_insurance);
            self.balance = self.balance.saturating_sub(month_principal);
            self.month += 1;
        }

        Some(AmortizationRow {
            year: self.month / MONTHS_PER_YEAR,
            interest,
            principal,
            insurance,
            remaining_principal: self.balance.max(Decimal::ZERO),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining_years();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AmortizationSchedule {}

impl FusedIterator for AmortizationSchedule {}

/// Yearly amortization table; empty when `years` is zero.
pub fn schedule(
    principal: Money,
    annual_rate: Percent,
    years: u32,
    insurance_rate: Percent,
) -> Vec<AmortizationRow> {
    AmortizationSchedule::new(principal, annual_rate, years, insurance_rate).collect()
}

/// Aggregate interest, principal and insurance over a table.
pub fn totals(rows: &[AmortizationRow]) -> ScheduleTotals {
    let mut totals = ScheduleTotals::default();
    for row in rows {
        totals.total_interest = totals.total_interest.saturating_add(row.interest);
        totals.total_principal = totals.total_principal.saturating_add(row.principal);
        totals.total_insurance = totals.total_insurance.saturating_add(row.insurance);
    }
    totals.total_paid = totals
        .total_interest
        .saturating_add(totals.total_principal)
        .saturating_add(totals.total_insurance);
    totals
}
