//! Yields, cashflow and French rental taxation for a single investment.

pub mod calculator;
pub mod quick;
pub mod taxation;

pub use calculator::{
    analyze_investment, compute, validate_input, CashflowSummary, ComputationDetails,
    FiscalSummary, InvestmentInput, InvestmentOutput, LoanService, YieldSummary,
};
pub use quick::{quick_gross_yield, QuickEstimate};
pub use taxation::{TaxTreatment, TaxableIncome};
