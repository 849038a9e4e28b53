//! Rental investment profitability for French residential lettings.
//!
//! Two pure kernels sit at the centre of the crate:
//! - [`profitability::compute`] maps an [`InvestmentInput`] to yields,
//!   cashflow and tax under the micro or réel regimes;
//! - [`amortization::schedule`] produces the yearly amortization table of
//!   the loan.
//!
//! Both are total functions: degenerate inputs give zero yields, zero
//! payments or empty tables, never an error.
//!
//! ```rust
//! use rentaloc_core::profitability::{compute, InvestmentInput};
//! use rust_decimal_macros::dec;
//!
//! let input = InvestmentInput {
//!     purchase_price: dec!(100000),
//!     monthly_rent: dec!(800),
//!     ..Default::default()
//! };
//! let output = compute(&input);
//! assert_eq!(output.summary.gross_yield_percent, dec!(9.6));
//! ```

pub mod amortization;
pub mod error;
pub mod profitability;
pub mod time_value;
pub mod types;

#[cfg(feature = "profiles")]
pub mod profile;

#[cfg(feature = "projects")]
pub mod projects;

#[cfg(feature = "report")]
pub mod report;

pub use amortization::{schedule, AmortizationRow};
pub use error::RentalocError;
pub use profitability::{compute, InvestmentInput, InvestmentOutput};
pub use types::*;

/// Standard result type for fallible rentaloc operations
pub type RentalocResult<T> = Result<T, RentalocError>;
