//! Yearly loan amortization tables.

pub mod schedule;

pub use schedule::{
    schedule, totals, AmortizationRow, AmortizationSchedule, ScheduleInput, ScheduleTotals,
};
