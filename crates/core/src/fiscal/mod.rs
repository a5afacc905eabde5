//! Fiscal period rules.

pub mod period;

pub use period::{find_period, monthly_periods, FiscalPeriod, PeriodStatus};
