//! Fixed-asset depreciation schedules.

pub mod error;
pub mod schedule;

#[cfg(test)]
mod schedule_props;

pub use error::DepreciationError;
pub use schedule::{DepreciationMethod, DepreciationSchedule, PeriodDepreciation};
