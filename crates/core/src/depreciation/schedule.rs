//! Depreciation schedule calculation.
//!
//! A schedule yields one `(period-end date, amount)` pair per period of the
//! asset's useful life. Amounts are rounded to minor units each period and
//! the final period absorbs the rounding remainder, so the sequence always
//! sums to exactly `cost - residual`.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::AssetId;

use super::error::DepreciationError;

/// Minor-unit precision for period amounts.
const MINOR_UNIT_SCALE: u32 = 2;

/// Depreciation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationMethod {
    /// Equal amount per period.
    StraightLine,
    /// 150% declining balance with switch to straight-line.
    DecliningBalance,
    /// 200% declining balance with switch to straight-line.
    DoubleDeclining,
    /// Proportional to units consumed per period.
    UnitsOfProduction,
}

impl DepreciationMethod {
    /// The declining-balance factor, if this is a declining method.
    fn declining_factor(self) -> Option<Decimal> {
        match self {
            Self::DecliningBalance => Some(Decimal::new(15, 1)),
            Self::DoubleDeclining => Some(Decimal::TWO),
            Self::StraightLine | Self::UnitsOfProduction => None,
        }
    }
}

/// One period's depreciation charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodDepreciation {
    /// Zero-based period index.
    pub sequence: u32,
    /// Last day of the period (monthly periods from the start date).
    pub period_end: NaiveDate,
    /// The depreciation amount for this period.
    pub amount: Decimal,
}

/// A depreciation schedule for one fixed asset.
///
/// The schedule itself is immutable; `periods()` returns a fresh lazy
/// iterator each call, so the sequence is restartable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationSchedule {
    /// The asset being depreciated.
    pub asset_id: AssetId,
    /// Calculation method.
    pub method: DepreciationMethod,
    /// Acquisition cost.
    pub cost: Decimal,
    /// Expected value at end of life.
    pub residual: Decimal,
    /// Useful life in periods (months).
    pub life_periods: u32,
    /// First day of the first period.
    pub start_date: NaiveDate,
    /// Total estimated units over the life (units-of-production only).
    pub total_units: Option<Decimal>,
    /// Units consumed per period (units-of-production only, missing = 0).
    usage: Vec<Decimal>,
}

impl DepreciationSchedule {
    /// Creates a schedule, validating its parameters.
    ///
    /// # Errors
    ///
    /// - `ZeroLife` if `life_periods` is 0
    /// - `NonPositiveCost` / `NegativeResidual` for malformed amounts
    /// - `ResidualNotBelowCost` if `residual >= cost`
    /// - `MissingTotalUnits` for units-of-production without a positive
    ///   total unit estimate
    pub fn new(
        asset_id: AssetId,
        method: DepreciationMethod,
        cost: Decimal,
        residual: Decimal,
        life_periods: u32,
        start_date: NaiveDate,
    ) -> Result<Self, DepreciationError> {
        if life_periods == 0 {
            return Err(DepreciationError::ZeroLife);
        }
        if cost <= Decimal::ZERO {
            return Err(DepreciationError::NonPositiveCost(cost));
        }
        if residual < Decimal::ZERO {
            return Err(DepreciationError::NegativeResidual(residual));
        }
        if residual >= cost {
            return Err(DepreciationError::ResidualNotBelowCost { cost, residual });
        }

        Ok(Self {
            asset_id,
            method,
            cost,
            residual,
            life_periods,
            start_date,
            total_units: None,
            usage: Vec::new(),
        })
    }

    /// Supplies the unit estimates for a units-of-production schedule.
    ///
    /// Periods beyond the end of `usage` are treated as zero consumption;
    /// the final period still absorbs whatever base remains undepreciated.
    ///
    /// # Errors
    ///
    /// Returns `MissingTotalUnits` if `total_units` is not positive.
    pub fn with_usage(
        mut self,
        total_units: Decimal,
        usage: Vec<Decimal>,
    ) -> Result<Self, DepreciationError> {
        if total_units <= Decimal::ZERO {
            return Err(DepreciationError::MissingTotalUnits);
        }
        self.total_units = Some(total_units);
        self.usage = usage;
        Ok(self)
    }

    /// The total amount to be written off: `cost - residual`.
    #[must_use]
    pub fn depreciable_base(&self) -> Decimal {
        self.cost - self.residual
    }

    /// Returns a fresh lazy iterator over the period charges.
    ///
    /// # Errors
    ///
    /// Returns `MissingTotalUnits` for a units-of-production schedule whose
    /// usage was never supplied with `with_usage`.
    pub fn periods(&self) -> Result<Periods<'_>, DepreciationError> {
        if self.method == DepreciationMethod::UnitsOfProduction && self.total_units.is_none() {
            return Err(DepreciationError::MissingTotalUnits);
        }
        Ok(Periods {
            schedule: self,
            index: 0,
            accumulated: Decimal::ZERO,
        })
    }

    /// Last day of the zero-based period `k`, with monthly periods starting
    /// in the month of `start_date`.
    fn period_end(&self, k: u32) -> NaiveDate {
        let months = self.start_date.month0() + k;
        let year = self.start_date.year() + i32::try_from(months / 12).unwrap_or(i32::MAX);
        let month = months % 12 + 1;
        let first_of_next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        first_of_next
            .and_then(|d| d.pred_opt())
            .unwrap_or(self.start_date)
    }

    /// The raw (unclamped) charge for period `k` given the remaining state.
    fn raw_amount(&self, k: u32, book_value: Decimal) -> Decimal {
        let life = Decimal::from(self.life_periods);
        match self.method {
            DepreciationMethod::StraightLine => {
                (self.depreciable_base() / life).round_dp(MINOR_UNIT_SCALE)
            }
            DepreciationMethod::DecliningBalance | DepreciationMethod::DoubleDeclining => {
                // Declining charge on remaining book value, switching to
                // straight-line over the remaining periods once that yields
                // the larger write-off.
                let factor = match self.method.declining_factor() {
                    Some(f) => f,
                    None => Decimal::ONE,
                };
                let rate = factor / life;
                let declining = (book_value * rate).round_dp(MINOR_UNIT_SCALE);
                let remaining_periods = Decimal::from(self.life_periods - k);
                let straight = ((book_value - self.residual) / remaining_periods)
                    .round_dp(MINOR_UNIT_SCALE);
                declining.max(straight)
            }
            DepreciationMethod::UnitsOfProduction => {
                let units = self.usage.get(k as usize).copied().unwrap_or(Decimal::ZERO);
                let total = self.total_units.unwrap_or(Decimal::ONE);
                (self.depreciable_base() * units / total).round_dp(MINOR_UNIT_SCALE)
            }
        }
    }
}

/// Lazy iterator over a schedule's period charges.
#[derive(Debug)]
pub struct Periods<'a> {
    schedule: &'a DepreciationSchedule,
    index: u32,
    accumulated: Decimal,
}

impl Iterator for Periods<'_> {
    type Item = PeriodDepreciation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.schedule.life_periods {
            return None;
        }
        let k = self.index;
        let remaining_base = self.schedule.depreciable_base() - self.accumulated;

        let amount = if k == self.schedule.life_periods - 1 {
            // Final period absorbs the rounding remainder.
            remaining_base
        } else {
            let book_value = self.schedule.cost - self.accumulated;
            self.schedule
                .raw_amount(k, book_value)
                .clamp(Decimal::ZERO, remaining_base)
        };

        self.accumulated += amount;
        self.index += 1;

        Some(PeriodDepreciation {
            sequence: k,
            period_end: self.schedule.period_end(k),
            amount,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.schedule.life_periods - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Periods<'_> {}
