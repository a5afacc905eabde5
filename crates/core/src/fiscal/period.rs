//! Fiscal period types.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tally_shared::types::FiscalPeriodId;

use crate::ledger::LedgerError;

/// Status of a fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is open for postings.
    Open,
    /// Period is closed, no new postings allowed.
    Closed,
}

/// A fiscal period (typically one calendar month).
///
/// Periods partition the calendar without gaps or overlaps. Posting requires
/// the period containing the entry date to be open; a reversal is dated at
/// the caller's reversal date, which must also sit in an open period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// Period name (e.g., "2026-03").
    pub name: String,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Current status.
    pub status: PeriodStatus,
}

impl FiscalPeriod {
    /// Returns true if entries can be posted into this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks that this period accepts a posting dated `date`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodClosed` if the period is closed.
    pub fn check_open(&self, date: NaiveDate) -> Result<(), LedgerError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(LedgerError::PeriodClosed(date))
        }
    }

    /// Returns the period number within its year (1-12 for monthly periods).
    #[must_use]
    pub fn period_number(&self) -> u32 {
        self.start_date.month()
    }
}

/// Generates the twelve monthly periods of a calendar year, all open.
#[must_use]
pub fn monthly_periods(year: i32) -> Vec<FiscalPeriod> {
    (1..=12u32)
        .filter_map(|month| {
            let start_date = NaiveDate::from_ymd_opt(year, month, 1)?;
            let next = if month == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1)?
            } else {
                NaiveDate::from_ymd_opt(year, month + 1, 1)?
            };
            let end_date = next.pred_opt()?;
            Some(FiscalPeriod {
                id: FiscalPeriodId::new(),
                name: format!("{year}-{month:02}"),
                start_date,
                end_date,
                status: PeriodStatus::Open,
            })
        })
        .collect()
}

/// Finds the period containing `date` in a slice of periods.
#[must_use]
pub fn find_period(periods: &[FiscalPeriod], date: NaiveDate) -> Option<&FiscalPeriod> {
    periods.iter().find(|p| p.contains(date))
}
