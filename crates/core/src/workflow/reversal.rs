//! Reversal construction for voiding posted entries.
//!
//! A reversal is a new journal entry mirroring the original with debits and
//! credits swapped. Posting the reversal marks the original Void; the ledger
//! itself is append-only and the pair nets to zero.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, JournalEntryId, UserId};

use crate::fiscal::{find_period, FiscalPeriod};
use crate::ledger::{CandidateEntry, EntryStatus, LineInput, Side};

use super::error::WorkflowError;

/// A line of the entry being reversed.
#[derive(Debug, Clone)]
pub struct OriginalLine {
    /// The account the original line posted to.
    pub account_id: AccountId,
    /// The original side.
    pub side: Side,
    /// The original amount.
    pub amount: Decimal,
    /// The original line description.
    pub description: Option<String>,
}

/// The entry being reversed, as read back from the ledger.
#[derive(Debug, Clone)]
pub struct OriginalEntry {
    /// The entry's identifier.
    pub id: JournalEntryId,
    /// The original entry date.
    pub entry_date: NaiveDate,
    /// The original description.
    pub description: String,
    /// Current status.
    pub status: EntryStatus,
    /// The reversal that already voided this entry, if any.
    pub reversed_by: Option<JournalEntryId>,
    /// The original lines.
    pub lines: Vec<OriginalLine>,
}

/// Stateless service for building reversal entries.
pub struct ReversalService;

impl ReversalService {
    /// Builds the reversal candidate for a posted entry.
    ///
    /// Each original line reappears with its side swapped and its amount
    /// unchanged. The reversal is dated at `reversal_date` (callers typically
    /// pass today), which must fall in an open fiscal period.
    ///
    /// # Errors
    ///
    /// - `NotReversible` if the entry is not posted
    /// - `AlreadyReversed` if a reversal already exists
    /// - `VoidReasonRequired` if `reason` is blank
    /// - `ReversalPeriodClosed` if `reversal_date` is not in an open period
    pub fn build_reversal(
        original: &OriginalEntry,
        periods: &[FiscalPeriod],
        reversal_date: NaiveDate,
        reason: &str,
        created_by: UserId,
    ) -> Result<CandidateEntry, WorkflowError> {
        if original.status != EntryStatus::Posted {
            return Err(WorkflowError::NotReversible {
                entry_id: original.id.into_inner(),
                status: original.status,
            });
        }
        if let Some(reversal_id) = original.reversed_by {
            return Err(WorkflowError::AlreadyReversed {
                entry_id: original.id.into_inner(),
                reversal_entry_id: reversal_id.into_inner(),
            });
        }
        if reason.trim().is_empty() {
            return Err(WorkflowError::VoidReasonRequired);
        }

        Self::check_reversal_date(reversal_date, periods)?;

        let lines = original
            .lines
            .iter()
            .map(|line| LineInput {
                account_id: line.account_id,
                side: line.side.opposite(),
                amount: line.amount,
                description: line.description.clone(),
            })
            .collect();

        Ok(CandidateEntry {
            entry_date: reversal_date,
            description: format!("Reversal of entry {}: {}", original.id, reason),
            reference: None,
            source: None,
            reverses: Some(original.id),
            lines,
            created_by,
        })
    }

    /// Checks that a reversal may be dated `reversal_date`.
    ///
    /// # Errors
    ///
    /// Returns `ReversalPeriodClosed` when no open period contains the date.
    pub fn check_reversal_date(
        reversal_date: NaiveDate,
        periods: &[FiscalPeriod],
    ) -> Result<(), WorkflowError> {
        match find_period(periods, reversal_date) {
            Some(period) if period.is_open() => Ok(()),
            _ => Err(WorkflowError::ReversalPeriodClosed(reversal_date)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fiscal::{monthly_periods, PeriodStatus};
    use rust_decimal_macros::dec;

    fn posted_entry() -> OriginalEntry {
        OriginalEntry {
            id: JournalEntryId::new(),
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            description: "Invoice INV-001".to_string(),
            status: EntryStatus::Posted,
            reversed_by: None,
            lines: vec![
                OriginalLine {
                    account_id: AccountId::new(),
                    side: Side::Debit,
                    amount: dec!(110.00),
                    description: Some("Receivable".to_string()),
                },
                OriginalLine {
                    account_id: AccountId::new(),
                    side: Side::Credit,
                    amount: dec!(100.00),
                    description: None,
                },
                OriginalLine {
                    account_id: AccountId::new(),
                    side: Side::Credit,
                    amount: dec!(10.00),
                    description: Some("VAT".to_string()),
                },
            ],
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 4).unwrap()
    }

    #[test]
    fn test_build_reversal_swaps_sides() {
        let original = posted_entry();
        let periods = monthly_periods(2026);

        let reversal =
            ReversalService::build_reversal(&original, &periods, today(), "Duplicate", UserId::new())
                .unwrap();

        assert_eq!(reversal.lines.len(), 3);
        assert_eq!(reversal.lines[0].side, Side::Credit);
        assert_eq!(reversal.lines[1].side, Side::Debit);
        assert_eq!(reversal.lines[2].side, Side::Debit);
        assert_eq!(reversal.lines[0].amount, dec!(110.00));
        assert_eq!(reversal.lines[0].account_id, original.lines[0].account_id);
        assert_eq!(reversal.reverses, Some(original.id));
        assert!(reversal.description.contains("Duplicate"));
    }

    #[test]
    fn test_reversal_dated_at_requested_date() {
        let original = posted_entry();
        let periods = monthly_periods(2026);

        let reversal =
            ReversalService::build_reversal(&original, &periods, today(), "Error", UserId::new())
                .unwrap();
        assert_eq!(reversal.entry_date, today());
        assert_ne!(reversal.entry_date, original.entry_date);
    }

    #[test]
    fn test_reversal_date_in_closed_period_rejected() {
        let original = posted_entry();
        let mut periods = monthly_periods(2026);
        periods[6].status = PeriodStatus::Closed;

        let result =
            ReversalService::build_reversal(&original, &periods, today(), "Error", UserId::new());
        assert!(matches!(
            result,
            Err(WorkflowError::ReversalPeriodClosed(date)) if date == today()
        ));
    }

    #[test]
    fn test_reversal_requires_posted_status() {
        let mut original = posted_entry();
        original.status = EntryStatus::Draft;
        let periods = monthly_periods(2026);

        let result =
            ReversalService::build_reversal(&original, &periods, today(), "x", UserId::new());
        assert!(matches!(result, Err(WorkflowError::NotReversible { .. })));
    }

    #[test]
    fn test_double_reversal_rejected() {
        let mut original = posted_entry();
        original.reversed_by = Some(JournalEntryId::new());
        let periods = monthly_periods(2026);

        let result =
            ReversalService::build_reversal(&original, &periods, today(), "x", UserId::new());
        assert!(matches!(result, Err(WorkflowError::AlreadyReversed { .. })));
    }

    #[test]
    fn test_blank_reason_rejected() {
        let original = posted_entry();
        let periods = monthly_periods(2026);

        let result =
            ReversalService::build_reversal(&original, &periods, today(), "  ", UserId::new());
        assert!(matches!(result, Err(WorkflowError::VoidReasonRequired)));
    }

    #[test]
    fn test_reversal_date_outside_all_periods_rejected() {
        let original = posted_entry();
        let periods = monthly_periods(2026);
        let date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();

        let result =
            ReversalService::build_reversal(&original, &periods, date, "x", UserId::new());
        assert!(matches!(
            result,
            Err(WorkflowError::ReversalPeriodClosed(_))
        ));
    }
}
