//! Journal entry validation.
//!
//! This module provides the core business logic for validating candidate
//! journal entries before they are persisted. It is pure: accounts and
//! fiscal periods are supplied through lookup closures so the same rules
//! run identically in unit tests and against the database.

use rust_decimal::Decimal;
use tally_shared::types::AccountId;

use super::account::Account;
use super::error::LedgerError;
use super::types::{CandidateEntry, EntryTotals, LineInput, Side, ValidatedEntry, ValidatedLine};
use crate::fiscal::FiscalPeriod;

/// Minor-unit precision for amounts (2 decimal places).
const MINOR_UNIT_SCALE: u32 = 2;

/// Journal entry validator.
///
/// Contains pure business logic with no database dependencies.
pub struct LedgerService;

impl LedgerService {
    /// Validates a candidate entry against the full rule set.
    ///
    /// Checks, in order:
    /// 1. At least 2 lines
    /// 2. Each amount positive, non-zero, minor-unit precision
    /// 3. Each account exists and is active
    /// 4. The entry date falls in an open fiscal period
    /// 5. Debits equal credits exactly
    ///
    /// # Errors
    ///
    /// Returns the first `LedgerError` encountered; validation is
    /// all-or-nothing and has no side effects.
    pub fn validate<A, P>(
        candidate: &CandidateEntry,
        account_lookup: A,
        period_lookup: P,
    ) -> Result<ValidatedEntry, LedgerError>
    where
        A: Fn(AccountId) -> Option<Account>,
        P: Fn(chrono::NaiveDate) -> Option<FiscalPeriod>,
    {
        if candidate.lines.len() < 2 {
            return Err(LedgerError::InsufficientLines);
        }

        let mut lines = Vec::with_capacity(candidate.lines.len());
        for line in &candidate.lines {
            lines.push(Self::validate_line(line, &account_lookup)?);
        }

        let period = period_lookup(candidate.entry_date)
            .ok_or(LedgerError::NoFiscalPeriod(candidate.entry_date))?;
        period.check_open(candidate.entry_date)?;

        let totals = EntryTotals::from_lines(&lines);
        if !totals.is_balanced {
            return Err(LedgerError::UnbalancedEntry {
                debits: totals.debits,
                credits: totals.credits,
            });
        }

        Ok(ValidatedEntry::new(candidate, lines))
    }

    fn validate_line<A>(line: &LineInput, account_lookup: &A) -> Result<ValidatedLine, LedgerError>
    where
        A: Fn(AccountId) -> Option<Account>,
    {
        if line.amount == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount);
        }
        if line.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        if line.amount != line.amount.round_dp(MINOR_UNIT_SCALE) {
            return Err(LedgerError::SubMinorUnitAmount(line.amount));
        }

        let account = account_lookup(line.account_id)
            .ok_or_else(|| LedgerError::AccountNotFound(line.account_id.into_inner()))?;
        if !account.is_active {
            return Err(LedgerError::AccountInactive(line.account_id.into_inner()));
        }

        let (debit, credit) = match line.side {
            Side::Debit => (line.amount, Decimal::ZERO),
            Side::Credit => (Decimal::ZERO, line.amount),
        };

        Ok(ValidatedLine {
            account_id: line.account_id,
            account_type: account.account_type,
            debit,
            credit,
            description: line.description.clone(),
        })
    }
}
