//! Report repository: reads the posted-entry log and hands the sums to the
//! pure report assembler in `tally-core`.
//!
//! Reports never consult the balance cache. Activity sums include both
//! `posted` and `void` entries, since a voided entry and its reversal are
//! both in the log and net to zero.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use tally_core::ledger::Account;
use tally_core::reports::{
    AccountActivity, AccountLedgerReport, BalanceSheetReport, LedgerRowInput,
    ProfitAndLossReport, ReportService, TrialBalanceReport,
};
use tally_shared::types::{AccountId, FiscalPeriodId};

use crate::entities::{
    account_balances, accounts, fiscal_periods, journal_entries, journal_lines,
    sea_orm_active_enums::EntryStatus,
};

use super::account::to_account;

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Account code not found.
    #[error("Account code not found: {0}")]
    AccountCodeNotFound(String),

    /// Fiscal period not found.
    #[error("Fiscal period not found: {0}")]
    PeriodNotFound(Uuid),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// One account whose cached balance disagrees with the posted-entry log.
#[derive(Debug, Clone, Copy)]
pub struct BalanceMismatch {
    /// The account with the discrepancy.
    pub account_id: Uuid,
    /// Balance held in the `account_balances` cache.
    pub cached: Decimal,
    /// Balance recomputed from the posted-entry log.
    pub recomputed: Decimal,
}

/// Repository for financial report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds a trial balance for a fiscal period, as of its last day.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` for an unknown period.
    pub async fn trial_balance(
        &self,
        period_id: FiscalPeriodId,
    ) -> Result<TrialBalanceReport, ReportError> {
        let period = fiscal_periods::Entity::find_by_id(period_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(ReportError::PeriodNotFound(period_id.into_inner()))?;
        self.trial_balance_as_of(period.end_date).await
    }

    /// Builds a trial balance as of a date.
    ///
    /// # Errors
    ///
    /// Returns a database error if a query fails.
    pub async fn trial_balance_as_of(
        &self,
        as_of: NaiveDate,
    ) -> Result<TrialBalanceReport, ReportError> {
        let activities = self.account_activity(None, Some(as_of)).await?;
        Ok(ReportService::trial_balance(as_of, &activities))
    }

    /// Builds a profit & loss report for an inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` if `start > end`.
    pub async fn profit_and_loss(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ProfitAndLossReport, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        let activities = self.account_activity(Some(start), Some(end)).await?;
        Ok(ReportService::profit_and_loss(start, end, &activities))
    }

    /// Builds a balance sheet as of a date.
    ///
    /// # Errors
    ///
    /// Returns a database error if a query fails.
    pub async fn balance_sheet(&self, as_of: NaiveDate) -> Result<BalanceSheetReport, ReportError> {
        let activities = self.account_activity(None, Some(as_of)).await?;
        Ok(ReportService::balance_sheet(as_of, &activities))
    }

    /// Builds an account ledger listing for an inclusive date range.
    ///
    /// The opening balance is the account's activity before `start`; rows are
    /// ordered by entry date, then posting order.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` for an unknown account
    /// - `InvalidDateRange` if `start > end`
    pub async fn account_ledger(
        &self,
        account_id: AccountId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AccountLedgerReport, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }

        let account = accounts::Entity::find_by_id(account_id.into_inner())
            .one(&self.db)
            .await?
            .map(to_account)
            .ok_or(ReportError::AccountNotFound(account_id.into_inner()))?;

        let opening_balance = match start.pred_opt() {
            Some(day_before) => self.single_account_balance(&account, day_before).await?,
            None => Decimal::ZERO,
        };

        let rows = self.ledger_rows(&account, start, end).await?;
        Ok(ReportService::account_ledger(&account, opening_balance, &rows))
    }

    /// Returns one account's balance in its normal direction as of a date.
    ///
    /// Accounts are addressed by code, the stable external identifier.
    ///
    /// # Errors
    ///
    /// Returns `AccountCodeNotFound` for an unknown code.
    pub async fn account_balance(
        &self,
        account_code: &str,
        as_of: NaiveDate,
    ) -> Result<Decimal, ReportError> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(account_code))
            .one(&self.db)
            .await?
            .map(to_account)
            .ok_or_else(|| ReportError::AccountCodeNotFound(account_code.to_string()))?;

        self.single_account_balance(&account, as_of).await
    }

    /// Proves the balance cache against the posted-entry log.
    ///
    /// Recomputes every account's balance from scratch and compares it with
    /// the cached row (a missing row counts as zero). The cache is a read
    /// optimization only; the log is the source of truth, so any mismatch
    /// returned here means the cache needs rebuilding.
    ///
    /// # Errors
    ///
    /// Returns a database error if a query fails.
    pub async fn reconcile_balances(&self) -> Result<Vec<BalanceMismatch>, ReportError> {
        let cached: HashMap<Uuid, Decimal> = account_balances::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| (row.account_id, row.balance))
            .collect();

        let mut mismatches = Vec::new();
        for activity in self.account_activity(None, None).await? {
            let account_id = activity.account.id.into_inner();
            let recomputed = activity.balance();
            let cached_balance = cached.get(&account_id).copied().unwrap_or(Decimal::ZERO);
            if recomputed != cached_balance {
                tracing::warn!(
                    account_id = %account_id,
                    %cached_balance,
                    %recomputed,
                    "balance cache disagrees with posted-entry log"
                );
                mismatches.push(BalanceMismatch {
                    account_id,
                    cached: cached_balance,
                    recomputed,
                });
            }
        }
        Ok(mismatches)
    }

    /// Sums every account's posted activity within a date window.
    ///
    /// Totals come from one grouped sum over the lines of the captured entry
    /// set, so every account sees the same snapshot of the log.
    ///
    /// # Errors
    ///
    /// Returns a database error if a query fails.
    pub async fn account_activity(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AccountActivity>, ReportError> {
        let account_rows = accounts::Entity::find()
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?;

        let entry_ids = self.logged_entry_ids(from, to).await?;

        let mut totals: HashMap<Uuid, (Decimal, Decimal)> = HashMap::new();
        if !entry_ids.is_empty() {
            let rows: Vec<(Uuid, Option<Decimal>, Option<Decimal>)> = journal_lines::Entity::find()
                .filter(journal_lines::Column::EntryId.is_in(entry_ids))
                .select_only()
                .column(journal_lines::Column::AccountId)
                .column_as(journal_lines::Column::Debit.sum(), "debit_total")
                .column_as(journal_lines::Column::Credit.sum(), "credit_total")
                .group_by(journal_lines::Column::AccountId)
                .into_tuple()
                .all(&self.db)
                .await?;
            for (account_id, debit, credit) in rows {
                totals.insert(
                    account_id,
                    (
                        debit.unwrap_or(Decimal::ZERO),
                        credit.unwrap_or(Decimal::ZERO),
                    ),
                );
            }
        }

        Ok(account_rows
            .into_iter()
            .map(|row| {
                let account = to_account(row);
                let (debit_total, credit_total) = totals
                    .get(&account.id.into_inner())
                    .copied()
                    .unwrap_or((Decimal::ZERO, Decimal::ZERO));
                AccountActivity {
                    account,
                    debit_total,
                    credit_total,
                }
            })
            .collect())
    }

    /// Ids of logged (posted or void) entries within the date window. Draft
    /// entries are invisible to reports.
    async fn logged_entry_ids(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Uuid>, ReportError> {
        let mut query = journal_entries::Entity::find()
            .filter(journal_entries::Column::Status.is_in([EntryStatus::Posted, EntryStatus::Void]));
        if let Some(from) = from {
            query = query.filter(journal_entries::Column::EntryDate.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(journal_entries::Column::EntryDate.lte(to));
        }

        Ok(query
            .select_only()
            .column(journal_entries::Column::Id)
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await?)
    }

    async fn account_totals(
        &self,
        account_id: AccountId,
        entry_ids: &[Uuid],
    ) -> Result<(Decimal, Decimal), ReportError> {
        let totals: Option<(Option<Decimal>, Option<Decimal>)> = journal_lines::Entity::find()
            .filter(journal_lines::Column::AccountId.eq(account_id.into_inner()))
            .filter(journal_lines::Column::EntryId.is_in(entry_ids.iter().copied()))
            .select_only()
            .column_as(journal_lines::Column::Debit.sum(), "debit_total")
            .column_as(journal_lines::Column::Credit.sum(), "credit_total")
            .into_tuple()
            .one(&self.db)
            .await?;

        let (debit, credit) = totals.unwrap_or((None, None));
        Ok((
            debit.unwrap_or(Decimal::ZERO),
            credit.unwrap_or(Decimal::ZERO),
        ))
    }

    async fn single_account_balance(
        &self,
        account: &Account,
        as_of: NaiveDate,
    ) -> Result<Decimal, ReportError> {
        let entry_ids = self.logged_entry_ids(None, Some(as_of)).await?;
        if entry_ids.is_empty() {
            return Ok(Decimal::ZERO);
        }
        let (debit_total, credit_total) = self.account_totals(account.id, &entry_ids).await?;
        let activity = AccountActivity {
            account: account.clone(),
            debit_total,
            credit_total,
        };
        Ok(activity.balance())
    }

    async fn ledger_rows(
        &self,
        account: &Account,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerRowInput>, ReportError> {
        let rows = journal_lines::Entity::find()
            .find_also_related(journal_entries::Entity)
            .filter(journal_lines::Column::AccountId.eq(account.id.into_inner()))
            .filter(journal_entries::Column::Status.is_in([EntryStatus::Posted, EntryStatus::Void]))
            .filter(journal_entries::Column::EntryDate.gte(start))
            .filter(journal_entries::Column::EntryDate.lte(end))
            .order_by_asc(journal_entries::Column::EntryDate)
            .order_by_asc(journal_entries::Column::CreatedAt)
            .order_by_asc(journal_lines::Column::LineNumber)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(line, entry)| {
                entry.map(|entry| LedgerRowInput {
                    entry_id: entry.id,
                    entry_date: entry.entry_date,
                    description: entry.description,
                    debit: line.debit,
                    credit: line.credit,
                })
            })
            .collect())
    }
}
