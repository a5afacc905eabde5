//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One account's balance within a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalanceRow {
    /// Account ID.
    pub account_id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Total debits posted to the account.
    pub total_debit: Decimal,
    /// Total credits posted to the account.
    pub total_credit: Decimal,
    /// Balance in the account's normal direction.
    pub balance: Decimal,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// As-of date.
    pub as_of: NaiveDate,
    /// One row per account with activity, ordered by code.
    pub rows: Vec<TrialBalanceRow>,
    /// Column totals.
    pub totals: TrialBalanceTotals,
}

/// One trial balance row: the account's net balance placed in its column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account ID.
    pub account_id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Debit column (zero if the net balance is a credit).
    pub debit: Decimal,
    /// Credit column (zero if the net balance is a debit).
    pub credit: Decimal,
}

/// Trial balance column totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Whether the columns are equal.
    pub is_balanced: bool,
}

/// A named section of the P&L or balance sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfitAndLossSection {
    /// Section total.
    pub total: Decimal,
    /// Accounts contributing to the section.
    pub rows: Vec<AccountBalanceRow>,
}

/// Profit & loss report for a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitAndLossReport {
    /// First day of the range.
    pub period_start: NaiveDate,
    /// Last day of the range (inclusive).
    pub period_end: NaiveDate,
    /// Revenue section.
    pub revenue: ProfitAndLossSection,
    /// Cost of sales section.
    pub cost_of_sales: ProfitAndLossSection,
    /// Revenue minus cost of sales.
    pub gross_profit: Decimal,
    /// Operating expenses section.
    pub operating_expenses: ProfitAndLossSection,
    /// Gross profit minus operating expenses.
    pub operating_income: Decimal,
    /// Other expenses section.
    pub other_expenses: ProfitAndLossSection,
    /// Operating income minus other expenses.
    pub net_income: Decimal,
}

/// A balance sheet section (assets, liabilities, or equity).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheetSection {
    /// Section total.
    pub total: Decimal,
    /// Accounts in the section.
    pub rows: Vec<AccountBalanceRow>,
}

/// Balance sheet as of a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// As-of date.
    pub as_of: NaiveDate,
    /// Assets section.
    pub assets: BalanceSheetSection,
    /// Liabilities section.
    pub liabilities: BalanceSheetSection,
    /// Equity section, including current period earnings.
    pub equity: BalanceSheetSection,
    /// Total assets.
    pub total_assets: Decimal,
    /// Liabilities plus equity.
    pub liabilities_and_equity: Decimal,
    /// Whether `assets == liabilities + equity`.
    pub is_balanced: bool,
}

/// One posted line in an account ledger listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountLedgerRow {
    /// The owning journal entry.
    pub entry_id: Uuid,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Debit amount (zero if credit).
    pub debit: Decimal,
    /// Credit amount (zero if debit).
    pub credit: Decimal,
    /// Balance after this line, in the account's normal direction.
    pub running_balance: Decimal,
}

/// Detailed activity listing for one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountLedgerReport {
    /// Account ID.
    pub account_id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Balance before the first listed row.
    pub opening_balance: Decimal,
    /// The rows, ordered by entry date.
    pub rows: Vec<AccountLedgerRow>,
    /// Balance after the last row.
    pub closing_balance: Decimal,
}
