//! Chart of accounts value types.

use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

use super::types::Side;

/// The five fundamental account types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned (cash, receivables, inventory, fixed assets).
    Asset,
    /// Obligations owed (payables, taxes due, loans).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// The side on which this account type normally carries its balance.
    ///
    /// Asset/Expense accounts are debit-normal; Liability/Equity/Revenue
    /// accounts are credit-normal.
    #[must_use]
    pub const fn normal_balance(self) -> Side {
        match self {
            Self::Asset | Self::Expense => Side::Debit,
            Self::Liability | Self::Equity | Self::Revenue => Side::Credit,
        }
    }

    /// Returns true if this account type is debit-normal.
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self.normal_balance(), Side::Debit)
    }
}

/// Account subtypes used for report grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountSubtype {
    /// Cash on hand.
    Cash,
    /// Bank and deposit accounts.
    Bank,
    /// Trade receivables.
    AccountsReceivable,
    /// Inventory asset.
    Inventory,
    /// Property, plant, and equipment.
    FixedAsset,
    /// Contra-asset accumulating depreciation charges.
    AccumulatedDepreciation,
    /// Other assets.
    OtherAsset,
    /// Trade payables.
    AccountsPayable,
    /// Taxes collected but not yet remitted.
    TaxPayable,
    /// Other liabilities.
    OtherLiability,
    /// Owner's equity.
    OwnerEquity,
    /// Retained earnings.
    RetainedEarnings,
    /// Operating revenue.
    OperatingRevenue,
    /// Other revenue.
    OtherRevenue,
    /// Cost of goods sold.
    CostOfGoodsSold,
    /// Operating expenses.
    OperatingExpense,
    /// Depreciation expense.
    DepreciationExpense,
    /// Other expenses (interest, write-offs).
    OtherExpense,
}

/// An account in the chart of accounts.
///
/// Accounts are created at setup and rarely mutated. Once referenced by a
/// posted line an account may be deactivated but never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Stable, unique account code (e.g. "1200").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Fundamental account type.
    pub account_type: AccountType,
    /// Subtype for report grouping.
    pub subtype: Option<AccountSubtype>,
    /// Whether the account accepts new postings.
    pub is_active: bool,
}
