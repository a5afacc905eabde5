//! Report assembly: trial balance, P&L, balance sheet, account ledger.
//!
//! Everything here is pure assembly over account activity sums that the
//! repository layer reads from the posted-entry log. No report consults a
//! mutable balance field.

pub mod service;
pub mod types;

pub use service::{AccountActivity, LedgerRowInput, ReportService};
pub use types::{
    AccountBalanceRow, AccountLedgerReport, AccountLedgerRow, BalanceSheetReport,
    BalanceSheetSection, ProfitAndLossReport, ProfitAndLossSection, TrialBalanceReport,
    TrialBalanceRow, TrialBalanceTotals,
};
