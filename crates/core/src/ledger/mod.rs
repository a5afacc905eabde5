//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Journal line and entry domain types
//! - Chart of accounts value types
//! - Balance calculations per account type
//! - Business rule validation for candidate entries
//! - Error types for ledger operations

pub mod account;
pub mod balance;
pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use account::{Account, AccountSubtype, AccountType};
pub use balance::{balance_change, RunningBalance};
pub use error::LedgerError;
pub use types::{
    CandidateEntry, EntryStatus, EntryTotals, LineInput, Side, SourceDocumentRef,
    SourceDocumentType, ValidatedEntry, ValidatedLine,
};
pub use validation::LedgerService;
