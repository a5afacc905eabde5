//! Ledger error types for validation and posting failures.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Journal entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines")]
    InsufficientLines,

    /// Journal entry is not balanced (debits != credits).
    #[error("Journal entry is not balanced. Debits: {debits}, Credits: {credits}")]
    UnbalancedEntry {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    /// Line amount cannot be zero.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line amount cannot be negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    /// Line amount carries more precision than minor units allow.
    #[error("Line amount {0} has sub-minor-unit precision")]
    SubMinorUnitAmount(Decimal),

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Account is inactive and cannot accept postings.
    #[error("Account {0} is inactive")]
    AccountInactive(Uuid),

    /// Account code already in use.
    #[error("Account code already in use: {0}")]
    DuplicateAccountCode(String),

    /// Account has posted lines and cannot be deleted.
    #[error("Account {0} has posted lines and cannot be deleted")]
    AccountHasPostings(Uuid),

    // ========== Fiscal Period Errors ==========
    /// No fiscal period covers the entry date.
    #[error("No fiscal period found for date {0}")]
    NoFiscalPeriod(NaiveDate),

    /// Fiscal period is closed, no posting allowed.
    #[error("Fiscal period containing {0} is closed, no posting allowed")]
    PeriodClosed(NaiveDate),

    // ========== Posting Errors ==========
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(Uuid),

    /// A journal entry already exists for this source document.
    #[error("Journal entry {existing_entry_id} already posted for this source document")]
    DuplicatePosting {
        /// The previously posted entry.
        existing_entry_id: Uuid,
    },

    /// Concurrent modification detected.
    #[error("Concurrent modification detected, please retry")]
    ConcurrentModification,

    // ========== Infrastructure Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the stable error code for logs and API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::SubMinorUnitAmount(_) => "SUB_MINOR_UNIT_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::DuplicateAccountCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::AccountHasPostings(_) => "ACCOUNT_HAS_POSTINGS",
            Self::NoFiscalPeriod(_) => "NO_FISCAL_PERIOD",
            Self::PeriodClosed(_) => "PERIOD_CLOSED",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::DuplicatePosting { .. } => "DUPLICATE_POSTING",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if retrying the operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::InsufficientLines.error_code(), "INSUFFICIENT_LINES");
        assert_eq!(
            LedgerError::UnbalancedEntry {
                debits: Decimal::new(10000, 2),
                credits: Decimal::new(5000, 2),
            }
            .error_code(),
            "UNBALANCED_ENTRY"
        );
        assert_eq!(LedgerError::ZeroAmount.error_code(), "ZERO_AMOUNT");
    }

    #[test]
    fn test_retryable_errors() {
        assert!(LedgerError::ConcurrentModification.is_retryable());
        assert!(!LedgerError::InsufficientLines.is_retryable());
        assert!(!LedgerError::Database("boom".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::UnbalancedEntry {
            debits: Decimal::new(10000, 2),
            credits: Decimal::new(5000, 2),
        };
        assert_eq!(
            err.to_string(),
            "Journal entry is not balanced. Debits: 100.00, Credits: 50.00"
        );
    }
}
