//! Workflow error types for entry lifecycle operations.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::ledger::EntryStatus;

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// The current status.
        from: EntryStatus,
        /// The attempted target status.
        to: EntryStatus,
    },

    /// Attempted to modify a posted entry.
    #[error("Cannot modify posted entry")]
    CannotModifyPosted,

    /// Only posted entries can be reversed.
    #[error("Only posted entries can be reversed; entry {entry_id} is {status:?}")]
    NotReversible {
        /// The entry being reversed.
        entry_id: Uuid,
        /// Its current status.
        status: EntryStatus,
    },

    /// The entry has already been reversed.
    #[error("Entry {entry_id} was already reversed by entry {reversal_entry_id}")]
    AlreadyReversed {
        /// The entry being reversed.
        entry_id: Uuid,
        /// The existing reversal entry.
        reversal_entry_id: Uuid,
    },

    /// Void reason is required but not provided.
    #[error("Void reason is required")]
    VoidReasonRequired,

    /// The requested reversal date does not fall in an open fiscal period.
    #[error("Reversal date {0} does not fall in an open fiscal period")]
    ReversalPeriodClosed(NaiveDate),

    /// Journal entry not found.
    #[error("Journal entry {0} not found")]
    EntryNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl WorkflowError {
    /// Returns the stable error code for logs and API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::CannotModifyPosted => "CANNOT_MODIFY_POSTED",
            Self::NotReversible { .. } => "NOT_REVERSIBLE",
            Self::AlreadyReversed { .. } => "ALREADY_REVERSED",
            Self::VoidReasonRequired => "VOID_REASON_REQUIRED",
            Self::ReversalPeriodClosed(_) => "REVERSAL_PERIOD_CLOSED",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = WorkflowError::InvalidTransition {
            from: EntryStatus::Void,
            to: EntryStatus::Posted,
        };
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("Void"));
    }

    #[test]
    fn test_already_reversed_error() {
        let err = WorkflowError::AlreadyReversed {
            entry_id: Uuid::nil(),
            reversal_entry_id: Uuid::nil(),
        };
        assert_eq!(err.error_code(), "ALREADY_REVERSED");
    }

    #[test]
    fn test_void_reason_required_error() {
        assert_eq!(
            WorkflowError::VoidReasonRequired.error_code(),
            "VOID_REASON_REQUIRED"
        );
    }
}
