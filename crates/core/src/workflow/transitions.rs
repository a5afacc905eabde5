//! Entry status transition rules.
//!
//! Valid transitions:
//! - Draft -> Posted (post)
//! - Posted -> Void (reversal posted)
//!
//! Everything else is rejected. Draft entries may also be deleted outright,
//! which is not a transition and is handled at the repository layer.

use crate::ledger::EntryStatus;

use super::error::WorkflowError;

/// Returns true if moving from `from` to `to` is a legal transition.
#[must_use]
pub fn can_transition(from: EntryStatus, to: EntryStatus) -> bool {
    matches!(
        (from, to),
        (EntryStatus::Draft, EntryStatus::Posted) | (EntryStatus::Posted, EntryStatus::Void)
    )
}

/// Checks a status transition.
///
/// # Errors
///
/// Returns `InvalidTransition` if the transition is not allowed.
pub fn check_transition(from: EntryStatus, to: EntryStatus) -> Result<(), WorkflowError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(WorkflowError::InvalidTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(can_transition(EntryStatus::Draft, EntryStatus::Posted));
        assert!(can_transition(EntryStatus::Posted, EntryStatus::Void));
    }

    #[test]
    fn test_forbidden_transitions() {
        assert!(!can_transition(EntryStatus::Draft, EntryStatus::Void));
        assert!(!can_transition(EntryStatus::Posted, EntryStatus::Draft));
        assert!(!can_transition(EntryStatus::Void, EntryStatus::Posted));
        assert!(!can_transition(EntryStatus::Void, EntryStatus::Draft));
        assert!(!can_transition(EntryStatus::Posted, EntryStatus::Posted));
    }

    #[test]
    fn test_check_transition_error() {
        let result = check_transition(EntryStatus::Void, EntryStatus::Posted);
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition {
                from: EntryStatus::Void,
                to: EntryStatus::Posted,
            })
        ));
    }
}
