//! Journal entry lifecycle management.
//!
//! Entries move through a small state machine (Draft -> Posted -> Void) and
//! posted entries are never edited; corrections happen through compensating
//! reversal entries built here.

pub mod error;
pub mod reversal;
pub mod transitions;

#[cfg(test)]
mod reversal_props;

pub use error::WorkflowError;
pub use reversal::{OriginalEntry, OriginalLine, ReversalService};
pub use transitions::check_transition;
