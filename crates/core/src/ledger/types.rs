//! Ledger domain types for journal entry creation and validation.
//!
//! This module defines the core types used for building and validating
//! journal entries in the double-entry bookkeeping system.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, JournalEntryId, UserId};
use uuid::Uuid;

use super::account::AccountType;

/// Side of a journal line: either Debit or Credit.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/revenue accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// Journal entry status.
///
/// An entry is created in `Draft` (manual entries) or directly `Posted`
/// (document-driven entries). `Posted` entries are immutable; `Void` marks a
/// posted entry as superseded by a reversing entry for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is being drafted and can be modified.
    Draft,
    /// Entry has been posted to the ledger (immutable).
    Posted,
    /// Entry has been superseded by a reversing entry (immutable).
    Void,
}

impl EntryStatus {
    /// Returns true if the entry can be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry is immutable.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Posted | Self::Void)
    }
}

/// Source document types that post through the ledger.
///
/// Together with the source document id this forms the idempotency key for
/// posting: at most one journal entry exists per source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceDocumentType {
    /// Sales invoice issuance.
    Invoice,
    /// Customer payment against an invoice.
    InvoicePayment,
    /// Approved vendor bill.
    Bill,
    /// Recorded expense.
    Expense,
    /// Periodic depreciation run.
    DepreciationRun,
    /// Inventory issue (sale or consumption).
    InventoryIssue,
}

/// Reference to the source document a journal entry was derived from.
///
/// Used as the posting idempotency key; manual entries carry no reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceDocumentRef {
    /// The type of source document.
    pub document_type: SourceDocumentType,
    /// The source document's own identifier.
    pub document_id: Uuid,
}

impl SourceDocumentRef {
    /// Creates a new source document reference.
    #[must_use]
    pub const fn new(document_type: SourceDocumentType, document_id: Uuid) -> Self {
        Self {
            document_type,
            document_id,
        }
    }
}

/// Input for a single journal line in a candidate entry.
#[derive(Debug, Clone)]
pub struct LineInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// Whether this is a debit or credit line.
    pub side: Side,
    /// The amount (must be positive, minor-unit precision).
    pub amount: Decimal,
    /// Optional description for this line.
    pub description: Option<String>,
}

impl LineInput {
    /// Creates a debit line.
    #[must_use]
    pub const fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            side: Side::Debit,
            amount,
            description: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub const fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            side: Side::Credit,
            amount,
            description: None,
        }
    }

    /// Attaches a line description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A proposed journal entry, not yet validated or persisted.
#[derive(Debug, Clone)]
pub struct CandidateEntry {
    /// The date of the business event.
    pub entry_date: NaiveDate,
    /// Free-text description of the entry.
    pub description: String,
    /// Optional reference tag (e.g. document number).
    pub reference: Option<String>,
    /// Source document this entry was derived from, if any.
    pub source: Option<SourceDocumentRef>,
    /// The entry this one reverses, if it is a reversal.
    pub reverses: Option<JournalEntryId>,
    /// The journal lines (must have at least 2).
    pub lines: Vec<LineInput>,
    /// The user creating the entry.
    pub created_by: UserId,
}

/// A journal line that passed validation.
///
/// The account type is resolved during validation so the posting engine can
/// compute balance deltas without a second account lookup.
#[derive(Debug, Clone)]
pub struct ValidatedLine {
    /// The account to post to.
    pub account_id: AccountId,
    /// The resolved account type (for balance delta calculation).
    pub account_type: AccountType,
    /// The debit amount (zero if credit).
    pub debit: Decimal,
    /// The credit amount (zero if debit).
    pub credit: Decimal,
    /// Optional description.
    pub description: Option<String>,
}

impl ValidatedLine {
    /// Returns the side of this line.
    #[must_use]
    pub fn side(&self) -> Side {
        if self.debit > Decimal::ZERO {
            Side::Debit
        } else {
            Side::Credit
        }
    }

    /// Returns the line amount regardless of side.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.debit + self.credit
    }
}

/// A journal entry that passed all validation rules.
///
/// Only `LedgerService::validate` constructs this type; the posting engine
/// accepts it as proof that the balance, account, and period rules held.
#[derive(Debug, Clone)]
pub struct ValidatedEntry {
    entry_date: NaiveDate,
    description: String,
    reference: Option<String>,
    source: Option<SourceDocumentRef>,
    reverses: Option<JournalEntryId>,
    lines: Vec<ValidatedLine>,
    totals: EntryTotals,
    created_by: UserId,
}

impl ValidatedEntry {
    pub(crate) fn new(candidate: &CandidateEntry, lines: Vec<ValidatedLine>) -> Self {
        let totals = EntryTotals::from_lines(&lines);
        Self {
            entry_date: candidate.entry_date,
            description: candidate.description.clone(),
            reference: candidate.reference.clone(),
            source: candidate.source,
            reverses: candidate.reverses,
            lines,
            totals,
            created_by: candidate.created_by,
        }
    }

    /// The date of the business event.
    #[must_use]
    pub const fn entry_date(&self) -> NaiveDate {
        self.entry_date
    }

    /// Free-text description of the entry.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Optional reference tag.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Source document reference (posting idempotency key), if any.
    #[must_use]
    pub const fn source(&self) -> Option<SourceDocumentRef> {
        self.source
    }

    /// The entry this one reverses, if it is a reversal.
    #[must_use]
    pub const fn reverses(&self) -> Option<JournalEntryId> {
        self.reverses
    }

    /// The validated lines.
    #[must_use]
    pub fn lines(&self) -> &[ValidatedLine] {
        &self.lines
    }

    /// The entry totals.
    #[must_use]
    pub const fn totals(&self) -> &EntryTotals {
        &self.totals
    }

    /// The user creating the entry.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }
}

/// Entry totals for validation and display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Total debit amount.
    pub debits: Decimal,
    /// Total credit amount.
    pub credits: Decimal,
    /// Whether the entry is balanced (debits == credits exactly).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates new entry totals from debit and credit sums.
    #[must_use]
    pub fn new(debits: Decimal, credits: Decimal) -> Self {
        Self {
            debits,
            credits,
            is_balanced: debits == credits,
        }
    }

    /// Sums validated lines into totals.
    #[must_use]
    pub fn from_lines(lines: &[ValidatedLine]) -> Self {
        let debits: Decimal = lines.iter().map(|l| l.debit).sum();
        let credits: Decimal = lines.iter().map(|l| l.credit).sum();
        Self::new(debits, credits)
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debits - self.credits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Debit.opposite(), Side::Credit);
        assert_eq!(Side::Credit.opposite(), Side::Debit);
    }

    #[test]
    fn test_entry_status_editable() {
        assert!(EntryStatus::Draft.is_editable());
        assert!(!EntryStatus::Posted.is_editable());
        assert!(!EntryStatus::Void.is_editable());
    }

    #[test]
    fn test_entry_status_immutable() {
        assert!(!EntryStatus::Draft.is_immutable());
        assert!(EntryStatus::Posted.is_immutable());
        assert!(EntryStatus::Void.is_immutable());
    }

    #[test]
    fn test_line_input_builders() {
        let account = AccountId::new();
        let line = LineInput::debit(account, dec!(100)).with_description("supplies");
        assert_eq!(line.side, Side::Debit);
        assert_eq!(line.amount, dec!(100));
        assert_eq!(line.description.as_deref(), Some("supplies"));
    }

    #[test]
    fn test_entry_totals_balanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_entry_totals_unbalanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(50.00));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(50.00));
    }

    #[test]
    fn test_validated_line_side_and_amount() {
        let line = ValidatedLine {
            account_id: AccountId::new(),
            account_type: AccountType::Asset,
            debit: dec!(25.50),
            credit: Decimal::ZERO,
            description: None,
        };
        assert_eq!(line.side(), Side::Debit);
        assert_eq!(line.amount(), dec!(25.50));
    }
}
