//! Expense adapter.

use rust_decimal::Decimal;
use tally_shared::types::AccountId;
use uuid::Uuid;

use crate::ledger::LineInput;

/// Snapshot of a recorded expense.
#[derive(Debug, Clone)]
pub struct ExpenseSnapshot {
    /// The expense's own identifier.
    pub expense_id: Uuid,
    /// Short label for line descriptions.
    pub label: String,
    /// Pre-tax amount.
    pub amount: Decimal,
    /// Tax paid on the expense.
    pub tax: Decimal,
    /// The expense account chosen for this cost.
    pub expense_account: AccountId,
    /// The cash/bank/card account the expense was paid from.
    pub payment_account: AccountId,
}

/// Builds the lines for a recorded expense: debit the expense account and
/// credit the payment account, both for `amount + tax`.
#[must_use]
pub fn expense_lines(snapshot: &ExpenseSnapshot) -> Vec<LineInput> {
    let total = snapshot.amount + snapshot.tax;
    vec![
        LineInput::debit(snapshot.expense_account, total)
            .with_description(snapshot.label.clone()),
        LineInput::credit(snapshot.payment_account, total)
            .with_description(format!("Payment: {}", snapshot.label)),
    ]
}
