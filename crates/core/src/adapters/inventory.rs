//! Inventory issue adapter.

use tally_shared::types::AccountId;
use uuid::Uuid;

use crate::inventory::IssuePlan;
use crate::ledger::LineInput;

/// Snapshot of an inventory issue (sale or internal consumption).
#[derive(Debug, Clone)]
pub struct InventoryIssueSnapshot {
    /// The issue event's own identifier.
    pub issue_id: Uuid,
    /// Short label for line descriptions.
    pub label: String,
    /// Cost-of-goods-sold account.
    pub cogs_account: AccountId,
    /// Inventory asset account.
    pub inventory_account: AccountId,
}

/// Builds the lines for an executed issue plan: debit COGS, credit
/// Inventory-Asset for the plan's FIFO cost. An all-zero-cost plan (free
/// stock) produces no lines.
#[must_use]
pub fn inventory_issue_lines(snapshot: &InventoryIssueSnapshot, plan: &IssuePlan) -> Vec<LineInput> {
    if plan.total_cost.is_zero() {
        return Vec::new();
    }
    vec![
        LineInput::debit(snapshot.cogs_account, plan.total_cost)
            .with_description(format!("COGS: {}", snapshot.label)),
        LineInput::credit(snapshot.inventory_account, plan.total_cost)
            .with_description(format!("Stock issued: {}", snapshot.label)),
    ]
}
