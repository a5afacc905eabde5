//! Bill approval adapter.
//!
//! Approving a vendor bill posts each line to Inventory-Asset or COGS
//! depending on the product's inventory category, credits Accounts-Payable
//! for the bill total, and opens one cost layer per physical-stock line.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, ProductId};
use uuid::Uuid;

use crate::inventory::{CostLayer, InventoryError};
use crate::ledger::LineInput;

/// How a purchased product hits the books.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryCategory {
    /// Stocked product: debit Inventory-Asset and open a cost layer.
    PhysicalStock,
    /// Consumed on receipt: debit COGS directly, no layer.
    DirectCost,
}

/// One line of an approved bill.
#[derive(Debug, Clone)]
pub struct BillLineSnapshot {
    /// The purchased product.
    pub product_id: ProductId,
    /// How the product is accounted for.
    pub category: InventoryCategory,
    /// Quantity received.
    pub quantity: Decimal,
    /// Cost per unit.
    pub unit_cost: Decimal,
}

impl BillLineSnapshot {
    /// The line's extended cost.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        self.quantity * self.unit_cost
    }
}

/// Snapshot of a bill at approval time.
#[derive(Debug, Clone)]
pub struct BillSnapshot {
    /// The bill's own identifier.
    pub bill_id: Uuid,
    /// Bill number for line descriptions.
    pub number: String,
    /// Date the goods were received.
    pub received_date: NaiveDate,
    /// The bill's lines.
    pub lines: Vec<BillLineSnapshot>,
    /// Inventory asset account.
    pub inventory_account: AccountId,
    /// Cost-of-goods-sold account.
    pub cogs_account: AccountId,
    /// Accounts-payable account.
    pub payable_account: AccountId,
}

/// The ledger lines and cost layers produced by a bill approval.
#[derive(Debug, Clone)]
pub struct BillPosting {
    /// Journal lines, balanced by construction.
    pub lines: Vec<LineInput>,
    /// One new cost layer per physical-stock bill line.
    pub layers: Vec<CostLayer>,
}

/// Builds the posting for an approved bill.
///
/// Debits accumulate per target account (inventory vs COGS); the single AP
/// credit equals their sum, so the line set balances by construction.
///
/// # Errors
///
/// Returns `InvalidReceipt` if any physical-stock line has a non-positive
/// quantity or negative unit cost.
pub fn bill_approval(snapshot: &BillSnapshot) -> Result<BillPosting, InventoryError> {
    let mut inventory_total = Decimal::ZERO;
    let mut cogs_total = Decimal::ZERO;
    let mut layers = Vec::new();

    for line in &snapshot.lines {
        match line.category {
            InventoryCategory::PhysicalStock => {
                inventory_total += line.cost();
                layers.push(CostLayer::receive(
                    line.product_id,
                    snapshot.received_date,
                    line.quantity,
                    line.unit_cost,
                )?);
            }
            InventoryCategory::DirectCost => cogs_total += line.cost(),
        }
    }

    let total = inventory_total + cogs_total;
    let mut lines = Vec::new();
    if inventory_total > Decimal::ZERO {
        lines.push(
            LineInput::debit(snapshot.inventory_account, inventory_total)
                .with_description(format!("Stock received on bill {}", snapshot.number)),
        );
    }
    if cogs_total > Decimal::ZERO {
        lines.push(
            LineInput::debit(snapshot.cogs_account, cogs_total)
                .with_description(format!("Direct cost on bill {}", snapshot.number)),
        );
    }
    lines.push(
        LineInput::credit(snapshot.payable_account, total)
            .with_description(format!("Bill {}", snapshot.number)),
    );

    Ok(BillPosting { lines, layers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Side;
    use rust_decimal_macros::dec;

    fn snapshot(lines: Vec<BillLineSnapshot>) -> BillSnapshot {
        BillSnapshot {
            bill_id: Uuid::new_v4(),
            number: "BILL-001".to_string(),
            received_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            lines,
            inventory_account: AccountId::new(),
            cogs_account: AccountId::new(),
            payable_account: AccountId::new(),
        }
    }

    #[test]
    fn test_physical_stock_bill() {
        // 10 units at $5.00 into physical stock.
        let snapshot = snapshot(vec![BillLineSnapshot {
            product_id: ProductId::new(),
            category: InventoryCategory::PhysicalStock,
            quantity: dec!(10),
            unit_cost: dec!(5.00),
        }]);

        let posting = bill_approval(&snapshot).unwrap();

        assert_eq!(posting.lines.len(), 2);
        assert_eq!(posting.lines[0].side, Side::Debit);
        assert_eq!(posting.lines[0].account_id, snapshot.inventory_account);
        assert_eq!(posting.lines[0].amount, dec!(50.00));
        assert_eq!(posting.lines[1].side, Side::Credit);
        assert_eq!(posting.lines[1].amount, dec!(50.00));

        assert_eq!(posting.layers.len(), 1);
        assert_eq!(posting.layers[0].quantity, dec!(10));
        assert_eq!(posting.layers[0].unit_cost, dec!(5.00));
        assert_eq!(posting.layers[0].remaining, dec!(10));
    }

    #[test]
    fn test_mixed_category_bill() {
        let snapshot = snapshot(vec![
            BillLineSnapshot {
                product_id: ProductId::new(),
                category: InventoryCategory::PhysicalStock,
                quantity: dec!(4),
                unit_cost: dec!(25.00),
            },
            BillLineSnapshot {
                product_id: ProductId::new(),
                category: InventoryCategory::DirectCost,
                quantity: dec!(1),
                unit_cost: dec!(30.00),
            },
        ]);

        let posting = bill_approval(&snapshot).unwrap();

        assert_eq!(posting.lines.len(), 3);
        let debits: Decimal = posting
            .lines
            .iter()
            .filter(|l| l.side == Side::Debit)
            .map(|l| l.amount)
            .sum();
        let credits: Decimal = posting
            .lines
            .iter()
            .filter(|l| l.side == Side::Credit)
            .map(|l| l.amount)
            .sum();
        assert_eq!(debits, dec!(130.00));
        assert_eq!(credits, dec!(130.00));

        // Only the stocked line opens a layer.
        assert_eq!(posting.layers.len(), 1);
    }

    #[test]
    fn test_invalid_receipt_propagates() {
        let snapshot = snapshot(vec![BillLineSnapshot {
            product_id: ProductId::new(),
            category: InventoryCategory::PhysicalStock,
            quantity: Decimal::ZERO,
            unit_cost: dec!(5.00),
        }]);

        assert!(matches!(
            bill_approval(&snapshot),
            Err(InventoryError::InvalidReceipt)
        ));
    }
}
