//! Depreciation run adapter.

use rust_decimal::Decimal;
use tally_shared::types::{AccountId, AssetId};
use uuid::Uuid;

use crate::ledger::LineInput;

/// One asset's charge within a depreciation run.
#[derive(Debug, Clone)]
pub struct AssetCharge {
    /// The asset being depreciated.
    pub asset_id: AssetId,
    /// Asset name for line descriptions.
    pub asset_name: String,
    /// This period's depreciation amount.
    pub amount: Decimal,
}

/// Snapshot of a periodic depreciation run.
#[derive(Debug, Clone)]
pub struct DepreciationRunSnapshot {
    /// The run's own identifier.
    pub run_id: Uuid,
    /// Per-asset charges for the period.
    pub charges: Vec<AssetCharge>,
    /// Depreciation-expense account.
    pub expense_account: AccountId,
    /// Accumulated-depreciation contra-asset account.
    pub accumulated_account: AccountId,
}

/// Builds the lines for a depreciation run: per asset, debit
/// Depreciation-Expense and credit Accumulated-Depreciation for the period
/// amount. Zero charges (e.g. an idle units-of-production period) produce
/// no lines.
#[must_use]
pub fn depreciation_run_lines(snapshot: &DepreciationRunSnapshot) -> Vec<LineInput> {
    let mut lines = Vec::new();
    for charge in &snapshot.charges {
        if charge.amount <= Decimal::ZERO {
            continue;
        }
        lines.push(
            LineInput::debit(snapshot.expense_account, charge.amount)
                .with_description(format!("Depreciation: {}", charge.asset_name)),
        );
        lines.push(
            LineInput::credit(snapshot.accumulated_account, charge.amount)
                .with_description(format!("Accumulated depreciation: {}", charge.asset_name)),
        );
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Side;
    use rust_decimal_macros::dec;

    #[test]
    fn test_depreciation_run_pairs_per_asset() {
        let snapshot = DepreciationRunSnapshot {
            run_id: Uuid::new_v4(),
            charges: vec![
                AssetCharge {
                    asset_id: AssetId::new(),
                    asset_name: "Delivery van".to_string(),
                    amount: dec!(200.00),
                },
                AssetCharge {
                    asset_id: AssetId::new(),
                    asset_name: "Laptop".to_string(),
                    amount: dec!(50.00),
                },
            ],
            expense_account: AccountId::new(),
            accumulated_account: AccountId::new(),
        };

        let lines = depreciation_run_lines(&snapshot);
        assert_eq!(lines.len(), 4);

        let debits: Decimal = lines
            .iter()
            .filter(|l| l.side == Side::Debit)
            .map(|l| l.amount)
            .sum();
        let credits: Decimal = lines
            .iter()
            .filter(|l| l.side == Side::Credit)
            .map(|l| l.amount)
            .sum();
        assert_eq!(debits, dec!(250.00));
        assert_eq!(credits, dec!(250.00));
    }

    #[test]
    fn test_zero_charge_skipped() {
        let snapshot = DepreciationRunSnapshot {
            run_id: Uuid::new_v4(),
            charges: vec![AssetCharge {
                asset_id: AssetId::new(),
                asset_name: "Idle machine".to_string(),
                amount: Decimal::ZERO,
            }],
            expense_account: AccountId::new(),
            accumulated_account: AccountId::new(),
        };

        assert!(depreciation_run_lines(&snapshot).is_empty());
    }
}
