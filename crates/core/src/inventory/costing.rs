//! FIFO cost layer planning.
//!
//! This module is pure: it takes the current layer state and returns a plan
//! (which layers to consume or restore, and at what cost). Applying the plan
//! to durable storage happens in the same database transaction as the
//! journal entry it belongs to.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{CostLayerId, ProductId};

use super::error::InventoryError;

/// Minor-unit precision for costs.
const MINOR_UNIT_SCALE: u32 = 2;

/// A batch of inventory received at one unit cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostLayer {
    /// Unique identifier.
    pub id: CostLayerId,
    /// The product this layer holds.
    pub product_id: ProductId,
    /// Date the stock was received.
    pub received_date: NaiveDate,
    /// Quantity originally received.
    pub quantity: Decimal,
    /// Quantity still unconsumed.
    pub remaining: Decimal,
    /// Cost per unit at receipt.
    pub unit_cost: Decimal,
}

impl CostLayer {
    /// Creates a layer for a fresh receipt.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReceipt` for non-positive quantity or negative cost.
    pub fn receive(
        product_id: ProductId,
        received_date: NaiveDate,
        quantity: Decimal,
        unit_cost: Decimal,
    ) -> Result<Self, InventoryError> {
        if quantity <= Decimal::ZERO || unit_cost < Decimal::ZERO {
            return Err(InventoryError::InvalidReceipt);
        }
        Ok(Self {
            id: CostLayerId::new(),
            product_id,
            received_date,
            quantity,
            remaining: quantity,
            unit_cost,
        })
    }

    /// Quantity already issued from this layer.
    #[must_use]
    pub fn consumed(&self) -> Decimal {
        self.quantity - self.remaining
    }

    /// Returns true if nothing has been issued from this layer.
    #[must_use]
    pub fn is_untouched(&self) -> bool {
        self.remaining == self.quantity
    }
}

/// One layer's share of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerConsumption {
    /// The layer consumed from.
    pub layer_id: CostLayerId,
    /// Quantity taken from the layer.
    pub quantity: Decimal,
    /// The layer's unit cost.
    pub unit_cost: Decimal,
    /// `quantity * unit_cost`, rounded to minor units.
    pub cost: Decimal,
}

/// The full plan for one issue event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuePlan {
    /// Per-layer consumptions, oldest layer first.
    pub consumptions: Vec<LayerConsumption>,
    /// Total cost of goods sold for the issue.
    pub total_cost: Decimal,
}

/// Stateless FIFO costing calculator.
pub struct FifoCosting;

impl FifoCosting {
    /// Plans an issue of `quantity` units against the given layers.
    ///
    /// Layers are consumed oldest-first (by received date, then id for
    /// same-day receipts). The per-layer cost is rounded to minor units and
    /// the total is the sum of the per-layer costs, so the plan is exactly
    /// reproducible from its parts.
    ///
    /// # Errors
    ///
    /// - `NonPositiveQuantity` for a zero or negative request
    /// - `InsufficientStock` if the layers cannot cover the request; the
    ///   layers themselves are never modified
    pub fn plan_issue(layers: &[CostLayer], quantity: Decimal) -> Result<IssuePlan, InventoryError> {
        if quantity <= Decimal::ZERO {
            return Err(InventoryError::NonPositiveQuantity(quantity));
        }

        let available: Decimal = layers.iter().map(|l| l.remaining).sum();
        if available < quantity {
            return Err(InventoryError::InsufficientStock {
                requested: quantity,
                available,
            });
        }

        let mut ordered: Vec<&CostLayer> = layers.iter().filter(|l| l.remaining > Decimal::ZERO).collect();
        ordered.sort_by_key(|l| (l.received_date, l.id.into_inner()));

        let mut outstanding = quantity;
        let mut consumptions = Vec::new();
        for layer in ordered {
            if outstanding == Decimal::ZERO {
                break;
            }
            let take = outstanding.min(layer.remaining);
            let cost = (take * layer.unit_cost).round_dp(MINOR_UNIT_SCALE);
            consumptions.push(LayerConsumption {
                layer_id: layer.id,
                quantity: take,
                unit_cost: layer.unit_cost,
                cost,
            });
            outstanding -= take;
        }

        let total_cost = consumptions.iter().map(|c| c.cost).sum();
        Ok(IssuePlan {
            consumptions,
            total_cost,
        })
    }

    /// Plans the restoration of a previously executed issue.
    ///
    /// Each consumed quantity goes back onto its original layer at the
    /// original unit cost, keeping cost history auditable instead of
    /// blending into an average.
    #[must_use]
    pub fn plan_restore(plan: &IssuePlan) -> Vec<LayerConsumption> {
        plan.consumptions.clone()
    }

    /// Checks that a receipt layer can be removed when its bill is voided.
    ///
    /// # Errors
    ///
    /// Returns `LayerAlreadyConsumed` if any quantity was issued from the
    /// layer; partially consumed layers block the void.
    pub fn check_removable(layer: &CostLayer) -> Result<(), InventoryError> {
        if layer.is_untouched() {
            Ok(())
        } else {
            Err(InventoryError::LayerAlreadyConsumed {
                layer_id: layer.id.into_inner(),
                consumed: layer.consumed(),
                quantity: layer.quantity,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn layer(day: u32, quantity: Decimal, unit_cost: Decimal) -> CostLayer {
        CostLayer::receive(
            ProductId::new(),
            NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            quantity,
            unit_cost,
        )
        .unwrap()
    }

    #[test]
    fn test_single_layer_issue() {
        let layers = vec![layer(1, dec!(10), dec!(5.00))];
        let plan = FifoCosting::plan_issue(&layers, dec!(4)).unwrap();

        assert_eq!(plan.consumptions.len(), 1);
        assert_eq!(plan.consumptions[0].quantity, dec!(4));
        assert_eq!(plan.total_cost, dec!(20.00));
    }

    #[test]
    fn test_fifo_consumes_oldest_first() {
        let layers = vec![
            layer(10, dec!(5), dec!(7.00)),
            layer(1, dec!(5), dec!(5.00)),
            layer(5, dec!(5), dec!(6.00)),
        ];
        let plan = FifoCosting::plan_issue(&layers, dec!(12)).unwrap();

        assert_eq!(plan.consumptions.len(), 3);
        assert_eq!(plan.consumptions[0].unit_cost, dec!(5.00));
        assert_eq!(plan.consumptions[0].quantity, dec!(5));
        assert_eq!(plan.consumptions[1].unit_cost, dec!(6.00));
        assert_eq!(plan.consumptions[1].quantity, dec!(5));
        assert_eq!(plan.consumptions[2].unit_cost, dec!(7.00));
        assert_eq!(plan.consumptions[2].quantity, dec!(2));
        // 5*5 + 5*6 + 2*7 = 69
        assert_eq!(plan.total_cost, dec!(69.00));
    }

    #[test]
    fn test_partially_consumed_layer() {
        let mut l = layer(1, dec!(10), dec!(3.00));
        l.remaining = dec!(4);
        let layers = vec![l, layer(2, dec!(10), dec!(4.00))];

        let plan = FifoCosting::plan_issue(&layers, dec!(6)).unwrap();
        assert_eq!(plan.consumptions[0].quantity, dec!(4));
        assert_eq!(plan.consumptions[1].quantity, dec!(2));
        assert_eq!(plan.total_cost, dec!(20.00));
    }

    #[test]
    fn test_insufficient_stock_leaves_layers_unchanged() {
        let layers = vec![layer(1, dec!(3), dec!(5.00)), layer(2, dec!(2), dec!(5.00))];
        let result = FifoCosting::plan_issue(&layers, dec!(6));

        assert!(matches!(
            result,
            Err(InventoryError::InsufficientStock { requested, available })
                if requested == dec!(6) && available == dec!(5)
        ));
        // Pure planning: the input layers are untouched by construction.
        assert_eq!(layers[0].remaining, dec!(3));
        assert_eq!(layers[1].remaining, dec!(2));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let layers = vec![layer(1, dec!(3), dec!(5.00))];
        assert!(matches!(
            FifoCosting::plan_issue(&layers, Decimal::ZERO),
            Err(InventoryError::NonPositiveQuantity(_))
        ));
    }

    #[test]
    fn test_exhausted_layers_skipped() {
        let mut spent = layer(1, dec!(5), dec!(2.00));
        spent.remaining = Decimal::ZERO;
        let layers = vec![spent, layer(2, dec!(5), dec!(3.00))];

        let plan = FifoCosting::plan_issue(&layers, dec!(5)).unwrap();
        assert_eq!(plan.consumptions.len(), 1);
        assert_eq!(plan.consumptions[0].unit_cost, dec!(3.00));
    }

    #[test]
    fn test_restore_mirrors_issue() {
        let layers = vec![layer(1, dec!(5), dec!(5.00)), layer(2, dec!(5), dec!(6.00))];
        let plan = FifoCosting::plan_issue(&layers, dec!(8)).unwrap();
        let restore = FifoCosting::plan_restore(&plan);

        assert_eq!(restore.len(), plan.consumptions.len());
        for (r, c) in restore.iter().zip(plan.consumptions.iter()) {
            assert_eq!(r.layer_id, c.layer_id);
            assert_eq!(r.quantity, c.quantity);
            assert_eq!(r.unit_cost, c.unit_cost);
        }
    }

    #[test]
    fn test_untouched_layer_removable() {
        let l = layer(1, dec!(10), dec!(5.00));
        assert!(FifoCosting::check_removable(&l).is_ok());
    }

    #[test]
    fn test_partially_consumed_layer_blocks_removal() {
        let mut l = layer(1, dec!(10), dec!(5.00));
        l.remaining = dec!(7);
        assert!(matches!(
            FifoCosting::check_removable(&l),
            Err(InventoryError::LayerAlreadyConsumed { consumed, .. }) if consumed == dec!(3)
        ));
    }

    #[test]
    fn test_invalid_receipt_rejected() {
        assert!(CostLayer::receive(
            ProductId::new(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            Decimal::ZERO,
            dec!(5.00),
        )
        .is_err());
        assert!(CostLayer::receive(
            ProductId::new(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            dec!(5),
            dec!(-1.00),
        )
        .is_err());
    }
}
