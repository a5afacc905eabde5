//! Property-based tests for FIFO costing.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::ProductId;

use super::costing::{CostLayer, FifoCosting};
use super::error::InventoryError;

fn layers_strategy() -> impl Strategy<Value = Vec<CostLayer>> {
    prop::collection::vec(
        (1u32..=28, 1i64..1000, 0i64..10_000).prop_map(|(day, qty, cost)| {
            CostLayer::receive(
                ProductId::new(),
                NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
                Decimal::from(qty),
                Decimal::new(cost, 2),
            )
            .unwrap()
        }),
        1..10,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Consumed quantities sum exactly to the requested quantity, and the
    /// total cost is the sum of per-layer costs.
    #[test]
    fn prop_issue_consumes_exact_quantity(
        layers in layers_strategy(),
        fraction in 1u32..100,
    ) {
        let available: Decimal = layers.iter().map(|l| l.remaining).sum();
        let quantity = (available * Decimal::from(fraction) / Decimal::ONE_HUNDRED)
            .round_dp(0)
            .max(Decimal::ONE);
        prop_assume!(quantity <= available);

        let plan = FifoCosting::plan_issue(&layers, quantity).expect("stock is sufficient");

        let consumed: Decimal = plan.consumptions.iter().map(|c| c.quantity).sum();
        prop_assert_eq!(consumed, quantity);

        let cost_sum: Decimal = plan.consumptions.iter().map(|c| c.cost).sum();
        prop_assert_eq!(plan.total_cost, cost_sum);
    }

    /// Layers are consumed strictly oldest-first: a younger layer is only
    /// touched after every older layer is exhausted by the plan.
    #[test]
    fn prop_issue_is_fifo_ordered(
        layers in layers_strategy(),
    ) {
        let available: Decimal = layers.iter().map(|l| l.remaining).sum();
        let plan = FifoCosting::plan_issue(&layers, available).expect("full issue");

        let dates: Vec<NaiveDate> = plan
            .consumptions
            .iter()
            .map(|c| {
                layers
                    .iter()
                    .find(|l| l.id == c.layer_id)
                    .expect("plan references known layer")
                    .received_date
            })
            .collect();
        for pair in dates.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
    }

    /// Over-issuing always fails with `InsufficientStock` carrying the true
    /// availability.
    #[test]
    fn prop_over_issue_fails(
        layers in layers_strategy(),
        extra in 1i64..1000,
    ) {
        let available: Decimal = layers.iter().map(|l| l.remaining).sum();
        let result = FifoCosting::plan_issue(&layers, available + Decimal::from(extra));

        prop_assert!(
            matches!(
                result,
                Err(InventoryError::InsufficientStock { available: a, .. }) if a == available
            ),
            "expected InsufficientStock with available = {available}, got {result:?}"
        );
    }
}
