//! Property-based tests for depreciation schedules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::AssetId;

use super::schedule::{DepreciationMethod, DepreciationSchedule};

fn method_strategy() -> impl Strategy<Value = DepreciationMethod> {
    prop_oneof![
        Just(DepreciationMethod::StraightLine),
        Just(DepreciationMethod::DecliningBalance),
        Just(DepreciationMethod::DoubleDeclining),
    ]
}

/// Cost strictly above residual, both in minor units.
fn cost_residual_strategy() -> impl Strategy<Value = (Decimal, Decimal)> {
    (1i64..10_000_000i64, 0i64..1_000_000i64)
        .prop_map(|(extra, residual)| {
            let residual = Decimal::new(residual, 2);
            let cost = residual + Decimal::new(extra, 2);
            (cost, residual)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The schedule always sums to exactly `cost - residual`, for every
    /// method and life length.
    #[test]
    fn prop_schedule_sums_to_depreciable_base(
        method in method_strategy(),
        (cost, residual) in cost_residual_strategy(),
        life in 1u32..120,
    ) {
        let schedule = DepreciationSchedule::new(
            AssetId::new(),
            method,
            cost,
            residual,
            life,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
        .expect("valid parameters");

        let total: Decimal = schedule
            .periods()
            .expect("non-UoP schedule iterates")
            .map(|p| p.amount)
            .sum();
        prop_assert_eq!(total, cost - residual);
    }

    /// Every period amount is non-negative and book value never drops below
    /// the residual value.
    #[test]
    fn prop_book_value_never_below_residual(
        method in method_strategy(),
        (cost, residual) in cost_residual_strategy(),
        life in 1u32..60,
    ) {
        let schedule = DepreciationSchedule::new(
            AssetId::new(),
            method,
            cost,
            residual,
            life,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
        .expect("valid parameters");

        let mut book = cost;
        for period in schedule.periods().expect("non-UoP schedule iterates") {
            prop_assert!(period.amount >= Decimal::ZERO);
            book -= period.amount;
            prop_assert!(book >= residual, "book value {} below residual {}", book, residual);
        }
        prop_assert_eq!(book, residual);
    }

    /// Period-end dates are strictly increasing.
    #[test]
    fn prop_period_ends_strictly_increase(
        (cost, residual) in cost_residual_strategy(),
        life in 2u32..60,
        month in 1u32..=12,
    ) {
        let schedule = DepreciationSchedule::new(
            AssetId::new(),
            DepreciationMethod::StraightLine,
            cost,
            residual,
            life,
            NaiveDate::from_ymd_opt(2026, month, 15).unwrap(),
        )
        .expect("valid parameters");

        let ends: Vec<NaiveDate> = schedule
            .periods()
            .expect("non-UoP schedule iterates")
            .map(|p| p.period_end)
            .collect();
        for pair in ends.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }
}
