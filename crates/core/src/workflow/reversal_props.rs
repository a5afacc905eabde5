//! Property-based tests for reversal construction.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, JournalEntryId, UserId};

use super::reversal::{OriginalEntry, OriginalLine, ReversalService};
use crate::fiscal::monthly_periods;
use crate::ledger::{EntryStatus, Side};

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Debit), Just(Side::Credit)]
}

fn lines_strategy() -> impl Strategy<Value = Vec<OriginalLine>> {
    prop::collection::vec(
        (amount_strategy(), side_strategy()).prop_map(|(amount, side)| OriginalLine {
            account_id: AccountId::new(),
            side,
            amount,
            description: None,
        }),
        2..10,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The reversal and the original always net to zero on every line:
    /// same account, same amount, opposite side.
    #[test]
    fn prop_reversal_nets_to_zero(lines in lines_strategy()) {
        let original = OriginalEntry {
            id: JournalEntryId::new(),
            entry_date: NaiveDate::from_ymd_opt(2026, 6, 10).unwrap(),
            description: "prop".to_string(),
            status: EntryStatus::Posted,
            reversed_by: None,
            lines,
        };
        let periods = monthly_periods(2026);

        let reversal = ReversalService::build_reversal(
            &original,
            &periods,
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            "prop",
            UserId::new(),
        )
        .expect("posted entry reverses");

        prop_assert_eq!(reversal.lines.len(), original.lines.len());
        for (orig, rev) in original.lines.iter().zip(reversal.lines.iter()) {
            prop_assert_eq!(orig.account_id, rev.account_id);
            prop_assert_eq!(orig.amount, rev.amount);
            prop_assert_eq!(orig.side.opposite(), rev.side);
        }
    }

    /// Per-account signed sums of the combined original + reversal lines
    /// cancel exactly.
    #[test]
    fn prop_combined_signed_sum_is_zero(lines in lines_strategy()) {
        let original = OriginalEntry {
            id: JournalEntryId::new(),
            entry_date: NaiveDate::from_ymd_opt(2026, 6, 10).unwrap(),
            description: "prop".to_string(),
            status: EntryStatus::Posted,
            reversed_by: None,
            lines,
        };
        let periods = monthly_periods(2026);

        let reversal = ReversalService::build_reversal(
            &original,
            &periods,
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            "prop",
            UserId::new(),
        )
        .expect("posted entry reverses");

        let signed = |side: Side, amount: Decimal| match side {
            Side::Debit => amount,
            Side::Credit => -amount,
        };

        let original_sum: Decimal = original
            .lines
            .iter()
            .map(|l| signed(l.side, l.amount))
            .sum();
        let reversal_sum: Decimal = reversal
            .lines
            .iter()
            .map(|l| signed(l.side, l.amount))
            .sum();

        prop_assert_eq!(original_sum + reversal_sum, Decimal::ZERO);
    }
}
