//! Account balance calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::account::AccountType;
use super::types::Side;

/// Calculates the signed balance change an entry line causes on an account.
///
/// Debit-normal accounts (Asset, Expense) grow with debits; credit-normal
/// accounts (Liability, Equity, Revenue) grow with credits.
#[must_use]
pub fn balance_change(account_type: AccountType, debit: Decimal, credit: Decimal) -> Decimal {
    match account_type.normal_balance() {
        Side::Debit => debit - credit,
        Side::Credit => credit - debit,
    }
}

/// Running balance state for an account, updated as entries post.
///
/// Tracks cumulative debit/credit totals alongside the signed balance so the
/// trial balance can report both views without rescanning lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Number of lines applied (monotonically increasing).
    pub version: i64,
    /// Cumulative debit total.
    pub debit_total: Decimal,
    /// Cumulative credit total.
    pub credit_total: Decimal,
    /// Signed balance in the account's normal direction.
    pub balance: Decimal,
}

impl RunningBalance {
    /// Creates a zero balance for an account with no postings.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            version: 0,
            debit_total: Decimal::ZERO,
            credit_total: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    /// Applies one line to the running balance.
    #[must_use]
    pub fn apply(&self, account_type: AccountType, debit: Decimal, credit: Decimal) -> Self {
        Self {
            version: self.version + 1,
            debit_total: self.debit_total + debit,
            credit_total: self.credit_total + credit,
            balance: self.balance + balance_change(account_type, debit, credit),
        }
    }
}

impl Default for RunningBalance {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_debit_normal_balance_change() {
        assert_eq!(balance_change(AccountType::Asset, dec!(100), dec!(0)), dec!(100));
        assert_eq!(balance_change(AccountType::Asset, dec!(0), dec!(50)), dec!(-50));
        assert_eq!(balance_change(AccountType::Expense, dec!(100), dec!(30)), dec!(70));
    }

    #[test]
    fn test_credit_normal_balance_change() {
        assert_eq!(balance_change(AccountType::Revenue, dec!(0), dec!(100)), dec!(100));
        assert_eq!(balance_change(AccountType::Liability, dec!(50), dec!(0)), dec!(-50));
        assert_eq!(balance_change(AccountType::Equity, dec!(30), dec!(100)), dec!(70));
    }

    #[test]
    fn test_running_balance_chain() {
        let rb = RunningBalance::zero();
        let rb = rb.apply(AccountType::Asset, dec!(100), dec!(0));
        assert_eq!(rb.version, 1);
        assert_eq!(rb.balance, dec!(100));

        let rb = rb.apply(AccountType::Asset, dec!(0), dec!(30));
        assert_eq!(rb.version, 2);
        assert_eq!(rb.debit_total, dec!(100));
        assert_eq!(rb.credit_total, dec!(30));
        assert_eq!(rb.balance, dec!(70));
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A reversal line (sides swapped) returns the balance to its prior value.
        #[test]
        fn prop_reversal_restores_balance(
            debit in amount_strategy(),
            credit in amount_strategy(),
        ) {
            let start = RunningBalance::zero();
            let after = start.apply(AccountType::Asset, debit, credit);
            let reversed = after.apply(AccountType::Asset, credit, debit);

            prop_assert_eq!(reversed.balance, start.balance);
        }

        /// Balance equals the signed sum of changes regardless of order of totals.
        #[test]
        fn prop_balance_matches_totals(
            lines in prop::collection::vec((amount_strategy(), amount_strategy()), 1..20),
        ) {
            let mut rb = RunningBalance::zero();
            for (debit, credit) in &lines {
                rb = rb.apply(AccountType::Liability, *debit, *credit);
            }

            prop_assert_eq!(rb.balance, rb.credit_total - rb.debit_total);
            prop_assert_eq!(rb.version as usize, lines.len());
        }
    }
}
