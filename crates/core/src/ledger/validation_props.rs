//! Property-based tests for journal entry validation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tally_shared::types::{AccountId, UserId};

use super::account::{Account, AccountType};
use super::error::LedgerError;
use super::types::{CandidateEntry, LineInput};
use super::validation::LedgerService;
use crate::fiscal::{monthly_periods, FiscalPeriod};

fn test_account(account_type: AccountType) -> Account {
    Account {
        id: AccountId::new(),
        code: "0000".to_string(),
        name: "prop account".to_string(),
        account_type,
        subtype: None,
        is_active: true,
    }
}

fn period_lookup(date: NaiveDate) -> Option<FiscalPeriod> {
    monthly_periods(2026).into_iter().find(|p| p.contains(date))
}

/// Positive minor-unit amounts (0.01 .. 10_000.00).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=12u32, 1u32..=28u32)
        .prop_map(|(month, day)| NaiveDate::from_ymd_opt(2026, month, day).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Mirrored amounts always validate: for any positive amount, the
    /// two-line entry debit X / credit X is accepted and its totals balance.
    #[test]
    fn prop_mirrored_amounts_validate(
        amount in amount_strategy(),
        date in date_strategy(),
    ) {
        let debit_acct = test_account(AccountType::Asset);
        let credit_acct = test_account(AccountType::Revenue);
        let map: HashMap<AccountId, Account> = [
            (debit_acct.id, debit_acct.clone()),
            (credit_acct.id, credit_acct.clone()),
        ]
        .into_iter()
        .collect();

        let candidate = CandidateEntry {
            entry_date: date,
            description: "prop".to_string(),
            reference: None,
            source: None,
            reverses: None,
            lines: vec![
                LineInput::debit(debit_acct.id, amount),
                LineInput::credit(credit_acct.id, amount),
            ],
            created_by: UserId::new(),
        };

        let validated =
            LedgerService::validate(&candidate, |id| map.get(&id).cloned(), period_lookup);
        prop_assert!(validated.is_ok());

        let validated = validated.expect("checked above");
        prop_assert!(validated.totals().is_balanced);
        prop_assert_eq!(validated.totals().debits, amount);
        prop_assert_eq!(validated.totals().credits, amount);
    }

    /// Any strictly unequal debit/credit totals are rejected as unbalanced.
    #[test]
    fn prop_unequal_totals_rejected(
        debit in amount_strategy(),
        delta in amount_strategy(),
        date in date_strategy(),
    ) {
        let debit_acct = test_account(AccountType::Asset);
        let credit_acct = test_account(AccountType::Revenue);
        let map: HashMap<AccountId, Account> = [
            (debit_acct.id, debit_acct.clone()),
            (credit_acct.id, credit_acct.clone()),
        ]
        .into_iter()
        .collect();

        let candidate = CandidateEntry {
            entry_date: date,
            description: "prop".to_string(),
            reference: None,
            source: None,
            reverses: None,
            lines: vec![
                LineInput::debit(debit_acct.id, debit),
                LineInput::credit(credit_acct.id, debit + delta),
            ],
            created_by: UserId::new(),
        };

        let result =
            LedgerService::validate(&candidate, |id| map.get(&id).cloned(), period_lookup);
        prop_assert!(
            matches!(result, Err(LedgerError::UnbalancedEntry { .. })),
            "expected UnbalancedEntry, got {result:?}"
        );
    }

    /// Splitting one credit into many keeps the entry balanced: a debit of
    /// sum(parts) against one credit line per part always validates.
    #[test]
    fn prop_split_lines_validate(
        parts in prop::collection::vec(amount_strategy(), 1..8),
        date in date_strategy(),
    ) {
        let debit_acct = test_account(AccountType::Expense);
        let mut map: HashMap<AccountId, Account> =
            [(debit_acct.id, debit_acct.clone())].into_iter().collect();

        let total: Decimal = parts.iter().copied().sum();
        let mut lines = vec![LineInput::debit(debit_acct.id, total)];
        for part in &parts {
            let acct = test_account(AccountType::Liability);
            lines.push(LineInput::credit(acct.id, *part));
            map.insert(acct.id, acct);
        }

        let candidate = CandidateEntry {
            entry_date: date,
            description: "prop".to_string(),
            reference: None,
            source: None,
            reverses: None,
            lines,
            created_by: UserId::new(),
        };

        let validated =
            LedgerService::validate(&candidate, |id| map.get(&id).cloned(), period_lookup);
        prop_assert!(validated.is_ok());
    }

    /// Validation never mutates anything: validating the same candidate twice
    /// yields identical totals.
    #[test]
    fn prop_validation_is_pure(
        amount in amount_strategy(),
        date in date_strategy(),
    ) {
        let debit_acct = test_account(AccountType::Asset);
        let credit_acct = test_account(AccountType::Equity);
        let map: HashMap<AccountId, Account> = [
            (debit_acct.id, debit_acct.clone()),
            (credit_acct.id, credit_acct.clone()),
        ]
        .into_iter()
        .collect();

        let candidate = CandidateEntry {
            entry_date: date,
            description: "prop".to_string(),
            reference: None,
            source: None,
            reverses: None,
            lines: vec![
                LineInput::debit(debit_acct.id, amount),
                LineInput::credit(credit_acct.id, amount),
            ],
            created_by: UserId::new(),
        };

        let first =
            LedgerService::validate(&candidate, |id| map.get(&id).cloned(), period_lookup)
                .expect("valid entry");
        let second =
            LedgerService::validate(&candidate, |id| map.get(&id).cloned(), period_lookup)
                .expect("valid entry");

        prop_assert_eq!(first.totals().debits, second.totals().debits);
        prop_assert_eq!(first.totals().credits, second.totals().credits);
        prop_assert_eq!(first.lines().len(), second.lines().len());
    }
}
