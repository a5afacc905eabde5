//! Report assembly.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ledger::{balance_change, Account, AccountSubtype, AccountType};

use super::types::{
    AccountBalanceRow, AccountLedgerReport, AccountLedgerRow, BalanceSheetReport,
    BalanceSheetSection, ProfitAndLossReport, ProfitAndLossSection, TrialBalanceReport,
    TrialBalanceRow, TrialBalanceTotals,
};

/// Summed posted activity for one account over some date window.
///
/// Sums cover lines of both `posted` and `void` entries: a voided entry and
/// its reversal are both in the log, so their net effect is zero without
/// special-casing.
#[derive(Debug, Clone)]
pub struct AccountActivity {
    /// The account.
    pub account: Account,
    /// Sum of debit lines.
    pub debit_total: Decimal,
    /// Sum of credit lines.
    pub credit_total: Decimal,
}

impl AccountActivity {
    /// Balance in the account's normal direction.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        balance_change(
            self.account.account_type,
            self.debit_total,
            self.credit_total,
        )
    }

    fn balance_row(&self) -> AccountBalanceRow {
        AccountBalanceRow {
            account_id: self.account.id.into_inner(),
            code: self.account.code.clone(),
            name: self.account.name.clone(),
            total_debit: self.debit_total,
            total_credit: self.credit_total,
            balance: self.balance(),
        }
    }
}

/// One posted line feeding an account ledger listing.
#[derive(Debug, Clone)]
pub struct LedgerRowInput {
    /// The owning journal entry.
    pub entry_id: Uuid,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Debit amount (zero if credit).
    pub debit: Decimal,
    /// Credit amount (zero if debit).
    pub credit: Decimal,
}

/// Pure report assembly over account activity sums.
pub struct ReportService;

impl ReportService {
    /// Builds a trial balance from per-account activity as of a date.
    ///
    /// Each account's net balance lands in its debit or credit column; the
    /// two column totals are equal whenever every posted entry balanced.
    #[must_use]
    pub fn trial_balance(as_of: NaiveDate, activities: &[AccountActivity]) -> TrialBalanceReport {
        let mut rows: Vec<TrialBalanceRow> = activities
            .iter()
            .map(|activity| {
                let net = activity.debit_total - activity.credit_total;
                TrialBalanceRow {
                    account_id: activity.account.id.into_inner(),
                    code: activity.account.code.clone(),
                    name: activity.account.name.clone(),
                    debit: net.max(Decimal::ZERO),
                    credit: (-net).max(Decimal::ZERO),
                }
            })
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));

        let total_debit: Decimal = rows.iter().map(|r| r.debit).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.credit).sum();

        TrialBalanceReport {
            as_of,
            rows,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced: total_debit == total_credit,
            },
        }
    }

    /// Builds a profit & loss report from revenue/expense activity within a
    /// date range.
    ///
    /// Activity for non-P&L account types is ignored, so the caller may pass
    /// the full activity set.
    #[must_use]
    pub fn profit_and_loss(
        period_start: NaiveDate,
        period_end: NaiveDate,
        activities: &[AccountActivity],
    ) -> ProfitAndLossReport {
        let mut revenue = ProfitAndLossSection::default();
        let mut cost_of_sales = ProfitAndLossSection::default();
        let mut operating_expenses = ProfitAndLossSection::default();
        let mut other_expenses = ProfitAndLossSection::default();

        for activity in activities {
            let section = match activity.account.account_type {
                AccountType::Revenue => &mut revenue,
                AccountType::Expense => match activity.account.subtype {
                    Some(AccountSubtype::CostOfGoodsSold) => &mut cost_of_sales,
                    Some(AccountSubtype::OtherExpense) => &mut other_expenses,
                    _ => &mut operating_expenses,
                },
                _ => continue,
            };
            section.total += activity.balance();
            section.rows.push(activity.balance_row());
        }

        for section in [
            &mut revenue,
            &mut cost_of_sales,
            &mut operating_expenses,
            &mut other_expenses,
        ] {
            section.rows.sort_by(|a, b| a.code.cmp(&b.code));
        }

        let gross_profit = revenue.total - cost_of_sales.total;
        let operating_income = gross_profit - operating_expenses.total;
        let net_income = operating_income - other_expenses.total;

        ProfitAndLossReport {
            period_start,
            period_end,
            revenue,
            cost_of_sales,
            gross_profit,
            operating_expenses,
            operating_income,
            other_expenses,
            net_income,
        }
    }

    /// Builds a balance sheet from all-time activity as of a date.
    ///
    /// Revenue and expense activity is folded into the equity section as a
    /// synthetic "Current period earnings" row, so the sheet balances
    /// without a closing entry.
    #[must_use]
    pub fn balance_sheet(as_of: NaiveDate, activities: &[AccountActivity]) -> BalanceSheetReport {
        let mut assets = BalanceSheetSection::default();
        let mut liabilities = BalanceSheetSection::default();
        let mut equity = BalanceSheetSection::default();
        let mut earnings = Decimal::ZERO;

        for activity in activities {
            match activity.account.account_type {
                AccountType::Asset => {
                    assets.total += activity.balance();
                    assets.rows.push(activity.balance_row());
                }
                AccountType::Liability => {
                    liabilities.total += activity.balance();
                    liabilities.rows.push(activity.balance_row());
                }
                AccountType::Equity => {
                    equity.total += activity.balance();
                    equity.rows.push(activity.balance_row());
                }
                AccountType::Revenue => earnings += activity.balance(),
                AccountType::Expense => earnings -= activity.balance(),
            }
        }

        for section in [&mut assets, &mut liabilities, &mut equity] {
            section.rows.sort_by(|a, b| a.code.cmp(&b.code));
        }

        equity.total += earnings;
        equity.rows.push(AccountBalanceRow {
            account_id: Uuid::nil(),
            code: String::new(),
            name: "Current period earnings".to_string(),
            total_debit: Decimal::ZERO,
            total_credit: Decimal::ZERO,
            balance: earnings,
        });

        let total_assets = assets.total;
        let liabilities_and_equity = liabilities.total + equity.total;

        BalanceSheetReport {
            as_of,
            assets,
            liabilities,
            equity,
            total_assets,
            liabilities_and_equity,
            is_balanced: total_assets == liabilities_and_equity,
        }
    }

    /// Builds an account ledger listing with running balances.
    ///
    /// Rows must already be ordered by entry date; the running balance
    /// starts from `opening_balance` and applies each line in the account's
    /// normal direction.
    #[must_use]
    pub fn account_ledger(
        account: &Account,
        opening_balance: Decimal,
        rows: &[LedgerRowInput],
    ) -> AccountLedgerReport {
        let mut running = opening_balance;
        let ledger_rows: Vec<AccountLedgerRow> = rows
            .iter()
            .map(|row| {
                running += balance_change(account.account_type, row.debit, row.credit);
                AccountLedgerRow {
                    entry_id: row.entry_id,
                    entry_date: row.entry_date,
                    description: row.description.clone(),
                    debit: row.debit,
                    credit: row.credit,
                    running_balance: running,
                }
            })
            .collect();

        AccountLedgerReport {
            account_id: account.id.into_inner(),
            code: account.code.clone(),
            name: account.name.clone(),
            opening_balance,
            rows: ledger_rows,
            closing_balance: running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_shared::types::AccountId;

    fn account(
        code: &str,
        account_type: AccountType,
        subtype: Option<AccountSubtype>,
    ) -> Account {
        Account {
            id: AccountId::new(),
            code: code.to_string(),
            name: format!("Account {code}"),
            account_type,
            subtype,
            is_active: true,
        }
    }

    fn activity(
        code: &str,
        account_type: AccountType,
        subtype: Option<AccountSubtype>,
        debit: Decimal,
        credit: Decimal,
    ) -> AccountActivity {
        AccountActivity {
            account: account(code, account_type, subtype),
            debit_total: debit,
            credit_total: credit,
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
    }

    /// Activity from: invoice $1,062.50 (rev 1000 + tax 62.50), expense $88.
    fn sample_activities() -> Vec<AccountActivity> {
        vec![
            activity(
                "1200",
                AccountType::Asset,
                Some(AccountSubtype::AccountsReceivable),
                dec!(1062.50),
                Decimal::ZERO,
            ),
            activity(
                "1000",
                AccountType::Asset,
                Some(AccountSubtype::Bank),
                Decimal::ZERO,
                dec!(88.00),
            ),
            activity(
                "2100",
                AccountType::Liability,
                Some(AccountSubtype::TaxPayable),
                Decimal::ZERO,
                dec!(62.50),
            ),
            activity(
                "4000",
                AccountType::Revenue,
                Some(AccountSubtype::OperatingRevenue),
                Decimal::ZERO,
                dec!(1000.00),
            ),
            activity(
                "6100",
                AccountType::Expense,
                Some(AccountSubtype::OperatingExpense),
                dec!(88.00),
                Decimal::ZERO,
            ),
        ]
    }

    #[test]
    fn test_trial_balance_columns_net_to_zero() {
        let report = ReportService::trial_balance(as_of(), &sample_activities());

        assert_eq!(report.totals.total_debit, report.totals.total_credit);
        assert!(report.totals.is_balanced);
        assert_eq!(report.totals.total_debit, dec!(1150.50));

        // Ordered by code.
        let codes: Vec<&str> = report.rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["1000", "1200", "2100", "4000", "6100"]);
    }

    #[test]
    fn test_trial_balance_credit_balance_lands_in_credit_column() {
        let report = ReportService::trial_balance(as_of(), &sample_activities());
        let revenue = report.rows.iter().find(|r| r.code == "4000").unwrap();
        assert_eq!(revenue.debit, Decimal::ZERO);
        assert_eq!(revenue.credit, dec!(1000.00));
    }

    #[test]
    fn test_profit_and_loss_sections_and_subtotals() {
        let mut activities = sample_activities();
        activities.push(activity(
            "5000",
            AccountType::Expense,
            Some(AccountSubtype::CostOfGoodsSold),
            dec!(300.00),
            Decimal::ZERO,
        ));
        activities.push(activity(
            "6900",
            AccountType::Expense,
            Some(AccountSubtype::OtherExpense),
            dec!(12.00),
            Decimal::ZERO,
        ));

        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let report = ReportService::profit_and_loss(start, as_of(), &activities);

        assert_eq!(report.revenue.total, dec!(1000.00));
        assert_eq!(report.cost_of_sales.total, dec!(300.00));
        assert_eq!(report.gross_profit, dec!(700.00));
        assert_eq!(report.operating_expenses.total, dec!(88.00));
        assert_eq!(report.operating_income, dec!(612.00));
        assert_eq!(report.other_expenses.total, dec!(12.00));
        assert_eq!(report.net_income, dec!(600.00));
    }

    #[test]
    fn test_profit_and_loss_ignores_balance_sheet_accounts() {
        let report = ReportService::profit_and_loss(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            as_of(),
            &sample_activities(),
        );
        let all_rows = report.revenue.rows.len()
            + report.cost_of_sales.rows.len()
            + report.operating_expenses.rows.len()
            + report.other_expenses.rows.len();
        assert_eq!(all_rows, 2);
    }

    #[test]
    fn test_balance_sheet_balances_via_current_earnings() {
        let report = ReportService::balance_sheet(as_of(), &sample_activities());

        // Assets: 1062.50 - 88.00 = 974.50
        assert_eq!(report.total_assets, dec!(974.50));
        // Liabilities 62.50 + earnings (1000 - 88) = 974.50
        assert_eq!(report.liabilities_and_equity, dec!(974.50));
        assert!(report.is_balanced);

        let earnings = report
            .equity
            .rows
            .iter()
            .find(|r| r.name == "Current period earnings")
            .unwrap();
        assert_eq!(earnings.balance, dec!(912.00));
    }

    #[test]
    fn test_account_ledger_running_balance() {
        let bank = account("1000", AccountType::Asset, Some(AccountSubtype::Bank));
        let rows = vec![
            LedgerRowInput {
                entry_id: Uuid::new_v4(),
                entry_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                description: "Deposit".to_string(),
                debit: dec!(500.00),
                credit: Decimal::ZERO,
            },
            LedgerRowInput {
                entry_id: Uuid::new_v4(),
                entry_date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
                description: "Rent".to_string(),
                debit: Decimal::ZERO,
                credit: dec!(200.00),
            },
        ];

        let report = ReportService::account_ledger(&bank, dec!(100.00), &rows);

        assert_eq!(report.opening_balance, dec!(100.00));
        assert_eq!(report.rows[0].running_balance, dec!(600.00));
        assert_eq!(report.rows[1].running_balance, dec!(400.00));
        assert_eq!(report.closing_balance, dec!(400.00));
    }

    #[test]
    fn test_account_ledger_credit_normal_direction() {
        let payable = account(
            "2000",
            AccountType::Liability,
            Some(AccountSubtype::AccountsPayable),
        );
        let rows = vec![LedgerRowInput {
            entry_id: Uuid::new_v4(),
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            description: "Bill".to_string(),
            debit: Decimal::ZERO,
            credit: dec!(50.00),
        }];

        let report = ReportService::account_ledger(&payable, Decimal::ZERO, &rows);
        assert_eq!(report.closing_balance, dec!(50.00));
    }

    #[test]
    fn test_reversal_pair_nets_to_zero_in_reports() {
        // An entry and its reversal both appear in activity sums.
        let activities = vec![
            activity(
                "1200",
                AccountType::Asset,
                Some(AccountSubtype::AccountsReceivable),
                dec!(100.00),
                dec!(100.00),
            ),
            activity(
                "4000",
                AccountType::Revenue,
                Some(AccountSubtype::OperatingRevenue),
                dec!(100.00),
                dec!(100.00),
            ),
        ];

        let report = ReportService::trial_balance(as_of(), &activities);
        assert_eq!(report.totals.total_debit, Decimal::ZERO);
        assert_eq!(report.totals.total_credit, Decimal::ZERO);
        assert!(report.totals.is_balanced);
    }
}
