//! Database seeder for Tally development and testing.
//!
//! Seeds a small chart of accounts and the current year's fiscal periods
//! for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, Utc};
use tally_core::ledger::{AccountSubtype, AccountType};
use tally_db::repositories::{AccountError, CreateAccountInput, FiscalError};
use tally_db::{AccountRepository, FiscalRepository};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = tally_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding chart of accounts...");
    seed_accounts(&AccountRepository::new(db.clone())).await;

    println!("Seeding fiscal periods...");
    seed_fiscal_year(&FiscalRepository::new(db)).await;

    println!("Seeding complete!");
}

/// The default chart: code, name, type, subtype.
fn default_chart() -> Vec<CreateAccountInput> {
    use AccountSubtype as S;
    use AccountType as T;

    let account = |code: &str, name: &str, account_type, subtype| CreateAccountInput {
        code: code.to_string(),
        name: name.to_string(),
        account_type,
        subtype: Some(subtype),
    };

    vec![
        account("1000", "Bank", T::Asset, S::Bank),
        account("1100", "Cash on hand", T::Asset, S::Cash),
        account("1200", "Accounts receivable", T::Asset, S::AccountsReceivable),
        account("1300", "Inventory", T::Asset, S::Inventory),
        account("1500", "Fixed assets", T::Asset, S::FixedAsset),
        account(
            "1510",
            "Accumulated depreciation",
            T::Asset,
            S::AccumulatedDepreciation,
        ),
        account("2000", "Accounts payable", T::Liability, S::AccountsPayable),
        account("2100", "Tax payable", T::Liability, S::TaxPayable),
        account("3000", "Owner's equity", T::Equity, S::OwnerEquity),
        account("3900", "Retained earnings", T::Equity, S::RetainedEarnings),
        account("4000", "Sales revenue", T::Revenue, S::OperatingRevenue),
        account("4900", "Other revenue", T::Revenue, S::OtherRevenue),
        account("5000", "Cost of goods sold", T::Expense, S::CostOfGoodsSold),
        account("6000", "Operating expenses", T::Expense, S::OperatingExpense),
        account("6500", "Depreciation expense", T::Expense, S::DepreciationExpense),
        account("6900", "Other expenses", T::Expense, S::OtherExpense),
    ]
}

async fn seed_accounts(repo: &AccountRepository) {
    for input in default_chart() {
        let code = input.code.clone();
        match repo.create(input).await {
            Ok(account) => println!("  Created account {} {}", account.code, account.name),
            Err(AccountError::CodeTaken(_)) => {
                println!("  Account {code} already exists, skipping...");
            }
            Err(e) => eprintln!("Failed to create account {code}: {e}"),
        }
    }
}

async fn seed_fiscal_year(repo: &FiscalRepository) {
    let year = Utc::now().date_naive().year();
    match repo.create_year(year).await {
        Ok(periods) => println!("  Created {} periods for {year}", periods.len()),
        Err(FiscalError::YearExists(_)) => {
            println!("  Fiscal periods for {year} already exist, skipping...");
        }
        Err(e) => eprintln!("Failed to create fiscal year {year}: {e}"),
    }
}
