//! `SeaORM` active enums mapping Postgres enum types.
//!
//! Each enum mirrors a value type in `tally-core`; the `From` impls keep the
//! persistence mapping in one place so repositories never match on strings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use tally_core::depreciation::DepreciationMethod as CoreDepreciationMethod;
use tally_core::fiscal::PeriodStatus as CorePeriodStatus;
use tally_core::ledger::{
    AccountSubtype as CoreAccountSubtype, AccountType as CoreAccountType,
    EntryStatus as CoreEntryStatus, SourceDocumentType as CoreSourceDocumentType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
pub enum AccountType {
    #[sea_orm(string_value = "asset")]
    Asset,
    #[sea_orm(string_value = "liability")]
    Liability,
    #[sea_orm(string_value = "equity")]
    Equity,
    #[sea_orm(string_value = "revenue")]
    Revenue,
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<CoreAccountType> for AccountType {
    fn from(value: CoreAccountType) -> Self {
        match value {
            CoreAccountType::Asset => Self::Asset,
            CoreAccountType::Liability => Self::Liability,
            CoreAccountType::Equity => Self::Equity,
            CoreAccountType::Revenue => Self::Revenue,
            CoreAccountType::Expense => Self::Expense,
        }
    }
}

impl From<AccountType> for CoreAccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_subtype")]
pub enum AccountSubtype {
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "bank")]
    Bank,
    #[sea_orm(string_value = "accounts_receivable")]
    AccountsReceivable,
    #[sea_orm(string_value = "inventory")]
    Inventory,
    #[sea_orm(string_value = "fixed_asset")]
    FixedAsset,
    #[sea_orm(string_value = "accumulated_depreciation")]
    AccumulatedDepreciation,
    #[sea_orm(string_value = "other_asset")]
    OtherAsset,
    #[sea_orm(string_value = "accounts_payable")]
    AccountsPayable,
    #[sea_orm(string_value = "tax_payable")]
    TaxPayable,
    #[sea_orm(string_value = "other_liability")]
    OtherLiability,
    #[sea_orm(string_value = "owner_equity")]
    OwnerEquity,
    #[sea_orm(string_value = "retained_earnings")]
    RetainedEarnings,
    #[sea_orm(string_value = "operating_revenue")]
    OperatingRevenue,
    #[sea_orm(string_value = "other_revenue")]
    OtherRevenue,
    #[sea_orm(string_value = "cost_of_goods_sold")]
    CostOfGoodsSold,
    #[sea_orm(string_value = "operating_expense")]
    OperatingExpense,
    #[sea_orm(string_value = "depreciation_expense")]
    DepreciationExpense,
    #[sea_orm(string_value = "other_expense")]
    OtherExpense,
}

impl From<CoreAccountSubtype> for AccountSubtype {
    fn from(value: CoreAccountSubtype) -> Self {
        match value {
            CoreAccountSubtype::Cash => Self::Cash,
            CoreAccountSubtype::Bank => Self::Bank,
            CoreAccountSubtype::AccountsReceivable => Self::AccountsReceivable,
            CoreAccountSubtype::Inventory => Self::Inventory,
            CoreAccountSubtype::FixedAsset => Self::FixedAsset,
            CoreAccountSubtype::AccumulatedDepreciation => Self::AccumulatedDepreciation,
            CoreAccountSubtype::OtherAsset => Self::OtherAsset,
            CoreAccountSubtype::AccountsPayable => Self::AccountsPayable,
            CoreAccountSubtype::TaxPayable => Self::TaxPayable,
            CoreAccountSubtype::OtherLiability => Self::OtherLiability,
            CoreAccountSubtype::OwnerEquity => Self::OwnerEquity,
            CoreAccountSubtype::RetainedEarnings => Self::RetainedEarnings,
            CoreAccountSubtype::OperatingRevenue => Self::OperatingRevenue,
            CoreAccountSubtype::OtherRevenue => Self::OtherRevenue,
            CoreAccountSubtype::CostOfGoodsSold => Self::CostOfGoodsSold,
            CoreAccountSubtype::OperatingExpense => Self::OperatingExpense,
            CoreAccountSubtype::DepreciationExpense => Self::DepreciationExpense,
            CoreAccountSubtype::OtherExpense => Self::OtherExpense,
        }
    }
}

impl From<AccountSubtype> for CoreAccountSubtype {
    fn from(value: AccountSubtype) -> Self {
        match value {
            AccountSubtype::Cash => Self::Cash,
            AccountSubtype::Bank => Self::Bank,
            AccountSubtype::AccountsReceivable => Self::AccountsReceivable,
            AccountSubtype::Inventory => Self::Inventory,
            AccountSubtype::FixedAsset => Self::FixedAsset,
            AccountSubtype::AccumulatedDepreciation => Self::AccumulatedDepreciation,
            AccountSubtype::OtherAsset => Self::OtherAsset,
            AccountSubtype::AccountsPayable => Self::AccountsPayable,
            AccountSubtype::TaxPayable => Self::TaxPayable,
            AccountSubtype::OtherLiability => Self::OtherLiability,
            AccountSubtype::OwnerEquity => Self::OwnerEquity,
            AccountSubtype::RetainedEarnings => Self::RetainedEarnings,
            AccountSubtype::OperatingRevenue => Self::OperatingRevenue,
            AccountSubtype::OtherRevenue => Self::OtherRevenue,
            AccountSubtype::CostOfGoodsSold => Self::CostOfGoodsSold,
            AccountSubtype::OperatingExpense => Self::OperatingExpense,
            AccountSubtype::DepreciationExpense => Self::DepreciationExpense,
            AccountSubtype::OtherExpense => Self::OtherExpense,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_status")]
pub enum EntryStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "posted")]
    Posted,
    #[sea_orm(string_value = "void")]
    Void,
}

impl From<CoreEntryStatus> for EntryStatus {
    fn from(value: CoreEntryStatus) -> Self {
        match value {
            CoreEntryStatus::Draft => Self::Draft,
            CoreEntryStatus::Posted => Self::Posted,
            CoreEntryStatus::Void => Self::Void,
        }
    }
}

impl From<EntryStatus> for CoreEntryStatus {
    fn from(value: EntryStatus) -> Self {
        match value {
            EntryStatus::Draft => Self::Draft,
            EntryStatus::Posted => Self::Posted,
            EntryStatus::Void => Self::Void,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "source_document_type")]
pub enum SourceDocumentType {
    #[sea_orm(string_value = "invoice")]
    Invoice,
    #[sea_orm(string_value = "invoice_payment")]
    InvoicePayment,
    #[sea_orm(string_value = "bill")]
    Bill,
    #[sea_orm(string_value = "expense")]
    Expense,
    #[sea_orm(string_value = "depreciation_run")]
    DepreciationRun,
    #[sea_orm(string_value = "inventory_issue")]
    InventoryIssue,
}

impl From<CoreSourceDocumentType> for SourceDocumentType {
    fn from(value: CoreSourceDocumentType) -> Self {
        match value {
            CoreSourceDocumentType::Invoice => Self::Invoice,
            CoreSourceDocumentType::InvoicePayment => Self::InvoicePayment,
            CoreSourceDocumentType::Bill => Self::Bill,
            CoreSourceDocumentType::Expense => Self::Expense,
            CoreSourceDocumentType::DepreciationRun => Self::DepreciationRun,
            CoreSourceDocumentType::InventoryIssue => Self::InventoryIssue,
        }
    }
}

impl From<SourceDocumentType> for CoreSourceDocumentType {
    fn from(value: SourceDocumentType) -> Self {
        match value {
            SourceDocumentType::Invoice => Self::Invoice,
            SourceDocumentType::InvoicePayment => Self::InvoicePayment,
            SourceDocumentType::Bill => Self::Bill,
            SourceDocumentType::Expense => Self::Expense,
            SourceDocumentType::DepreciationRun => Self::DepreciationRun,
            SourceDocumentType::InventoryIssue => Self::InventoryIssue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "fiscal_period_status")]
pub enum FiscalPeriodStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "closed")]
    Closed,
}

impl From<CorePeriodStatus> for FiscalPeriodStatus {
    fn from(value: CorePeriodStatus) -> Self {
        match value {
            CorePeriodStatus::Open => Self::Open,
            CorePeriodStatus::Closed => Self::Closed,
        }
    }
}

impl From<FiscalPeriodStatus> for CorePeriodStatus {
    fn from(value: FiscalPeriodStatus) -> Self {
        match value {
            FiscalPeriodStatus::Open => Self::Open,
            FiscalPeriodStatus::Closed => Self::Closed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "depreciation_method")]
pub enum DepreciationMethod {
    #[sea_orm(string_value = "straight_line")]
    StraightLine,
    #[sea_orm(string_value = "declining_balance")]
    DecliningBalance,
    #[sea_orm(string_value = "double_declining")]
    DoubleDeclining,
    #[sea_orm(string_value = "units_of_production")]
    UnitsOfProduction,
}

impl From<CoreDepreciationMethod> for DepreciationMethod {
    fn from(value: CoreDepreciationMethod) -> Self {
        match value {
            CoreDepreciationMethod::StraightLine => Self::StraightLine,
            CoreDepreciationMethod::DecliningBalance => Self::DecliningBalance,
            CoreDepreciationMethod::DoubleDeclining => Self::DoubleDeclining,
            CoreDepreciationMethod::UnitsOfProduction => Self::UnitsOfProduction,
        }
    }
}

impl From<DepreciationMethod> for CoreDepreciationMethod {
    fn from(value: DepreciationMethod) -> Self {
        match value {
            DepreciationMethod::StraightLine => Self::StraightLine,
            DepreciationMethod::DecliningBalance => Self::DecliningBalance,
            DepreciationMethod::DoubleDeclining => Self::DoubleDeclining,
            DepreciationMethod::UnitsOfProduction => Self::UnitsOfProduction,
        }
    }
}
