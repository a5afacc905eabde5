//! `SeaORM` entity definitions.

pub mod account_balances;
pub mod accounts;
pub mod depreciation_schedules;
pub mod fiscal_periods;
pub mod inventory_cost_layers;
pub mod journal_entries;
pub mod journal_lines;
pub mod sea_orm_active_enums;
