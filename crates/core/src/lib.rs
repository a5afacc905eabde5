//! Core bookkeeping logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here; durable state is owned by `tally-db`.
//!
//! # Modules
//!
//! - `ledger` - Double-entry journal types and the entry validator
//! - `fiscal` - Fiscal period rules (open/closed, posting dates)
//! - `workflow` - Entry status transitions and reversal construction
//! - `adapters` - Document-to-ledger line builders (invoice, bill, ...)
//! - `depreciation` - Fixed-asset depreciation schedule calculator
//! - `inventory` - FIFO cost layers and COGS computation
//! - `reports` - Trial balance, P&L, balance sheet, account ledger assembly

pub mod adapters;
pub mod depreciation;
pub mod fiscal;
pub mod inventory;
pub mod ledger;
pub mod reports;
pub mod workflow;
