//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod depreciation;
pub mod fiscal;
pub mod inventory;
pub mod posting;
pub mod report;

pub use account::{AccountError, AccountRepository, CreateAccountInput};
pub use depreciation::{
    CreateScheduleInput, DepreciationRepository, DepreciationStoreError, StoredSchedule,
};
pub use fiscal::{FiscalError, FiscalRepository};
pub use inventory::{InventoryRepository, InventoryStoreError};
pub use posting::{EntryWithLines, InventoryEffects, PostedEntry, PostingError, PostingRepository};
pub use report::{BalanceMismatch, ReportError, ReportRepository};
