//! Document-to-ledger adapters.
//!
//! One adapter per source document type. Each adapter is a pure function
//! from a document snapshot to an ordered line list that is balanced by
//! construction; the validator re-checks balance independently before
//! anything is posted.

pub mod bill;
pub mod depreciation;
pub mod expense;
pub mod inventory;
pub mod invoice;

pub use bill::{bill_approval, BillLineSnapshot, BillPosting, BillSnapshot, InventoryCategory};
pub use depreciation::{depreciation_run_lines, AssetCharge, DepreciationRunSnapshot};
pub use expense::{expense_lines, ExpenseSnapshot};
pub use inventory::{inventory_issue_lines, InventoryIssueSnapshot};
pub use invoice::{invoice_issuance_lines, invoice_payment_lines, InvoicePaymentSnapshot, InvoiceSnapshot};
