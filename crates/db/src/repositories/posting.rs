//! Posting repository: the only writer of the journal.
//!
//! Posting is atomic and at-most-once per source document. The entry, its
//! lines, the balance cache update, and any inventory side effects commit in
//! one serializable transaction; the partial unique index on
//! `(source_document_type, source_document_id)` catches concurrent duplicates
//! that race past the pre-check, in which case the existing entry is returned
//! instead of an error.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, IsolationLevel, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use tally_core::fiscal::find_period;
use tally_core::inventory::{CostLayer, FifoCosting, InventoryError, LayerConsumption};
use tally_core::ledger::{
    balance_change, Account, AccountType, EntryStatus, LedgerError, LedgerService, Side,
    SourceDocumentRef, ValidatedEntry,
};
use tally_core::workflow::{check_transition, OriginalEntry, OriginalLine, ReversalService, WorkflowError};
use tally_shared::types::{AccountId, CostLayerId, JournalEntryId, JournalLineId, UserId};

use crate::entities::{
    account_balances, accounts, fiscal_periods, inventory_cost_layers, journal_entries,
    journal_lines,
};

use super::account::to_account;
use super::fiscal::to_period;
use super::inventory::to_layer;

/// Error types for posting operations.
#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    /// Entry validation failure surfaced at posting time.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Status transition or reversal rule violation.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Inventory effect could not be applied.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Inventory side effects applied atomically with a posting.
#[derive(Debug, Clone, Default)]
pub struct InventoryEffects {
    /// Layers created by the posting (bill approval).
    pub new_layers: Vec<CostLayer>,
    /// Quantities taken from existing layers (inventory issue).
    pub consume: Vec<LayerConsumption>,
    /// Quantities returned to their original layers (issue reversal).
    pub restore: Vec<LayerConsumption>,
    /// Untouched layers removed outright (bill reversal).
    pub remove_layers: Vec<CostLayerId>,
}

impl InventoryEffects {
    /// Effects of executing an issue plan.
    #[must_use]
    pub fn consuming(consumptions: Vec<LayerConsumption>) -> Self {
        Self {
            consume: consumptions,
            ..Self::default()
        }
    }

    /// Effects of restoring a previously executed issue plan.
    #[must_use]
    pub fn restoring(consumptions: Vec<LayerConsumption>) -> Self {
        Self {
            restore: consumptions,
            ..Self::default()
        }
    }

    /// Effects of receiving new stock layers.
    #[must_use]
    pub fn receiving(layers: Vec<CostLayer>) -> Self {
        Self {
            new_layers: layers,
            ..Self::default()
        }
    }
}

/// Outcome of a posting request.
#[derive(Debug, Clone, Copy)]
pub struct PostedEntry {
    /// The journal entry holding the postings.
    pub id: JournalEntryId,
    /// True when the source document was already posted and the existing
    /// entry is returned instead of a new one.
    pub already_existed: bool,
}

/// A journal entry row together with its lines.
#[derive(Debug, Clone)]
pub struct EntryWithLines {
    /// The entry row.
    pub entry: journal_entries::Model,
    /// The lines ordered by line number.
    pub lines: Vec<journal_lines::Model>,
}

/// Repository for journal posting operations.
#[derive(Debug, Clone)]
pub struct PostingRepository {
    db: DatabaseConnection,
}

impl PostingRepository {
    /// Creates a new posting repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts a validated entry with its inventory side effects.
    ///
    /// When the entry carries a source document reference and that document
    /// was already posted, the existing entry is returned with
    /// `already_existed` set and nothing is written.
    ///
    /// # Errors
    ///
    /// - `Workflow(NotReversible)` / `Workflow(AlreadyReversed)` for a
    ///   reversal whose original is not in a reversible state
    /// - `Inventory(..)` if a cost layer effect cannot be applied
    /// - `Database` for connection or constraint failures
    pub async fn post(
        &self,
        entry: &ValidatedEntry,
        effects: InventoryEffects,
    ) -> Result<PostedEntry, PostingError> {
        if let Some(source) = entry.source() {
            if let Some(existing) = self.find_by_source(source).await? {
                return Ok(PostedEntry {
                    id: existing,
                    already_existed: true,
                });
            }
        }

        match self.insert_posted(entry, &effects).await {
            Ok(id) => Ok(PostedEntry {
                id,
                already_existed: false,
            }),
            Err(PostingError::Database(db_err)) => {
                self.resolve_unique_violation(entry, db_err).await
            }
            Err(other) => Err(other),
        }
    }

    /// Stores a validated entry as a draft, without ledger effects.
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails.
    pub async fn create_draft(
        &self,
        entry: &ValidatedEntry,
    ) -> Result<JournalEntryId, PostingError> {
        let txn = self.db.begin().await?;
        let id = insert_entry(&txn, entry, EntryStatus::Draft).await?;
        txn.commit().await?;
        Ok(id)
    }

    /// Posts a previously stored draft.
    ///
    /// The draft is re-checked against current ledger state: the fiscal
    /// period containing its entry date must still be open and its accounts
    /// must still be active. Validation at draft creation time does not
    /// survive a period close in between.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the draft does not exist
    /// - `Workflow(InvalidTransition)` if the entry is not a draft
    /// - `Ledger(PeriodClosed)` if the entry date's period has closed
    /// - `Ledger(AccountInactive)` if a line's account was deactivated
    pub async fn post_draft(&self, id: JournalEntryId) -> Result<PostedEntry, PostingError> {
        let record = self.get(id).await?;
        let status: EntryStatus = record.entry.status.into();
        check_transition(status, EntryStatus::Posted)?;

        let entry_date = record.entry.entry_date;
        let period = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::StartDate.lte(entry_date))
            .filter(fiscal_periods::Column::EndDate.gte(entry_date))
            .one(&self.db)
            .await?
            .map(to_period)
            .ok_or(LedgerError::NoFiscalPeriod(entry_date))?;
        period.check_open(entry_date)?;

        let account_types = self.active_account_types_for(&record.lines).await?;

        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await?;

        let mut active: journal_entries::ActiveModel = record.entry.into();
        active.status = Set(EntryStatus::Posted.into());
        active.posted_at = Set(Some(Utc::now().into()));
        active.update(&txn).await?;

        let deltas = line_model_deltas(&record.lines, &account_types);
        apply_balance_deltas(&txn, &deltas).await?;

        txn.commit().await?;
        Ok(PostedEntry {
            id,
            already_existed: false,
        })
    }

    /// Reverses a posted entry in one call.
    ///
    /// Loads the original, builds the compensating entry (sides swapped,
    /// back-reference set) dated at `reversal_date`, validates it against
    /// the current chart and fiscal periods, and posts it. Callers normally
    /// pass today's date. Posting the reversal marks the original `void`
    /// inside the same transaction. `effects` carries the inventory side of
    /// the reversal (restored consumptions for an issue, removed layers for
    /// a bill void).
    ///
    /// # Errors
    ///
    /// - `NotFound` if the original does not exist
    /// - `Workflow(NotReversible)` / `Workflow(AlreadyReversed)` when the
    ///   original is not reversible
    /// - `Workflow(ReversalPeriodClosed)` when `reversal_date` is not in an
    ///   open fiscal period
    /// - `Inventory(..)` if a cost layer effect cannot be applied
    pub async fn reverse_entry(
        &self,
        entry_id: JournalEntryId,
        reversal_date: NaiveDate,
        reason: &str,
        reversed_by: UserId,
        effects: InventoryEffects,
    ) -> Result<PostedEntry, PostingError> {
        let original = self.load_original(entry_id).await?;

        let periods: Vec<_> = fiscal_periods::Entity::find()
            .order_by_asc(fiscal_periods::Column::StartDate)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_period)
            .collect();

        let candidate =
            ReversalService::build_reversal(&original, &periods, reversal_date, reason, reversed_by)?;

        let account_ids: Vec<Uuid> = candidate
            .lines
            .iter()
            .map(|line| line.account_id.into_inner())
            .collect();
        let chart: HashMap<AccountId, Account> = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(account_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_account)
            .map(|a| (a.id, a))
            .collect();

        let validated = LedgerService::validate(
            &candidate,
            |id| chart.get(&id).cloned(),
            |date| find_period(&periods, date).cloned(),
        )?;

        let posted = self.post(&validated, effects).await?;
        tracing::info!(
            original_id = %entry_id,
            reversal_id = %posted.id,
            "journal entry reversed"
        );
        Ok(posted)
    }

    /// Fetches an entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no entry with the id exists.
    pub async fn get(&self, id: JournalEntryId) -> Result<EntryWithLines, PostingError> {
        let entry = journal_entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(PostingError::NotFound(id.into_inner()))?;

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::EntryId.eq(id.into_inner()))
            .order_by_asc(journal_lines::Column::LineNumber)
            .all(&self.db)
            .await?;

        Ok(EntryWithLines { entry, lines })
    }

    /// Loads an entry in the shape the reversal builder consumes.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no entry with the id exists.
    pub async fn load_original(&self, id: JournalEntryId) -> Result<OriginalEntry, PostingError> {
        let record = self.get(id).await?;
        let reversed_by = self.find_reversal_of(id).await?;

        let lines = record
            .lines
            .iter()
            .map(|line| OriginalLine {
                account_id: AccountId::from_uuid(line.account_id),
                side: if line.debit > Decimal::ZERO {
                    Side::Debit
                } else {
                    Side::Credit
                },
                amount: line.debit + line.credit,
                description: line.description.clone(),
            })
            .collect();

        Ok(OriginalEntry {
            id,
            entry_date: record.entry.entry_date,
            description: record.entry.description,
            status: record.entry.status.into(),
            reversed_by,
            lines,
        })
    }

    /// Finds the journal entry posted for a source document, if any.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn find_by_source(
        &self,
        source: SourceDocumentRef,
    ) -> Result<Option<JournalEntryId>, PostingError> {
        Ok(journal_entries::Entity::find()
            .filter(journal_entries::Column::SourceDocumentType.eq(
                crate::entities::sea_orm_active_enums::SourceDocumentType::from(
                    source.document_type,
                ),
            ))
            .filter(journal_entries::Column::SourceDocumentId.eq(source.document_id))
            .one(&self.db)
            .await?
            .map(|m| JournalEntryId::from_uuid(m.id)))
    }

    /// Finds the reversal entry of a posted entry, if one exists.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn find_reversal_of(
        &self,
        original: JournalEntryId,
    ) -> Result<Option<JournalEntryId>, PostingError> {
        Ok(journal_entries::Entity::find()
            .filter(journal_entries::Column::ReversesEntryId.eq(original.into_inner()))
            .one(&self.db)
            .await?
            .map(|m| JournalEntryId::from_uuid(m.id)))
    }

    async fn insert_posted(
        &self,
        entry: &ValidatedEntry,
        effects: &InventoryEffects,
    ) -> Result<JournalEntryId, PostingError> {
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await?;

        let id = insert_entry(&txn, entry, EntryStatus::Posted).await?;

        let deltas = validated_line_deltas(entry);
        apply_balance_deltas(&txn, &deltas).await?;

        apply_inventory_effects(&txn, id, effects).await?;

        if let Some(original_id) = entry.reverses() {
            void_original(&txn, original_id).await?;
        }

        txn.commit().await?;
        tracing::info!(entry_id = %id, "journal entry posted");
        Ok(id)
    }

    /// Turns a unique-constraint failure into the idempotent success path
    /// (source document already posted) or the precise workflow error
    /// (original already reversed).
    async fn resolve_unique_violation(
        &self,
        entry: &ValidatedEntry,
        db_err: DbErr,
    ) -> Result<PostedEntry, PostingError> {
        if !matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            return Err(PostingError::Database(db_err));
        }

        if let Some(source) = entry.source() {
            if let Some(existing) = self.find_by_source(source).await? {
                return Ok(PostedEntry {
                    id: existing,
                    already_existed: true,
                });
            }
        }

        if let Some(original_id) = entry.reverses() {
            if let Some(reversal_id) = self.find_reversal_of(original_id).await? {
                return Err(PostingError::Workflow(WorkflowError::AlreadyReversed {
                    entry_id: original_id.into_inner(),
                    reversal_entry_id: reversal_id.into_inner(),
                }));
            }
        }

        Err(PostingError::Database(db_err))
    }

    /// Account types for a draft's lines, rejecting deactivated accounts.
    async fn active_account_types_for(
        &self,
        lines: &[journal_lines::Model],
    ) -> Result<HashMap<Uuid, AccountType>, PostingError> {
        let ids: Vec<Uuid> = lines.iter().map(|l| l.account_id).collect();
        let rows = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;

        let mut types = HashMap::with_capacity(rows.len());
        for row in rows {
            if !row.is_active {
                return Err(PostingError::Ledger(LedgerError::AccountInactive(row.id)));
            }
            types.insert(row.id, row.account_type.into());
        }
        Ok(types)
    }
}

async fn insert_entry(
    txn: &DatabaseTransaction,
    entry: &ValidatedEntry,
    status: EntryStatus,
) -> Result<JournalEntryId, PostingError> {
    let id = JournalEntryId::new();
    let posted_at = match status {
        EntryStatus::Posted => Some(Utc::now().into()),
        EntryStatus::Draft | EntryStatus::Void => None,
    };

    journal_entries::ActiveModel {
        id: Set(id.into_inner()),
        entry_date: Set(entry.entry_date()),
        description: Set(entry.description().to_string()),
        reference: Set(entry.reference().map(ToString::to_string)),
        status: Set(status.into()),
        source_document_type: Set(entry.source().map(|s| s.document_type.into())),
        source_document_id: Set(entry.source().map(|s| s.document_id)),
        reverses_entry_id: Set(entry.reverses().map(JournalEntryId::into_inner)),
        created_by: Set(entry.created_by().into_inner()),
        posted_at: Set(posted_at),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    let mut line_number = 1i32;
    for line in entry.lines() {
        journal_lines::ActiveModel {
            id: Set(JournalLineId::new().into_inner()),
            entry_id: Set(id.into_inner()),
            line_number: Set(line_number),
            account_id: Set(line.account_id.into_inner()),
            debit: Set(line.debit),
            credit: Set(line.credit),
            description: Set(line.description.clone()),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        line_number += 1;
    }

    Ok(id)
}

/// Per-account totals contributed by one entry.
#[derive(Debug, Clone, Copy)]
struct BalanceDelta {
    account_type: AccountType,
    debit: Decimal,
    credit: Decimal,
}

fn validated_line_deltas(entry: &ValidatedEntry) -> HashMap<Uuid, BalanceDelta> {
    let mut deltas: HashMap<Uuid, BalanceDelta> = HashMap::new();
    for line in entry.lines() {
        let delta = deltas
            .entry(line.account_id.into_inner())
            .or_insert(BalanceDelta {
                account_type: line.account_type,
                debit: Decimal::ZERO,
                credit: Decimal::ZERO,
            });
        delta.debit += line.debit;
        delta.credit += line.credit;
    }
    deltas
}

fn line_model_deltas(
    lines: &[journal_lines::Model],
    account_types: &HashMap<Uuid, AccountType>,
) -> HashMap<Uuid, BalanceDelta> {
    let mut deltas: HashMap<Uuid, BalanceDelta> = HashMap::new();
    for line in lines {
        let Some(account_type) = account_types.get(&line.account_id).copied() else {
            continue;
        };
        let delta = deltas.entry(line.account_id).or_insert(BalanceDelta {
            account_type,
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
        });
        delta.debit += line.debit;
        delta.credit += line.credit;
    }
    deltas
}

async fn apply_balance_deltas(
    txn: &DatabaseTransaction,
    deltas: &HashMap<Uuid, BalanceDelta>,
) -> Result<(), PostingError> {
    for (account_id, delta) in deltas {
        let change = balance_change(delta.account_type, delta.debit, delta.credit);

        let existing = account_balances::Entity::find_by_id(*account_id)
            .one(txn)
            .await?;

        match existing {
            Some(row) => {
                let mut active: account_balances::ActiveModel = row.clone().into();
                active.debit_total = Set(row.debit_total + delta.debit);
                active.credit_total = Set(row.credit_total + delta.credit);
                active.balance = Set(row.balance + change);
                active.version = Set(row.version + 1);
                active.updated_at = Set(Utc::now().into());
                active.update(txn).await?;
            }
            None => {
                account_balances::ActiveModel {
                    account_id: Set(*account_id),
                    debit_total: Set(delta.debit),
                    credit_total: Set(delta.credit),
                    balance: Set(change),
                    version: Set(1),
                    updated_at: Set(Utc::now().into()),
                }
                .insert(txn)
                .await?;
            }
        }
    }
    Ok(())
}

async fn apply_inventory_effects(
    txn: &DatabaseTransaction,
    entry_id: JournalEntryId,
    effects: &InventoryEffects,
) -> Result<(), PostingError> {
    for layer in &effects.new_layers {
        inventory_cost_layers::ActiveModel {
            id: Set(layer.id.into_inner()),
            product_id: Set(layer.product_id.into_inner()),
            source_entry_id: Set(Some(entry_id.into_inner())),
            received_date: Set(layer.received_date),
            quantity: Set(layer.quantity),
            remaining_quantity: Set(layer.remaining),
            unit_cost: Set(layer.unit_cost),
            ..Default::default()
        }
        .insert(txn)
        .await?;
    }

    for consumption in &effects.consume {
        adjust_layer(txn, consumption.layer_id, -consumption.quantity).await?;
    }

    for restoration in &effects.restore {
        adjust_layer(txn, restoration.layer_id, restoration.quantity).await?;
    }

    for layer_id in &effects.remove_layers {
        let model = inventory_cost_layers::Entity::find_by_id(layer_id.into_inner())
            .one(txn)
            .await?
            .ok_or(InventoryError::LayerNotFound(layer_id.into_inner()))?;
        FifoCosting::check_removable(&to_layer(&model))?;
        inventory_cost_layers::Entity::delete_by_id(layer_id.into_inner())
            .exec(txn)
            .await?;
    }

    Ok(())
}

async fn adjust_layer(
    txn: &DatabaseTransaction,
    layer_id: CostLayerId,
    quantity_delta: Decimal,
) -> Result<(), PostingError> {
    let model = inventory_cost_layers::Entity::find_by_id(layer_id.into_inner())
        .one(txn)
        .await?
        .ok_or(InventoryError::LayerNotFound(layer_id.into_inner()))?;

    let new_remaining = model.remaining_quantity + quantity_delta;
    if new_remaining < Decimal::ZERO {
        return Err(PostingError::Inventory(InventoryError::InsufficientStock {
            requested: -quantity_delta,
            available: model.remaining_quantity,
        }));
    }

    let mut active: inventory_cost_layers::ActiveModel = model.into();
    active.remaining_quantity = Set(new_remaining);
    active.update(txn).await?;
    Ok(())
}

async fn void_original(
    txn: &DatabaseTransaction,
    original_id: JournalEntryId,
) -> Result<(), PostingError> {
    let model = journal_entries::Entity::find_by_id(original_id.into_inner())
        .one(txn)
        .await?
        .ok_or(PostingError::NotFound(original_id.into_inner()))?;

    let status: EntryStatus = model.status.into();
    if status != EntryStatus::Posted {
        return Err(PostingError::Workflow(WorkflowError::NotReversible {
            entry_id: original_id.into_inner(),
            status,
        }));
    }

    let mut active: journal_entries::ActiveModel = model.into();
    active.status = Set(EntryStatus::Void.into());
    active.update(txn).await?;
    Ok(())
}
