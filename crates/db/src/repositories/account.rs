//! Account repository for chart of accounts operations.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use tally_core::ledger::{Account, AccountSubtype, AccountType};
use tally_shared::types::AccountId;

use crate::entities::{accounts, journal_lines};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Account code already in use.
    #[error("Account code already in use: {0}")]
    CodeTaken(String),

    /// Account has posted lines and cannot be removed.
    #[error("Account {0} has journal lines and cannot be deleted")]
    HasPostings(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Stable, unique account code.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Fundamental account type.
    pub account_type: AccountType,
    /// Subtype for report grouping.
    pub subtype: Option<AccountSubtype>,
}

/// Repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `CodeTaken` if the code is already in use.
    pub async fn create(&self, input: CreateAccountInput) -> Result<Account, AccountError> {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(&input.code))
            .count(&self.db)
            .await?;
        if existing > 0 {
            return Err(AccountError::CodeTaken(input.code));
        }

        let id = AccountId::new();
        let model = accounts::ActiveModel {
            id: Set(id.into_inner()),
            code: Set(input.code),
            name: Set(input.name),
            account_type: Set(input.account_type.into()),
            account_subtype: Set(input.subtype.map(Into::into)),
            is_active: Set(true),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await?;

        Ok(to_account(inserted))
    }

    /// Fetches an account by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account with the id exists.
    pub async fn get(&self, id: AccountId) -> Result<Account, AccountError> {
        accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(to_account)
            .ok_or(AccountError::NotFound(id.into_inner()))
    }

    /// Fetches an account by code.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Account>, AccountError> {
        Ok(accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?
            .map(to_account))
    }

    /// Lists all accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list(&self) -> Result<Vec<Account>, AccountError> {
        Ok(accounts::Entity::find()
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_account)
            .collect())
    }

    /// Loads the full chart as a lookup map for entry validation.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn lookup_map(&self) -> Result<HashMap<AccountId, Account>, AccountError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect())
    }

    /// Deactivates an account so it accepts no new postings.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account with the id exists.
    pub async fn deactivate(&self, id: AccountId) -> Result<Account, AccountError> {
        let model = accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id.into_inner()))?;

        let mut active: accounts::ActiveModel = model.into();
        active.is_active = Set(false);
        Ok(to_account(active.update(&self.db).await?))
    }

    /// Deletes an account that has never been posted to.
    ///
    /// # Errors
    ///
    /// Returns `HasPostings` if any journal line references the account.
    pub async fn delete(&self, id: AccountId) -> Result<(), AccountError> {
        let referenced = journal_lines::Entity::find()
            .filter(journal_lines::Column::AccountId.eq(id.into_inner()))
            .count(&self.db)
            .await?;
        if referenced > 0 {
            return Err(AccountError::HasPostings(id.into_inner()));
        }

        let result = accounts::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AccountError::NotFound(id.into_inner()));
        }
        Ok(())
    }
}

/// Converts a row into the core account type.
pub(crate) fn to_account(model: accounts::Model) -> Account {
    Account {
        id: AccountId::from_uuid(model.id),
        code: model.code,
        name: model.name,
        account_type: model.account_type.into(),
        subtype: model.account_subtype.map(Into::into),
        is_active: model.is_active,
    }
}
