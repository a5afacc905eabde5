//! Fiscal period repository.

use chrono::{Datelike, NaiveDate};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use tally_core::fiscal::{monthly_periods, FiscalPeriod, PeriodStatus};
use tally_shared::types::FiscalPeriodId;

use crate::entities::fiscal_periods;

/// Error types for fiscal period operations.
#[derive(Debug, thiserror::Error)]
pub enum FiscalError {
    /// Period not found.
    #[error("Fiscal period not found: {0}")]
    NotFound(Uuid),

    /// Periods already exist for the year.
    #[error("Fiscal periods already exist for year {0}")]
    YearExists(i32),

    /// Periods close oldest-first; an earlier one is still open.
    #[error("Cannot close period {period}: earlier period {earlier} is still open")]
    EarlierPeriodsOpen {
        /// The period being closed.
        period: String,
        /// The earliest still-open period before it.
        earlier: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository for fiscal period operations.
#[derive(Debug, Clone)]
pub struct FiscalRepository {
    db: DatabaseConnection,
}

impl FiscalRepository {
    /// Creates a new fiscal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the twelve monthly periods for a calendar year, all open.
    ///
    /// # Errors
    ///
    /// Returns `YearExists` if any period of the year already exists.
    pub async fn create_year(&self, year: i32) -> Result<Vec<FiscalPeriod>, FiscalError> {
        let existing = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::Name.starts_with(format!("{year}-")))
            .count(&self.db)
            .await?;
        if existing > 0 {
            return Err(FiscalError::YearExists(year));
        }

        let periods = monthly_periods(year);
        let txn = self.db.begin().await?;
        for period in &periods {
            fiscal_periods::ActiveModel {
                id: Set(period.id.into_inner()),
                name: Set(period.name.clone()),
                start_date: Set(period.start_date),
                end_date: Set(period.end_date),
                status: Set(period.status.into()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
        txn.commit().await?;

        Ok(periods)
    }

    /// Lists all periods ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list(&self) -> Result<Vec<FiscalPeriod>, FiscalError> {
        Ok(fiscal_periods::Entity::find()
            .order_by_asc(fiscal_periods::Column::StartDate)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_period)
            .collect())
    }

    /// Finds the period containing a date.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn find_containing(
        &self,
        date: NaiveDate,
    ) -> Result<Option<FiscalPeriod>, FiscalError> {
        Ok(fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::StartDate.lte(date))
            .filter(fiscal_periods::Column::EndDate.gte(date))
            .one(&self.db)
            .await?
            .map(to_period))
    }

    /// Closes a period, preventing further postings into it.
    ///
    /// Periods close oldest-first within their fiscal year so the closed
    /// range stays contiguous.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no period with the id exists
    /// - `EarlierPeriodsOpen` if an older period of the year is still open
    pub async fn close(&self, id: FiscalPeriodId) -> Result<FiscalPeriod, FiscalError> {
        let target = fiscal_periods::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(FiscalError::NotFound(id.into_inner()))?;

        let year_start = NaiveDate::from_ymd_opt(target.start_date.year(), 1, 1)
            .unwrap_or(target.start_date);
        let earlier_open = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::StartDate.gte(year_start))
            .filter(fiscal_periods::Column::StartDate.lt(target.start_date))
            .filter(fiscal_periods::Column::Status.eq(
                crate::entities::sea_orm_active_enums::FiscalPeriodStatus::from(PeriodStatus::Open),
            ))
            .order_by_asc(fiscal_periods::Column::StartDate)
            .one(&self.db)
            .await?;
        if let Some(open) = earlier_open {
            return Err(FiscalError::EarlierPeriodsOpen {
                period: target.name,
                earlier: open.name,
            });
        }

        self.set_status(id, PeriodStatus::Closed).await
    }

    /// Reopens a closed period.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no period with the id exists.
    pub async fn reopen(&self, id: FiscalPeriodId) -> Result<FiscalPeriod, FiscalError> {
        self.set_status(id, PeriodStatus::Open).await
    }

    async fn set_status(
        &self,
        id: FiscalPeriodId,
        status: PeriodStatus,
    ) -> Result<FiscalPeriod, FiscalError> {
        let model = fiscal_periods::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(FiscalError::NotFound(id.into_inner()))?;

        let mut active: fiscal_periods::ActiveModel = model.into();
        active.status = Set(status.into());
        Ok(to_period(active.update(&self.db).await?))
    }
}

/// Converts a row into the core fiscal period type.
pub(crate) fn to_period(model: fiscal_periods::Model) -> FiscalPeriod {
    FiscalPeriod {
        id: FiscalPeriodId::from_uuid(model.id),
        name: model.name,
        start_date: model.start_date,
        end_date: model.end_date,
        status: model.status.into(),
    }
}
