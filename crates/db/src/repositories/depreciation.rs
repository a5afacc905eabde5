//! Depreciation schedule repository.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use tally_core::adapters::AssetCharge;
use tally_core::depreciation::{DepreciationError, DepreciationMethod, DepreciationSchedule};
use tally_shared::types::{AssetId, DepreciationScheduleId};

use crate::entities::depreciation_schedules;

/// Error types for depreciation schedule storage.
#[derive(Debug, thiserror::Error)]
pub enum DepreciationStoreError {
    /// Schedule parameter validation failure.
    #[error(transparent)]
    Schedule(#[from] DepreciationError),

    /// Schedule not found.
    #[error("Depreciation schedule not found: {0}")]
    NotFound(Uuid),

    /// A schedule already exists for the asset.
    #[error("Asset {0} already has a depreciation schedule")]
    AssetAlreadyScheduled(Uuid),

    /// Stored usage data could not be decoded.
    #[error("Stored usage data for schedule {0} is malformed")]
    MalformedUsage(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering a depreciation schedule.
#[derive(Debug, Clone)]
pub struct CreateScheduleInput {
    /// The asset being depreciated.
    pub asset_id: AssetId,
    /// Asset name used in depreciation entry line descriptions.
    pub asset_name: String,
    /// Calculation method.
    pub method: DepreciationMethod,
    /// Acquisition cost.
    pub cost: Decimal,
    /// Expected value at end of life.
    pub residual: Decimal,
    /// Useful life in months.
    pub life_periods: u32,
    /// First day of the first period.
    pub start_date: chrono::NaiveDate,
    /// Total estimated units (units-of-production only).
    pub total_units: Option<Decimal>,
    /// Units consumed per period (units-of-production only).
    pub usage: Vec<Decimal>,
}

/// A stored schedule together with its display name.
#[derive(Debug, Clone)]
pub struct StoredSchedule {
    /// Storage identifier.
    pub id: DepreciationScheduleId,
    /// Asset name for entry line descriptions.
    pub asset_name: String,
    /// The calculation schedule.
    pub schedule: DepreciationSchedule,
}

/// Repository for depreciation schedule operations.
#[derive(Debug, Clone)]
pub struct DepreciationRepository {
    db: DatabaseConnection,
}

impl DepreciationRepository {
    /// Creates a new depreciation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a schedule, validating its parameters through the core
    /// calculator before persisting anything.
    ///
    /// # Errors
    ///
    /// - `Schedule(..)` for invalid parameters
    /// - `AssetAlreadyScheduled` if the asset already has one
    pub async fn create(
        &self,
        input: CreateScheduleInput,
    ) -> Result<StoredSchedule, DepreciationStoreError> {
        let mut schedule = DepreciationSchedule::new(
            input.asset_id,
            input.method,
            input.cost,
            input.residual,
            input.life_periods,
            input.start_date,
        )?;
        if let Some(total_units) = input.total_units {
            schedule = schedule.with_usage(total_units, input.usage.clone())?;
        }
        // Surfaces MissingTotalUnits for units-of-production without usage.
        schedule.periods()?;

        let existing = depreciation_schedules::Entity::find()
            .filter(
                depreciation_schedules::Column::AssetId.eq(input.asset_id.into_inner()),
            )
            .count(&self.db)
            .await?;
        if existing > 0 {
            return Err(DepreciationStoreError::AssetAlreadyScheduled(
                input.asset_id.into_inner(),
            ));
        }

        let id = DepreciationScheduleId::new();
        let usage_json = if input.usage.is_empty() {
            None
        } else {
            Some(serde_json::json!(input.usage))
        };
        depreciation_schedules::ActiveModel {
            id: Set(id.into_inner()),
            asset_id: Set(input.asset_id.into_inner()),
            asset_name: Set(input.asset_name.clone()),
            method: Set(input.method.into()),
            cost: Set(input.cost),
            residual_value: Set(input.residual),
            life_periods: Set(i32::try_from(input.life_periods).unwrap_or(i32::MAX)),
            start_date: Set(input.start_date),
            total_units: Set(input.total_units),
            usage_units: Set(usage_json),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(StoredSchedule {
            id,
            asset_name: input.asset_name,
            schedule,
        })
    }

    /// Fetches a schedule by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no schedule with the id exists.
    pub async fn get(
        &self,
        id: DepreciationScheduleId,
    ) -> Result<StoredSchedule, DepreciationStoreError> {
        let model = depreciation_schedules::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(DepreciationStoreError::NotFound(id.into_inner()))?;
        to_stored(model)
    }

    /// Lists all schedules ordered by asset name.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list(&self) -> Result<Vec<StoredSchedule>, DepreciationStoreError> {
        depreciation_schedules::Entity::find()
            .order_by_asc(depreciation_schedules::Column::AssetName)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_stored)
            .collect()
    }

    /// Computes every asset's charge for one period of its schedule.
    ///
    /// `sequence` is the zero-based period index. Assets whose schedule is
    /// shorter than `sequence` contribute nothing; the schedules themselves
    /// are lazy, so only the requested period is materialized.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn charges_for_period(
        &self,
        sequence: u32,
    ) -> Result<Vec<AssetCharge>, DepreciationStoreError> {
        let mut charges = Vec::new();
        for stored in self.list().await? {
            let Ok(mut periods) = stored.schedule.periods() else {
                continue;
            };
            if let Some(period) = periods.nth(sequence as usize) {
                charges.push(AssetCharge {
                    asset_id: stored.schedule.asset_id,
                    asset_name: stored.asset_name,
                    amount: period.amount,
                });
            }
        }
        Ok(charges)
    }
}

fn to_stored(model: depreciation_schedules::Model) -> Result<StoredSchedule, DepreciationStoreError> {
    // The schema constrains life_periods to be positive; a zero here would
    // surface as a ZeroLife schedule error.
    let life = u32::try_from(model.life_periods).unwrap_or(0);

    let mut schedule = DepreciationSchedule::new(
        AssetId::from_uuid(model.asset_id),
        model.method.into(),
        model.cost,
        model.residual_value,
        life,
        model.start_date,
    )?;

    if let Some(total_units) = model.total_units {
        let usage: Vec<Decimal> = match &model.usage_units {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|_| DepreciationStoreError::MalformedUsage(model.id))?,
            None => Vec::new(),
        };
        schedule = schedule.with_usage(total_units, usage)?;
    }

    Ok(StoredSchedule {
        id: DepreciationScheduleId::from_uuid(model.id),
        asset_name: model.asset_name,
        schedule,
    })
}
