//! `SeaORM` Entity for the depreciation_schedules table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DepreciationMethod;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "depreciation_schedules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub asset_id: Uuid,
    pub asset_name: String,
    pub method: DepreciationMethod,
    pub cost: Decimal,
    pub residual_value: Decimal,
    pub life_periods: i32,
    pub start_date: Date,
    pub total_units: Option<Decimal>,
    /// Per-period unit consumption (units-of-production only), as a JSON
    /// array of decimals.
    pub usage_units: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
