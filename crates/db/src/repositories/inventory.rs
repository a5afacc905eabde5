//! Inventory repository for cost layer reads and issue planning.
//!
//! All layer mutations happen inside the posting transaction (see
//! `PostingRepository`); this repository only reads layer state and runs the
//! pure FIFO planner over it.

use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use tally_core::inventory::{CostLayer, FifoCosting, InventoryError, IssuePlan};
use tally_shared::types::{CostLayerId, ProductId};

use crate::entities::inventory_cost_layers;

/// Error types for inventory reads.
#[derive(Debug, thiserror::Error)]
pub enum InventoryStoreError {
    /// FIFO planning failure (insufficient stock, bad quantity).
    #[error(transparent)]
    Costing(#[from] InventoryError),

    /// Cost layer not found.
    #[error("Cost layer not found: {0}")]
    LayerNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository for inventory cost layer reads.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    db: DatabaseConnection,
}

impl InventoryRepository {
    /// Creates a new inventory repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads a product's cost layers, oldest receipt first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn layers_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<CostLayer>, InventoryStoreError> {
        Ok(inventory_cost_layers::Entity::find()
            .filter(inventory_cost_layers::Column::ProductId.eq(product_id.into_inner()))
            .order_by_asc(inventory_cost_layers::Column::ReceivedDate)
            .order_by_asc(inventory_cost_layers::Column::Id)
            .all(&self.db)
            .await?
            .iter()
            .map(to_layer)
            .collect())
    }

    /// Loads one cost layer.
    ///
    /// # Errors
    ///
    /// Returns `LayerNotFound` if no layer with the id exists.
    pub async fn get_layer(&self, id: CostLayerId) -> Result<CostLayer, InventoryStoreError> {
        inventory_cost_layers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .as_ref()
            .map(to_layer)
            .ok_or(InventoryStoreError::LayerNotFound(id.into_inner()))
    }

    /// Quantity on hand for a product across all layers.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn on_hand(&self, product_id: ProductId) -> Result<Decimal, InventoryStoreError> {
        Ok(self
            .layers_for_product(product_id)
            .await?
            .iter()
            .map(|l| l.remaining)
            .sum())
    }

    /// Plans a FIFO issue of `quantity` units against current stock.
    ///
    /// The plan is applied durably by posting the issue entry with the
    /// matching `InventoryEffects`.
    ///
    /// # Errors
    ///
    /// Returns `Costing(InsufficientStock)` when stock cannot cover the
    /// request; no state changes.
    pub async fn plan_issue(
        &self,
        product_id: ProductId,
        quantity: Decimal,
    ) -> Result<IssuePlan, InventoryStoreError> {
        let layers = self.layers_for_product(product_id).await?;
        Ok(FifoCosting::plan_issue(&layers, quantity)?)
    }
}

/// Converts a row into the core cost layer type.
pub(crate) fn to_layer(model: &inventory_cost_layers::Model) -> CostLayer {
    CostLayer {
        id: CostLayerId::from_uuid(model.id),
        product_id: ProductId::from_uuid(model.product_id),
        received_date: model.received_date,
        quantity: model.quantity,
        remaining: model.remaining_quantity,
        unit_cost: model.unit_cost,
    }
}
