//! Inventory error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by inventory costing operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Requested quantity exceeds what the layers hold.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Quantity requested for issue.
        requested: Decimal,
        /// Total quantity available across layers.
        available: Decimal,
    },

    /// Issue quantity must be positive.
    #[error("Issue quantity must be positive, got {0}")]
    NonPositiveQuantity(Decimal),

    /// Receipt quantity or unit cost is malformed.
    #[error("Receipt must have positive quantity and non-negative unit cost")]
    InvalidReceipt,

    /// A layer cannot be removed because part of it was already issued.
    #[error("Cost layer {layer_id} already partially consumed ({consumed} of {quantity} issued)")]
    LayerAlreadyConsumed {
        /// The layer being removed.
        layer_id: Uuid,
        /// Quantity already issued from the layer.
        consumed: Decimal,
        /// The layer's original quantity.
        quantity: Decimal,
    },

    /// Cost layer not found.
    #[error("Cost layer {0} not found")]
    LayerNotFound(Uuid),
}

impl InventoryError {
    /// Returns the stable error code for logs and API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::NonPositiveQuantity(_) => "NON_POSITIVE_QUANTITY",
            Self::InvalidReceipt => "INVALID_RECEIPT",
            Self::LayerAlreadyConsumed { .. } => "LAYER_ALREADY_CONSUMED",
            Self::LayerNotFound(_) => "LAYER_NOT_FOUND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            InventoryError::InsufficientStock {
                requested: Decimal::new(10, 0),
                available: Decimal::new(5, 0),
            }
            .error_code(),
            "INSUFFICIENT_STOCK"
        );
        assert_eq!(
            InventoryError::LayerNotFound(Uuid::nil()).error_code(),
            "LAYER_NOT_FOUND"
        );
    }
}
