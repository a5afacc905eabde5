//! Depreciation error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when creating a depreciation schedule.
///
/// All variants are rejected at schedule-creation time; a constructed
/// schedule never yields zero-length or negative sequences.
#[derive(Debug, Error)]
pub enum DepreciationError {
    /// Useful life must cover at least one period.
    #[error("Useful life must be at least one period")]
    ZeroLife,

    /// Cost basis must be positive.
    #[error("Cost basis must be positive, got {0}")]
    NonPositiveCost(Decimal),

    /// Residual value cannot be negative.
    #[error("Residual value cannot be negative, got {0}")]
    NegativeResidual(Decimal),

    /// Residual value must be strictly below the cost basis.
    #[error("Residual value {residual} must be below cost basis {cost}")]
    ResidualNotBelowCost {
        /// The cost basis.
        cost: Decimal,
        /// The residual value.
        residual: Decimal,
    },

    /// Units-of-production requires a positive total unit estimate.
    #[error("Units-of-production requires a positive total unit estimate")]
    MissingTotalUnits,
}

impl DepreciationError {
    /// Returns the stable error code for logs and API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroLife => "ZERO_LIFE",
            Self::NonPositiveCost(_) => "NON_POSITIVE_COST",
            Self::NegativeResidual(_) => "NEGATIVE_RESIDUAL",
            Self::ResidualNotBelowCost { .. } => "RESIDUAL_NOT_BELOW_COST",
            Self::MissingTotalUnits => "MISSING_TOTAL_UNITS",
        }
    }
}
