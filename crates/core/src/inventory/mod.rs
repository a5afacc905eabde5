//! FIFO inventory cost layers.

pub mod costing;
pub mod error;

#[cfg(test)]
mod costing_props;

pub use costing::{CostLayer, FifoCosting, IssuePlan, LayerConsumption};
pub use error::InventoryError;
