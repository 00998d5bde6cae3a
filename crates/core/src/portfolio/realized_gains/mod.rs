pub mod realized_gains_aggregator;
mod realized_gains_model;
mod realized_gains_traits;

pub use realized_gains_aggregator::*;
pub use realized_gains_model::*;
pub use realized_gains_traits::*;
