//! Portfolio valuation: per-fund metrics, portfolio summaries, history replay
//! and the snapshot-backed history entry point.

pub mod fund_metrics;
pub mod history;
pub mod loader;
mod portfolio_model;
mod portfolio_traits;
pub mod realized_gains;
pub mod reinvestment;
pub mod snapshot;
pub mod summary;

pub use portfolio_model::*;
pub use portfolio_traits::*;

#[cfg(test)]
pub(crate) mod test_fixtures;
