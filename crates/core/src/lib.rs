//! Fundfolio Core - portfolio valuation engine.
//!
//! Computes as-of-date metrics for fund holdings, rolls them up into
//! portfolio summaries, and replays daily history over a date range. Data
//! access is abstracted behind repository traits; nothing in this crate
//! performs I/O of its own.

pub mod constants;
pub mod dividends;
pub mod errors;
pub mod portfolio;
pub mod prices;
pub mod settings;
pub mod transactions;
pub mod utils;

// Re-export the portfolio entry points
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
