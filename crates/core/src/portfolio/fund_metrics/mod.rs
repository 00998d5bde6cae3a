pub mod fund_metrics_calculator;
mod fund_metrics_model;

pub use fund_metrics_calculator::*;
pub use fund_metrics_model::*;
