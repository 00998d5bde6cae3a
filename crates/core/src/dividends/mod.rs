mod dividends_model;
mod dividends_traits;

pub use dividends_model::*;
pub use dividends_traits::*;
