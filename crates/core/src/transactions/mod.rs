pub mod transactions_constants;
pub mod transactions_model;
pub mod transactions_traits;

pub use transactions_constants::*;
pub use transactions_model::*;
pub use transactions_traits::*;
