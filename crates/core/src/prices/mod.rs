mod prices_model;
mod prices_traits;

pub use prices_model::*;
pub use prices_traits::*;
