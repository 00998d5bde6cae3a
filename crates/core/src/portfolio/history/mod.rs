mod history_model;
pub mod history_service;
mod running_state;

pub use history_model::*;
pub use history_service::*;
