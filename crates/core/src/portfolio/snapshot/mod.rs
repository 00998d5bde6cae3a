//! Snapshot-backed history: serve materialized rows when they cover the
//! request, replay live otherwise.

mod snapshot_model;
pub mod snapshot_service;
mod snapshot_traits;

pub use snapshot_model::*;
pub use snapshot_service::*;
pub use snapshot_traits::*;
