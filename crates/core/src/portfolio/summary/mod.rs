pub mod summary_builder;
mod summary_model;

pub use summary_builder::*;
pub use summary_model::*;

#[cfg(test)]
mod summary_builder_tests;
