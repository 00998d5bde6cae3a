pub mod reinvestment_resolver;

pub use reinvestment_resolver::*;
