//! Error types

mod configuration;
mod fetch;
mod grid;

pub use configuration::*;
pub use fetch::*;
pub use grid::*;
