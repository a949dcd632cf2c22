//! Column, row and query parameter types shared by every engine.

mod column;
mod ordering;
mod page;
mod params;
mod row;

pub use column::*;
pub use ordering::*;
pub use page::*;
pub use params::*;
pub use row::*;
