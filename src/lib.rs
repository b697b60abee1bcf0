pub mod catalog;
pub mod config;
pub mod dim;
pub mod format;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use catalog::{Catalog, Registry, UnitEntry};
pub use dim::{Dimensions, Quantity, UnitError, Value};
pub use format::{Formatter, Notation, Template};
