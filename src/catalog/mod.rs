// Unit catalogs: loading environment files, resolving display units and the
// process-wide active catalog

pub mod active;
pub mod environment;
pub mod expr;
pub mod loader;
pub mod models;
pub mod registry;
pub mod resolve;
pub mod validation;

pub use active::{active, install, load, load_with, reset};
pub use environment::{Catalog, UnitEntry, UnitKind};
pub use loader::{load_from_file, load_from_str, SourceFormat};
pub use registry::Registry;
pub use resolve::{resolve, Resolution, ResolvedUnit};
pub use validation::ValidationResult;

#[cfg(test)]
mod tests;
