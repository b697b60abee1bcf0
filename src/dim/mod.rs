// Dimensional analysis: dimension vectors, quantities and their arithmetic

pub mod dimensions;
pub mod error;
pub mod factor;
pub mod numeric;
pub mod ops;
pub mod quantity;
pub mod value;

pub use dimensions::{Dimensions, BASE_COUNT, BASE_SYMBOLS};
pub use error::UnitError;
pub use factor::Factor;
pub use quantity::{Quantity, DEFAULT_PRECISION};
pub use value::Value;

#[cfg(test)]
mod tests;
