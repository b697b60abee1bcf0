// Display of quantities: prefixes, symbol markup and the catalog-driven formatter

pub mod formatter;
pub mod prefix;
pub mod symbol;

pub use formatter::{Formatter, Layout};
pub use prefix::{auto_select, Prefix, PREFIXES};
pub use symbol::{Notation, Template};
