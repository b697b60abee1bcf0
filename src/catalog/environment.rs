use crate::catalog::validation::{self, ValidationResult};
use crate::dim::dimensions::{Dimensions, BASE_COUNT, BASE_SYMBOLS};
use crate::dim::error::UnitError;
use crate::dim::factor::Factor;
use crate::dim::numeric::approx_eq;
use crate::dim::quantity::{Quantity, DEFAULT_PRECISION};
use log::{debug, warn};
use num_rational::BigRational;
use num_traits::One;

/// How an entry takes part in display resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// SI-coherent unit (factor 1, value 1), shown with automatic prefixes
    Derived,
    /// Unit of another system (factor != 1), shown verbatim
    Defined,
    /// Scaled SI unit such as `kN`, used only as a conversion target
    Alias,
}

/// One named unit of a catalog
#[derive(Debug, Clone, PartialEq)]
pub struct UnitEntry {
    name: String,
    symbol: String,
    dimensions: Dimensions,
    exact_factor: BigRational,
    factor: Factor,
    value: Option<f64>,
    is_default: bool,
}

impl UnitEntry {
    /// Factor 1 unit whose symbol is its name
    pub fn new(name: impl Into<String>, dimensions: Dimensions) -> Self {
        let name = name.into();
        Self {
            symbol: name.clone(),
            name,
            dimensions,
            exact_factor: BigRational::one(),
            factor: Factor::one(),
            value: None,
            is_default: false,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn with_factor(mut self, factor: BigRational) -> Self {
        self.factor = Factor::from_big(&factor);
        self.exact_factor = factor;
        self
    }

    /// What one of this unit is worth in SI base units
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn exact_factor(&self) -> &BigRational {
        &self.exact_factor
    }

    pub fn factor(&self) -> f64 {
        self.factor.to_f64()
    }

    /// The factor in the form quantities carry
    pub fn display_factor(&self) -> Factor {
        self.factor
    }

    pub fn value(&self) -> f64 {
        self.value.unwrap_or(1.0 / self.factor.to_f64())
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn kind(&self) -> UnitKind {
        if !self.exact_factor.is_one() {
            UnitKind::Defined
        } else if approx_eq(self.value(), 1.0) {
            UnitKind::Derived
        } else {
            UnitKind::Alias
        }
    }

    /// One of this unit as a quantity
    pub fn quantity(&self) -> Quantity {
        Quantity::from_parts(
            self.value(),
            self.dimensions,
            self.factor,
            DEFAULT_PRECISION,
            None,
        )
    }
}

/// An immutable table of units, in declaration order
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    entries: Vec<UnitEntry>,
    report: ValidationResult,
}

impl Catalog {
    /// SI base units only
    pub fn empty() -> Self {
        Self {
            name: "empty".to_string(),
            entries: Vec::new(),
            report: ValidationResult::new(),
        }
    }

    /// Validate and build a catalog. Warnings are logged and kept on the
    /// catalog; errors reject the whole table.
    pub fn new(name: impl Into<String>, mut entries: Vec<UnitEntry>) -> Result<Self, UnitError> {
        let name = name.into();
        for entry in &entries {
            if entry.dimensions.is_dimensionless() {
                return Err(UnitError::InvalidDimension {
                    unit: entry.name.clone(),
                    reason: "dimensionless units are not supported".to_string(),
                });
            }
        }

        let report = validation::validate(&entries)?;
        for issue in &report.warnings {
            warn!("environment '{}': {}", name, issue);
        }
        // A default flag only matters for units of another system
        for entry in entries.iter_mut() {
            if entry.is_default && entry.kind() != UnitKind::Defined {
                entry.is_default = false;
            }
        }

        debug!("built catalog '{}' with {} units", name, entries.len());
        Ok(Self {
            name,
            entries,
            report,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[UnitEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn warnings(&self) -> &ValidationResult {
        &self.report
    }

    /// Identifiers in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&UnitEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Look up by identifier, then by symbol
    pub fn find(&self, name: &str) -> Option<&UnitEntry> {
        self.get(name)
            .or_else(|| self.entries.iter().find(|e| e.symbol == name))
    }

    /// Entries whose dimensions equal `dimensions`, in declaration order
    pub fn matching(&self, dimensions: Dimensions) -> impl Iterator<Item = &UnitEntry> {
        self.entries
            .iter()
            .filter(move |e| e.dimensions == dimensions)
    }

    /// Every unit as `(identifier, one unit)`, in declaration order
    pub fn units(&self) -> Vec<(&str, Quantity)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.quantity()))
            .collect()
    }

    /// The seven SI base units
    pub fn base_units() -> Vec<(&'static str, Quantity)> {
        (0..BASE_COUNT)
            .map(|i| (BASE_SYMBOLS[i], Quantity::base(i)))
            .collect()
    }
}
