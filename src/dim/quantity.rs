//! The physical quantity value type.

use crate::catalog::{self, Catalog, UnitEntry};
use crate::dim::dimensions::{Dimensions, BASE_COUNT};
use crate::dim::error::UnitError;
use crate::dim::factor::Factor;
use crate::dim::numeric::{approx_eq, nearest_rational, pow_rational, MAX_EXPONENT_DENOMINATOR};
use crate::dim::value::Value;
use crate::format::{Formatter, Notation, Prefix, Template};
use log::debug;
use num_rational::Rational64;
use num_traits::Zero;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Default number of decimal places rendered
pub const DEFAULT_PRECISION: usize = 3;

/// A magnitude in SI base units tagged with its dimensions.
///
/// `factor` and `prefix` only change how the quantity is displayed; the
/// magnitude is always the SI value.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Quantity {
    magnitude: f64,
    dimensions: Dimensions,
    factor: Factor,
    precision: usize,
    prefix: Option<Prefix>,
}

impl Quantity {
    /// A quantity of `magnitude` SI units. Dimensionless quantities do not
    /// exist: use a bare number instead.
    pub fn new(magnitude: f64, dimensions: Dimensions) -> Result<Self, UnitError> {
        if dimensions.is_dimensionless() {
            return Err(UnitError::InvalidOperand(
                "a dimensionless quantity is a bare number".to_string(),
            ));
        }
        Ok(Self::from_parts(magnitude, dimensions, Factor::one(), DEFAULT_PRECISION, None))
    }

    /// Caller guarantees `dimensions` is not dimensionless
    pub(crate) fn from_parts(
        magnitude: f64,
        dimensions: Dimensions,
        factor: Factor,
        precision: usize,
        prefix: Option<Prefix>,
    ) -> Self {
        Self {
            magnitude,
            dimensions,
            factor,
            precision,
            prefix,
        }
    }

    /// One SI base unit along `index` (see the `Dimensions` constants)
    pub fn base(index: usize) -> Self {
        debug_assert!(index < BASE_COUNT);
        Self::from_parts(1.0, Dimensions::basis(index), Factor::one(), DEFAULT_PRECISION, None)
    }

    pub fn kilogram() -> Self {
        Self::base(Dimensions::MASS)
    }

    pub fn meter() -> Self {
        Self::base(Dimensions::LENGTH)
    }

    pub fn second() -> Self {
        Self::base(Dimensions::TIME)
    }

    pub fn ampere() -> Self {
        Self::base(Dimensions::CURRENT)
    }

    pub fn candela() -> Self {
        Self::base(Dimensions::LUMINOUS_INTENSITY)
    }

    pub fn kelvin() -> Self {
        Self::base(Dimensions::TEMPERATURE)
    }

    pub fn mole() -> Self {
        Self::base(Dimensions::AMOUNT)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn factor(&self) -> Factor {
        self.factor
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn prefix(&self) -> Option<Prefix> {
        self.prefix
    }

    /// Copy displayed through `factor` (display value `magnitude * factor`)
    pub fn with_factor(self, factor: f64) -> Result<Self, UnitError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(UnitError::InvalidOperand(format!(
                "factor must be a positive number, got {}",
                factor
            )));
        }
        Ok(Self {
            factor: Factor::Approx(factor),
            ..self
        })
    }

    /// As `with_factor`, keeping the factor exact
    pub fn with_exact_factor(self, factor: Rational64) -> Result<Self, UnitError> {
        if *factor.numer() <= 0 {
            return Err(UnitError::InvalidOperand(format!(
                "factor must be a positive number, got {}",
                factor
            )));
        }
        Ok(Self {
            factor: Factor::Exact(factor),
            ..self
        })
    }

    pub(crate) fn with_magnitude(self, magnitude: f64) -> Self {
        Self { magnitude, ..self }
    }

    pub fn with_precision(self, precision: usize) -> Self {
        Self { precision, ..self }
    }

    /// Copy forced to display with the named prefix. `""` or `"unity"`
    /// forces the unprefixed unit.
    pub fn prefixed(self, symbol: &str) -> Result<Self, UnitError> {
        if !self.factor.is_unity() {
            return Err(UnitError::InvalidOperand(format!(
                "cannot prefix a quantity displayed in a defined unit (factor {})",
                self.factor
            )));
        }
        let prefix = Prefix::lookup(symbol)?;
        Ok(Self {
            prefix: Some(prefix),
            ..self
        })
    }

    /// Copy returned to SI display
    pub fn si(self) -> Self {
        Self {
            factor: Factor::one(),
            prefix: None,
            ..self
        }
    }

    /// `(value, unit)` such that `value * unit` is this quantity, with
    /// `value` in the quantity's display unit system before prefixing.
    pub fn split(&self) -> (f64, Quantity) {
        let factor = self.factor.to_f64();
        let unit = Self {
            magnitude: 1.0 / factor,
            prefix: None,
            ..*self
        };
        (self.magnitude * factor, unit)
    }

    /// `(value, unit)` where `value` is the number `catalog` displays and
    /// `unit` is one displayed unit, prefix included: 2500 N splits into
    /// `(2.5, 1 kN)`.
    pub fn split_display(&self, catalog: &Catalog) -> (f64, Quantity) {
        let layout = Formatter::new(catalog).layout(self);
        let unit = Self {
            magnitude: layout.scale,
            prefix: layout.prefix.or(self.prefix),
            ..*self
        };
        (layout.value, unit)
    }

    pub fn abs(self) -> Self {
        Self {
            magnitude: self.magnitude.abs(),
            ..self
        }
    }

    /// Raise to a rational power. The zeroth power is the bare number 1.
    /// Fails if a dimension exponent overflows.
    pub fn pow(&self, n: Rational64) -> Result<Value, UnitError> {
        if n.is_zero() {
            return Ok(Value::Number(1.0));
        }
        let dimensions = self.dimensions.checked_scale(n).ok_or_else(|| {
            UnitError::InvalidOperand(format!(
                "raising {} to the power {} overflows an exponent",
                self.dimensions, n
            ))
        })?;
        Ok(Value::from_parts(
            pow_rational(self.magnitude, n),
            dimensions,
            self.factor.pow(n),
            self.precision,
            None,
        ))
    }

    pub fn powi(&self, n: i32) -> Result<Value, UnitError> {
        self.pow(Rational64::from_integer(n as i64))
    }

    /// Raise to a float power, converted to the nearest rational with a
    /// denominator of at most `MAX_EXPONENT_DENOMINATOR`
    pub fn powf(&self, n: f64) -> Result<Value, UnitError> {
        if !n.is_finite() {
            return Err(UnitError::InvalidOperand(format!(
                "exponent must be finite, got {}",
                n
            )));
        }
        let exponent = nearest_rational(n, MAX_EXPONENT_DENOMINATOR).ok_or_else(|| {
            UnitError::InvalidOperand(format!("exponent {} has no rational form", n))
        })?;
        self.pow(exponent)
    }

    pub fn sqrt(&self) -> Result<Value, UnitError> {
        self.pow(Rational64::new(1, 2))
    }

    pub fn root(&self, n: i64) -> Result<Value, UnitError> {
        if n == 0 || n == i64::MIN {
            return Err(UnitError::InvalidOperand(format!("invalid root {}", n)));
        }
        self.pow(Rational64::new(1, n))
    }

    pub fn try_add(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        self.check_same("add", other)?;
        Ok(Self {
            magnitude: self.magnitude + other.magnitude,
            ..*self
        })
    }

    pub fn try_sub(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        self.check_same("subtract", other)?;
        Ok(Self {
            magnitude: self.magnitude - other.magnitude,
            ..*self
        })
    }

    /// Product of two quantities, a bare number when the dimensions cancel
    pub fn try_mul(&self, other: &Quantity) -> Result<Value, UnitError> {
        let dimensions = self
            .dimensions
            .checked_add(&other.dimensions)
            .ok_or_else(|| self.overflow("multiply", other))?;
        Ok(Value::from_parts(
            self.magnitude * other.magnitude,
            dimensions,
            self.factor * other.factor,
            self.precision,
            None,
        ))
    }

    pub fn try_div(&self, other: &Quantity) -> Result<Value, UnitError> {
        let dimensions = self
            .dimensions
            .checked_sub(&other.dimensions)
            .ok_or_else(|| self.overflow("divide", other))?;
        Ok(Value::from_parts(
            self.magnitude / other.magnitude,
            dimensions,
            self.factor / other.factor,
            self.precision,
            None,
        ))
    }

    /// `n / self`: negated dimensions, reciprocal magnitude and factor
    pub fn try_divide_into(&self, n: f64) -> Result<Quantity, UnitError> {
        let dimensions = self.dimensions.checked_neg().ok_or_else(|| {
            UnitError::InvalidOperand(format!("cannot invert {}", self.dimensions))
        })?;
        Ok(Self::from_parts(
            n / self.magnitude,
            dimensions,
            self.factor.recip(),
            self.precision,
            None,
        ))
    }

    fn overflow(&self, operation: &str, other: &Quantity) -> UnitError {
        UnitError::InvalidOperand(format!(
            "cannot {} {} by {}: an exponent overflows",
            operation, self.dimensions, other.dimensions
        ))
    }

    fn check_same(&self, operation: &'static str, other: &Quantity) -> Result<(), UnitError> {
        if self.dimensions != other.dimensions {
            return Err(UnitError::DimensionMismatch {
                operation,
                left: self.dimensions,
                right: other.dimensions,
            });
        }
        Ok(())
    }

    /// Copy displayed in the catalog unit `name` (identifier or symbol).
    ///
    /// The unit may match the quantity's dimensions directly or as a rational
    /// power, so `(10 lb)²` converts to `kip` and displays in `kip²`.
    pub fn convert_to(&self, catalog: &Catalog, name: &str) -> Result<Quantity, UnitError> {
        let entry = catalog
            .find(name)
            .ok_or_else(|| UnitError::UnknownUnit(name.to_string()))?;
        let power = self.power_of(entry).ok_or(UnitError::DimensionMismatch {
            operation: "convert",
            left: self.dimensions,
            right: entry.dimensions(),
        })?;
        debug!(
            "converting {} to '{}' (power {})",
            self.dimensions,
            entry.name(),
            power
        );
        Ok(Self {
            factor: entry.display_factor().pow(power),
            prefix: None,
            ..*self
        })
    }

    /// `convert_to` against the active catalog
    pub fn to(&self, name: &str) -> Result<Quantity, UnitError> {
        self.convert_to(&catalog::active(), name)
    }

    /// Catalog entries this quantity can be converted to
    pub fn conversion_targets<'c>(&self, catalog: &'c Catalog) -> Vec<&'c UnitEntry> {
        catalog
            .entries()
            .iter()
            .filter(|entry| self.power_of(entry).is_some())
            .collect()
    }

    fn power_of(&self, entry: &UnitEntry) -> Option<Rational64> {
        if entry.dimensions() == self.dimensions {
            return Some(Rational64::from_integer(1));
        }
        self.dimensions.ratio_to(&entry.dimensions())
    }

    /// The number shown when this quantity is formatted with `catalog`
    pub fn display_value(&self, catalog: &Catalog) -> f64 {
        Formatter::new(catalog).display_value(self)
    }

    pub fn to_html(&self) -> String {
        let catalog = catalog::active();
        Formatter::new(&catalog).template(Template::Html).format(self)
    }

    pub fn to_latex(&self) -> String {
        let catalog = catalog::active();
        Formatter::new(&catalog).template(Template::Latex).format(self)
    }

    /// Diagnostic form listing every field
    pub fn repr(&self) -> String {
        let prefix = match self.prefix {
            Some(p) if p.symbol.is_empty() => "unity".to_string(),
            Some(p) => p.symbol.to_string(),
            None => "None".to_string(),
        };
        format!(
            "Quantity(magnitude={:?}, dimensions={}, factor={:?}, precision={}, prefix={})",
            self.magnitude,
            self.dimensions,
            self.factor.to_f64(),
            self.precision,
            prefix
        )
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let catalog = catalog::active();
        let mut formatter = Formatter::new(&catalog);
        if let Some(precision) = f.precision() {
            formatter = formatter.precision(precision);
        }
        f.write_str(&formatter.format(self))
    }
}

impl fmt::LowerExp for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let catalog = catalog::active();
        let mut formatter = Formatter::new(&catalog).notation(Notation::Scientific);
        if let Some(precision) = f.precision() {
            formatter = formatter.precision(precision);
        }
        f.write_str(&formatter.format(self))
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions && approx_eq(self.magnitude, other.magnitude)
    }
}

impl PartialEq<f64> for Quantity {
    fn eq(&self, other: &f64) -> bool {
        approx_eq(self.magnitude, *other)
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.dimensions != other.dimensions {
            return None;
        }
        if approx_eq(self.magnitude, other.magnitude) {
            return Some(Ordering::Equal);
        }
        self.magnitude.partial_cmp(&other.magnitude)
    }
}

impl From<&Quantity> for f64 {
    fn from(q: &Quantity) -> f64 {
        q.display_value(&catalog::active())
    }
}
