use crate::catalog::Catalog;
use crate::dim::dimensions::Dimensions;
use crate::dim::error::UnitError;
use crate::dim::factor::Factor;
use crate::dim::quantity::Quantity;
use crate::format::Prefix;
use serde::Serialize;
use std::fmt;

/// Result of an operation that may cancel all dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Quantity(Quantity),
}

impl Value {
    /// Build a quantity, collapsing to a bare number when `dimensions`
    /// cancels out
    pub(crate) fn from_parts(
        magnitude: f64,
        dimensions: Dimensions,
        factor: Factor,
        precision: usize,
        prefix: Option<Prefix>,
    ) -> Value {
        if dimensions.is_dimensionless() {
            Value::Number(magnitude)
        } else {
            Value::Quantity(Quantity::from_parts(
                magnitude, dimensions, factor, precision, prefix,
            ))
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Quantity(_) => None,
        }
    }

    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Value::Quantity(q) => Some(q),
            Value::Number(_) => None,
        }
    }

    pub fn into_quantity(self) -> Result<Quantity, UnitError> {
        match self {
            Value::Quantity(q) => Ok(q),
            Value::Number(n) => Err(UnitError::InvalidOperand(format!(
                "expected a quantity, got the bare number {}",
                n
            ))),
        }
    }

    pub fn checked_add(&self, other: &Value) -> Result<Value, UnitError> {
        Ok(match (*self, *other) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
            (Value::Quantity(a), Value::Quantity(b)) => Value::Quantity(a.try_add(&b)?),
            (Value::Quantity(q), Value::Number(n)) => Value::Quantity(q + n),
            (Value::Number(n), Value::Quantity(q)) => Value::Quantity(n + q),
        })
    }

    pub fn checked_sub(&self, other: &Value) -> Result<Value, UnitError> {
        Ok(match (*self, *other) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a - b),
            (Value::Quantity(a), Value::Quantity(b)) => Value::Quantity(a.try_sub(&b)?),
            (Value::Quantity(q), Value::Number(n)) => Value::Quantity(q - n),
            (Value::Number(n), Value::Quantity(q)) => Value::Quantity(n - q),
        })
    }

    /// Raise to a bare-number power. Quantity exponents are rejected.
    pub fn pow(&self, exponent: &Value) -> Result<Value, UnitError> {
        let n = match exponent {
            Value::Number(n) => *n,
            Value::Quantity(q) => {
                return Err(UnitError::InvalidOperand(format!(
                    "cannot raise to a quantity with {}",
                    q.dimensions()
                )))
            }
        };
        match self {
            Value::Number(b) => Ok(Value::Number(b.powf(n))),
            Value::Quantity(q) => q.powf(n),
        }
    }

    /// Numeric display value; bare numbers are returned unchanged
    pub fn display_value(&self, catalog: &Catalog) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Quantity(q) => q.display_value(catalog),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => fmt::Display::fmt(n, f),
            Value::Quantity(q) => fmt::Display::fmt(q, f),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        Value::Quantity(q)
    }
}
