//! Operator overloads for quantities and values.
//!
//! Multiplication and division between quantities may cancel every
//! dimension, so they return `Value`. Addition and subtraction between
//! quantities can fail and return `Result`. Operations with a bare number
//! keep the quantity's representation fields.
//!
//! `*` and `/` panic when a dimension exponent overflows `Rational64`, the
//! way integer arithmetic does; `try_mul`, `try_div` and `try_divide_into`
//! report it as an error.

use crate::dim::error::UnitError;
use crate::dim::quantity::Quantity;
use crate::dim::value::Value;
use std::ops::{Add, Div, Mul, Neg, Sub};

impl Add for Quantity {
    type Output = Result<Quantity, UnitError>;

    fn add(self, rhs: Quantity) -> Self::Output {
        self.try_add(&rhs)
    }
}

impl Sub for Quantity {
    type Output = Result<Quantity, UnitError>;

    fn sub(self, rhs: Quantity) -> Self::Output {
        self.try_sub(&rhs)
    }
}

// A bare number is read as a magnitude in SI base units
impl Add<f64> for Quantity {
    type Output = Quantity;

    fn add(self, rhs: f64) -> Quantity {
        self.with_magnitude(self.magnitude() + rhs)
    }
}

impl Add<Quantity> for f64 {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        rhs + self
    }
}

impl Sub<f64> for Quantity {
    type Output = Quantity;

    fn sub(self, rhs: f64) -> Quantity {
        self.with_magnitude(self.magnitude() - rhs)
    }
}

impl Sub<Quantity> for f64 {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        rhs.with_magnitude(self - rhs.magnitude())
    }
}

impl Mul for Quantity {
    type Output = Value;

    fn mul(self, rhs: Quantity) -> Value {
        self.try_mul(&rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        self.with_magnitude(self.magnitude() * rhs)
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        rhs * self
    }
}

impl Div for Quantity {
    type Output = Value;

    fn div(self, rhs: Quantity) -> Value {
        self.try_div(&rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        self.with_magnitude(self.magnitude() / rhs)
    }
}

impl Div<Quantity> for f64 {
    type Output = Quantity;

    fn div(self, rhs: Quantity) -> Quantity {
        rhs.try_divide_into(self).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        self.with_magnitude(-self.magnitude())
    }
}

impl Mul for Value {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a * b),
            (Value::Number(n), Value::Quantity(q)) | (Value::Quantity(q), Value::Number(n)) => {
                Value::Quantity(q * n)
            }
            (Value::Quantity(a), Value::Quantity(b)) => a * b,
        }
    }
}

impl Div for Value {
    type Output = Value;

    fn div(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a / b),
            (Value::Number(n), Value::Quantity(q)) => Value::Quantity(n / q),
            (Value::Quantity(q), Value::Number(n)) => Value::Quantity(q / n),
            (Value::Quantity(a), Value::Quantity(b)) => a / b,
        }
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        match self {
            Value::Number(n) => Value::Number(-n),
            Value::Quantity(q) => Value::Quantity(-q),
        }
    }
}
