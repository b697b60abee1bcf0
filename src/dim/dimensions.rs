//! Dimension vectors over the seven SI base quantities.
//!
//! Exponents are rational so that roots of quantities (e.g. `m^(1/2)`) stay
//! exact. The component order is fixed: mass, length, time, current,
//! luminous intensity, temperature, amount of substance.

use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, One, Zero};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Number of SI base quantities
pub const BASE_COUNT: usize = 7;

/// Base unit symbols in component order
pub const BASE_SYMBOLS: [&str; BASE_COUNT] = ["kg", "m", "s", "A", "cd", "K", "mol"];

/// Exponents of the seven SI base quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    exponents: [Rational64; BASE_COUNT],
}

impl Dimensions {
    pub const MASS: usize = 0;
    pub const LENGTH: usize = 1;
    pub const TIME: usize = 2;
    pub const CURRENT: usize = 3;
    pub const LUMINOUS_INTENSITY: usize = 4;
    pub const TEMPERATURE: usize = 5;
    pub const AMOUNT: usize = 6;

    /// Integer exponents in component order
    pub fn new(kg: i64, m: i64, s: i64, a: i64, cd: i64, k: i64, mol: i64) -> Self {
        Self::from_exponents([kg, m, s, a, cd, k, mol].map(Rational64::from_integer))
    }

    pub fn from_exponents(exponents: [Rational64; BASE_COUNT]) -> Self {
        Self { exponents }
    }

    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// Unit vector along one base quantity
    pub fn basis(index: usize) -> Self {
        let mut exponents = [Rational64::zero(); BASE_COUNT];
        exponents[index] = Rational64::one();
        Self { exponents }
    }

    pub fn exponents(&self) -> &[Rational64; BASE_COUNT] {
        &self.exponents
    }

    pub fn exponent(&self, index: usize) -> Rational64 {
        self.exponents[index]
    }

    /// Component-wise sum, `None` if an exponent overflows
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.zip(other, |a, b| a.checked_add(&b))
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.zip(other, |a, b| a.checked_sub(&b))
    }

    pub fn checked_neg(&self) -> Option<Self> {
        self.checked_scale(-Rational64::one())
    }

    /// Every exponent multiplied by `k`, `None` if one overflows
    pub fn checked_scale(&self, k: Rational64) -> Option<Self> {
        let mut exponents = self.exponents;
        for e in exponents.iter_mut() {
            *e = e.checked_mul(&k)?;
        }
        Some(Self { exponents })
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(Zero::is_zero)
    }

    /// If exactly one component is non-zero, its index and exponent.
    ///
    /// `m²` returns `(LENGTH, 2)`, `kg·m` returns `None`.
    pub fn single_component(&self) -> Option<(usize, Rational64)> {
        let mut found = None;
        for (index, exponent) in self.exponents.iter().enumerate() {
            if exponent.is_zero() {
                continue;
            }
            if found.is_some() {
                return None;
            }
            found = Some((index, *exponent));
        }
        found
    }

    /// The rational `k` such that `self == other * k`, if the two vectors are
    /// parallel. Either vector being dimensionless yields `None`.
    pub fn ratio_to(&self, other: &Self) -> Option<Rational64> {
        if self.is_dimensionless() || other.is_dimensionless() {
            return None;
        }
        let mut ratio: Option<Rational64> = None;
        for (mine, theirs) in self.exponents.iter().zip(other.exponents.iter()) {
            match (mine.is_zero(), theirs.is_zero()) {
                (true, true) => continue,
                (false, false) => {
                    let k = mine.checked_div(theirs)?;
                    match ratio {
                        Some(r) if r != k => return None,
                        _ => ratio = Some(k),
                    }
                }
                _ => return None,
            }
        }
        ratio
    }

    /// Non-zero components as `(symbol, exponent)` pairs, e.g.
    /// `[("kg", 1), ("m", 1), ("s", -2)]`
    pub fn components(&self) -> Vec<(&'static str, Rational64)> {
        BASE_SYMBOLS
            .iter()
            .zip(self.exponents.iter())
            .filter(|(_, e)| !e.is_zero())
            .map(|(symbol, e)| (*symbol, *e))
            .collect()
    }

    /// True when every exponent is a whole number
    pub fn is_integral(&self) -> bool {
        self.exponents.iter().all(|e| e.is_integer())
    }

    fn zip(
        &self,
        other: &Self,
        op: impl Fn(Rational64, Rational64) -> Option<Rational64>,
    ) -> Option<Self> {
        let mut exponents = self.exponents;
        for (e, o) in exponents.iter_mut().zip(other.exponents.iter()) {
            *e = op(*e, *o)?;
        }
        Some(Self { exponents })
    }
}

fn overflow(operation: &str) -> ! {
    panic!("dimension exponent overflow in {}", operation)
}

// The operators panic on exponent overflow like integer arithmetic does;
// the `checked_*` methods report it instead.
impl Add for Dimensions {
    type Output = Dimensions;

    fn add(self, rhs: Dimensions) -> Dimensions {
        self.checked_add(&rhs).unwrap_or_else(|| overflow("add"))
    }
}

impl Sub for Dimensions {
    type Output = Dimensions;

    fn sub(self, rhs: Dimensions) -> Dimensions {
        self.checked_sub(&rhs).unwrap_or_else(|| overflow("sub"))
    }
}

impl Neg for Dimensions {
    type Output = Dimensions;

    fn neg(self) -> Dimensions {
        self.checked_neg().unwrap_or_else(|| overflow("neg"))
    }
}

impl Mul<Rational64> for Dimensions {
    type Output = Dimensions;

    fn mul(self, rhs: Rational64) -> Dimensions {
        self.checked_scale(rhs).unwrap_or_else(|| overflow("mul"))
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dimensions(")?;
        for (i, (symbol, exponent)) in BASE_SYMBOLS.iter().zip(self.exponents.iter()).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", symbol, exponent)?;
        }
        write!(f, ")")
    }
}

// Machine-readable form: integers as numbers, fractions as "p/q" strings
impl Serialize for Dimensions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let values: Vec<serde_json::Value> = self
            .exponents
            .iter()
            .map(|e| {
                if e.is_integer() {
                    serde_json::Value::from(e.to_integer())
                } else {
                    serde_json::Value::from(e.to_string())
                }
            })
            .collect();
        values.serialize(serializer)
    }
}
