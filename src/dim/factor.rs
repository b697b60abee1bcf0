//! Display factors.
//!
//! A factor stays an exact `Rational64` through products, quotients and
//! whole powers as long as the result fits in 64 bits. Overflow and
//! fractional powers fall back to `f64`.

use crate::dim::numeric::{self, approx_eq, pow_rational, rational_to_f64};
use num_rational::{BigRational, Rational64};
use num_traits::{checked_pow, CheckedDiv, CheckedMul, One, ToPrimitive};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Div, Mul};

#[derive(Debug, Clone, Copy)]
pub enum Factor {
    Exact(Rational64),
    Approx(f64),
}

impl Factor {
    pub fn one() -> Self {
        Factor::Exact(Rational64::one())
    }

    /// Narrow an exact catalog factor, keeping it exact when it fits
    pub fn from_big(factor: &BigRational) -> Self {
        match (factor.numer().to_i64(), factor.denom().to_i64()) {
            (Some(n), Some(d)) => Factor::Exact(Rational64::new(n, d)),
            _ => Factor::Approx(factor.to_f64().unwrap_or(f64::NAN)),
        }
    }

    pub fn exact(&self) -> Option<Rational64> {
        match self {
            Factor::Exact(r) => Some(*r),
            Factor::Approx(_) => None,
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Factor::Exact(r) => rational_to_f64(*r),
            Factor::Approx(f) => *f,
        }
    }

    pub fn is_unity(&self) -> bool {
        match self {
            Factor::Exact(r) => r.is_one(),
            Factor::Approx(f) => numeric::is_unity(*f),
        }
    }

    /// Caller guarantees the factor is positive
    pub fn recip(self) -> Self {
        match self {
            Factor::Exact(r) => Factor::Exact(r.recip()),
            Factor::Approx(f) => Factor::Approx(1.0 / f),
        }
    }

    /// `self^p`, exact for whole `p` unless it overflows
    pub fn pow(self, p: Rational64) -> Self {
        if let Factor::Exact(r) = self {
            if p.is_integer() {
                let n = p.to_integer();
                let exact = usize::try_from(n.unsigned_abs())
                    .ok()
                    .and_then(|e| checked_pow(r, e));
                if let Some(v) = exact {
                    return Factor::Exact(if n < 0 { v.recip() } else { v });
                }
            }
        }
        Factor::Approx(pow_rational(self.to_f64(), p))
    }

    /// Exact equality when both sides are exact, otherwise equality within
    /// the relative tolerance
    pub fn matches(&self, other: &Factor) -> bool {
        match (self, other) {
            (Factor::Exact(a), Factor::Exact(b)) => a == b,
            _ => approx_eq(self.to_f64(), other.to_f64()),
        }
    }
}

impl Default for Factor {
    fn default() -> Self {
        Factor::one()
    }
}

impl PartialEq for Factor {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl From<f64> for Factor {
    fn from(f: f64) -> Self {
        Factor::Approx(f)
    }
}

impl From<Rational64> for Factor {
    fn from(r: Rational64) -> Self {
        Factor::Exact(r)
    }
}

impl Mul for Factor {
    type Output = Factor;

    fn mul(self, rhs: Factor) -> Factor {
        match (self, rhs) {
            (Factor::Exact(a), Factor::Exact(b)) => match a.checked_mul(&b) {
                Some(r) => Factor::Exact(r),
                None => Factor::Approx(self.to_f64() * rhs.to_f64()),
            },
            _ => Factor::Approx(self.to_f64() * rhs.to_f64()),
        }
    }
}

impl Div for Factor {
    type Output = Factor;

    fn div(self, rhs: Factor) -> Factor {
        match (self, rhs) {
            (Factor::Exact(a), Factor::Exact(b)) => match a.checked_div(&b) {
                Some(r) => Factor::Exact(r),
                None => Factor::Approx(self.to_f64() / rhs.to_f64()),
            },
            _ => Factor::Approx(self.to_f64() / rhs.to_f64()),
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factor::Exact(r) => write!(f, "{}", r),
            Factor::Approx(v) => write!(f, "{}", v),
        }
    }
}

// Serialised as the float value
impl Serialize for Factor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}
