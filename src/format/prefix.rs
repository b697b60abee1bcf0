//! SI magnitude prefixes and automatic prefix selection.

use crate::dim::error::UnitError;
use crate::dim::numeric::REL_TOLERANCE;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Prefix {
    pub symbol: &'static str,
    /// Power of ten, a multiple of 3
    pub exponent: i32,
}

/// Standard prefixes from yocto to yotta, ascending
pub const PREFIXES: [Prefix; 17] = [
    Prefix { symbol: "y", exponent: -24 },
    Prefix { symbol: "z", exponent: -21 },
    Prefix { symbol: "a", exponent: -18 },
    Prefix { symbol: "f", exponent: -15 },
    Prefix { symbol: "p", exponent: -12 },
    Prefix { symbol: "n", exponent: -9 },
    Prefix { symbol: "μ", exponent: -6 },
    Prefix { symbol: "m", exponent: -3 },
    Prefix { symbol: "", exponent: 0 },
    Prefix { symbol: "k", exponent: 3 },
    Prefix { symbol: "M", exponent: 6 },
    Prefix { symbol: "G", exponent: 9 },
    Prefix { symbol: "T", exponent: 12 },
    Prefix { symbol: "P", exponent: 15 },
    Prefix { symbol: "E", exponent: 18 },
    Prefix { symbol: "Z", exponent: 21 },
    Prefix { symbol: "Y", exponent: 24 },
];

impl Prefix {
    pub const UNITY: Prefix = Prefix { symbol: "", exponent: 0 };

    /// Look up a prefix by symbol. `""` and `"unity"` name the empty prefix;
    /// `u` and `µ` (micro sign) are accepted for micro.
    pub fn lookup(symbol: &str) -> Result<Prefix, UnitError> {
        let symbol = match symbol {
            "unity" => "",
            "u" | "µ" => "μ",
            other => other,
        };
        PREFIXES
            .iter()
            .find(|p| p.symbol == symbol)
            .copied()
            .ok_or_else(|| UnitError::UnknownPrefix(symbol.to_string()))
    }

    pub fn from_exponent(exponent: i32) -> Option<Prefix> {
        PREFIXES.iter().find(|p| p.exponent == exponent).copied()
    }

    /// Divisor applied to an SI value shown with this prefix on a unit
    /// raised to `power`. `offset` is the power of ten already carried by the
    /// base symbol (3 for `kg`, whose prefixes attach to `g`).
    pub fn scale(&self, power: f64, offset: i32) -> f64 {
        let exponent = (self.exponent - offset) as f64 * power;
        if exponent.fract() == 0.0 && exponent.abs() < i32::MAX as f64 {
            10f64.powi(exponent as i32)
        } else {
            10f64.powf(exponent)
        }
    }
}

/// Pick the prefix that keeps `value` at or above 1 in prefixed-then-powered
/// space. Zero and non-finite values get the unprefixed tier.
pub fn auto_select(value: f64, power: f64, offset: i32) -> Prefix {
    let unprefixed = Prefix::from_exponent(offset).unwrap_or(Prefix::UNITY);
    if value == 0.0 || !value.is_finite() || power == 0.0 {
        return unprefixed;
    }

    let magnitude = value.abs();
    let qualifies = |p: &&Prefix| magnitude / p.scale(power, offset) >= 1.0 - REL_TOLERANCE;

    // Positive powers shrink the display as the tier grows, negative powers
    // grow it, so search from the opposite ends.
    let (found, fallback) = if power > 0.0 {
        (PREFIXES.iter().rev().find(qualifies), PREFIXES[0])
    } else {
        (PREFIXES.iter().find(qualifies), PREFIXES[PREFIXES.len() - 1])
    };
    found.copied().unwrap_or(fallback)
}
