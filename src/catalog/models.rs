use crate::catalog::environment::UnitEntry;
use crate::catalog::expr::{evaluate, parse_decimal};
use crate::dim::dimensions::{Dimensions, BASE_COUNT};
use crate::dim::error::UnitError;
use num_rational::{BigRational, Rational64};
use num_traits::Signed;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// One unit as written in an environment file.
///
/// `Dimension` and `Factor` are kept as raw values so that malformed
/// contents are reported as `InvalidDimension`/`InvalidFactorExpression`
/// instead of a generic parse error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnitRecord {
    #[serde(default)]
    pub dimension: Option<JsonValue>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub factor: Option<JsonValue>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub default: bool,
}

impl UnitRecord {
    pub fn into_entry(self, name: &str, environment: &str) -> Result<UnitEntry, UnitError> {
        let dimension = self.dimension.ok_or_else(|| UnitError::MissingDimension {
            unit: name.to_string(),
            environment: environment.to_string(),
        })?;
        let dimensions = parse_dimensions(name, &dimension)?;

        let mut entry = UnitEntry::new(name, dimensions);
        if let Some(symbol) = self.symbol {
            entry = entry.with_symbol(symbol);
        }
        if let Some(factor) = &self.factor {
            entry = entry.with_factor(parse_factor(factor)?);
        }
        if let Some(value) = self.value {
            entry = entry.with_value(value);
        }
        if self.default {
            entry = entry.as_default();
        }
        Ok(entry)
    }
}

/// Seven exponents: integers, decimals or `"p/q"` strings
pub fn parse_dimensions(unit: &str, value: &JsonValue) -> Result<Dimensions, UnitError> {
    let invalid = |reason: String| UnitError::InvalidDimension {
        unit: unit.to_string(),
        reason,
    };

    let items = value
        .as_array()
        .ok_or_else(|| invalid(format!("expected an array of {} numbers", BASE_COUNT)))?;
    if items.len() != BASE_COUNT {
        return Err(invalid(format!(
            "expected {} exponents, found {}",
            BASE_COUNT,
            items.len()
        )));
    }

    let mut exponents = [Rational64::default(); BASE_COUNT];
    for (slot, item) in exponents.iter_mut().zip(items) {
        *slot = parse_exponent(item).ok_or_else(|| invalid(format!("bad exponent {}", item)))?;
    }
    Ok(Dimensions::from_exponents(exponents))
}

fn parse_exponent(value: &JsonValue) -> Option<Rational64> {
    match value {
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Rational64::from_integer(i))
            } else {
                let f = n.as_f64()?;
                if f.is_finite() {
                    Rational64::approximate_float(f)
                } else {
                    None
                }
            }
        }
        JsonValue::String(s) => s.trim().parse::<Rational64>().ok(),
        _ => None,
    }
}

/// A factor is a number or a restricted arithmetic expression
pub fn parse_factor(value: &JsonValue) -> Result<BigRational, UnitError> {
    match value {
        JsonValue::String(expression) => evaluate(expression),
        JsonValue::Number(n) => {
            let text = n.to_string();
            let factor = parse_decimal(&text)?;
            if !factor.is_positive() {
                return Err(UnitError::factor(&text, "factor must be positive"));
            }
            Ok(factor)
        }
        other => Err(UnitError::factor(
            &other.to_string(),
            "expected a number or an expression string",
        )),
    }
}
