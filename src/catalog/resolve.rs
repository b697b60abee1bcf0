//! Choosing the unit a quantity is displayed in.
//!
//! Resolution first reduces a dimension vector to a power of some base
//! vector (`N²` is `N` to the power 2), then picks among the catalog entries
//! for that base. Among equally eligible entries the first declared wins.

use crate::catalog::environment::{Catalog, UnitEntry, UnitKind};
use crate::dim::dimensions::Dimensions;
use crate::dim::factor::Factor;
use log::debug;
use num_rational::Rational64;
use num_traits::One;

/// `dimensions == base * power`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reduction {
    pub power: Rational64,
    pub base: Dimensions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedUnit<'c> {
    /// A unit of another system. `factor` is the display factor to apply,
    /// which differs from the quantity's when a default unit took over.
    Defined { entry: &'c UnitEntry, factor: Factor },
    /// An SI derived unit, auto-prefixed
    Derived(&'c UnitEntry),
    /// An SI base unit (index into the base symbols), auto-prefixed
    Base(usize),
    /// No named unit: render the base-unit product
    Compound,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'c> {
    pub power: Rational64,
    pub base: Dimensions,
    pub unit: ResolvedUnit<'c>,
}

pub fn reduce(catalog: &Catalog, dimensions: Dimensions) -> Reduction {
    let one = Rational64::one();
    if catalog.matching(dimensions).next().is_some() {
        return Reduction {
            power: one,
            base: dimensions,
        };
    }
    if let Some((index, exponent)) = dimensions.single_component() {
        return Reduction {
            power: exponent,
            base: Dimensions::basis(index),
        };
    }
    for entry in catalog.entries() {
        if let Some(power) = dimensions.ratio_to(&entry.dimensions()) {
            return Reduction {
                power,
                base: entry.dimensions(),
            };
        }
    }
    Reduction {
        power: one,
        base: dimensions,
    }
}

/// Resolve the display unit for a quantity of `dimensions` shown through
/// `factor`
pub fn resolve(catalog: &Catalog, dimensions: Dimensions, factor: Factor) -> Resolution<'_> {
    let Reduction { power, base } = reduce(catalog, dimensions);
    let unit = lookup(catalog, base, power, factor);
    debug!(
        "resolved {} with factor {} as {:?} (power {})",
        dimensions, factor, unit, power
    );
    Resolution { power, base, unit }
}

fn lookup(
    catalog: &Catalog,
    base: Dimensions,
    power: Rational64,
    factor: Factor,
) -> ResolvedUnit<'_> {
    let basis = match base.single_component() {
        Some((index, exponent)) if exponent.is_one() => Some(index),
        _ => None,
    };

    if !factor.is_unity() {
        let defined: Vec<&UnitEntry> = catalog
            .matching(base)
            .filter(|e| e.kind() == UnitKind::Defined)
            .collect();
        let exact = defined
            .iter()
            .find(|e| e.display_factor().pow(power).matches(&factor));
        if let Some(&entry) = exact {
            return ResolvedUnit::Defined { entry, factor };
        }
        // Keep a calculation in its unit system after the factor drifts
        if let Some(&entry) = defined.iter().find(|e| e.is_default()) {
            return ResolvedUnit::Defined {
                entry,
                factor: entry.display_factor().pow(power),
            };
        }
    }

    if let Some(entry) = catalog
        .matching(base)
        .find(|e| e.kind() == UnitKind::Derived)
    {
        return ResolvedUnit::Derived(entry);
    }
    match basis {
        Some(index) => ResolvedUnit::Base(index),
        None => ResolvedUnit::Compound,
    }
}
