use crate::catalog::resolve::{resolve, ResolvedUnit};
use crate::catalog::Catalog;
use crate::dim::dimensions::{Dimensions, BASE_SYMBOLS};
use crate::dim::numeric::rational_to_f64;
use crate::dim::quantity::Quantity;
use crate::format::prefix::{auto_select, Prefix};
use crate::format::symbol::{render_compound, render_unit, Notation, Template};

/// The numeric value and rendered unit a quantity is shown with
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub value: f64,
    pub unit: String,
    /// SI magnitude of one displayed unit, so `value * scale` is the magnitude
    pub scale: f64,
    /// Prefix applied to the unit, if it takes prefixes
    pub prefix: Option<Prefix>,
}

/// Formats quantities against one catalog snapshot
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'a> {
    catalog: &'a Catalog,
    template: Template,
    notation: Notation,
    precision: Option<usize>,
}

impl<'a> Formatter<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            template: Template::Plain,
            notation: Notation::Fixed,
            precision: None,
        }
    }

    pub fn template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    pub fn notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }

    /// Override the quantity's own precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn layout(&self, q: &Quantity) -> Layout {
        let resolution = resolve(self.catalog, q.dimensions(), q.factor());
        let power = resolution.power;
        let magnitude = q.magnitude();

        let prefixed = |symbol: &str, offset: i32| {
            let exponent = rational_to_f64(power);
            let prefix: Prefix = q
                .prefix()
                .unwrap_or_else(|| auto_select(magnitude, exponent, offset));
            let scale = prefix.scale(exponent, offset);
            Layout {
                value: magnitude / scale,
                unit: render_unit(prefix.symbol, symbol, power, self.template),
                scale,
                prefix: Some(prefix),
            }
        };

        match resolution.unit {
            ResolvedUnit::Defined { entry, factor } => Layout {
                value: magnitude * factor.to_f64(),
                unit: render_unit("", entry.symbol(), power, self.template),
                scale: factor.recip().to_f64(),
                prefix: None,
            },
            ResolvedUnit::Derived(entry) => prefixed(entry.symbol(), 0),
            // Mass prefixes attach to the gram
            ResolvedUnit::Base(Dimensions::MASS) => prefixed("g", 3),
            ResolvedUnit::Base(index) => prefixed(BASE_SYMBOLS[index], 0),
            ResolvedUnit::Compound => Layout {
                value: magnitude,
                unit: render_compound(&q.dimensions(), self.template),
                scale: 1.0,
                prefix: None,
            },
        }
    }

    /// The number `format` would print, before rounding
    pub fn display_value(&self, q: &Quantity) -> f64 {
        self.layout(q).value
    }

    pub fn format(&self, q: &Quantity) -> String {
        let Layout { value, unit, .. } = self.layout(q);
        let precision = self.precision.unwrap_or_else(|| q.precision());
        let number = match self.notation {
            Notation::Fixed => format_fixed(value, precision),
            Notation::Scientific => format_scientific(value, precision, self.template),
        };
        match self.template {
            Template::Plain | Template::Html => format!("{} {}", number, unit),
            Template::Latex => format!("${}\\ {}$", number, unit),
        }
    }
}

/// Round half away from zero at `precision` decimal places
pub fn round_half_away(value: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(precision as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / scale;
    // Drop the sign of negative zero
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn format_fixed(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, round_half_away(value, precision))
}

pub fn format_scientific(value: f64, precision: usize, template: Template) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    let text = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = match text.split_once('e') {
        Some(parts) => parts,
        None => return text,
    };
    match template {
        Template::Plain => text.clone(),
        Template::Html => format!("{} &times; 10<sup>{}</sup>", mantissa, exponent),
        Template::Latex => format!("{} \\times 10^{{{}}}", mantissa, exponent),
    }
}
