//! Rendering unit symbols and exponents for plain text, HTML and LaTeX.

use crate::dim::dimensions::Dimensions;
use crate::dim::error::UnitError;
use crate::dim::numeric::rational_to_f64;
use num_rational::Rational64;
use num_traits::One;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Plain,
    Html,
    Latex,
}

impl FromStr for Template {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Template::Plain),
            "html" => Ok(Template::Html),
            "latex" | "tex" => Ok(Template::Latex),
            other => Err(UnitError::Parse(format!("unknown template '{}'", other))),
        }
    }
}

/// How the numeric part is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    #[default]
    Fixed,
    Scientific,
}

/// Unicode superscript form of an exponent string. The decimal point
/// becomes `'` (`0.5` -> `⁰'⁵`).
pub fn superscript(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            '-' => '⁻',
            '.' => '\'',
            other => other,
        })
        .collect()
}

/// Exponent text, empty for a power of one. Fractions are written as
/// decimals.
pub fn exponent_text(power: Rational64) -> String {
    if power.is_one() {
        String::new()
    } else if power.is_integer() {
        power.to_integer().to_string()
    } else {
        rational_to_f64(power).to_string()
    }
}

pub fn render_exponent(power: Rational64, template: Template) -> String {
    let text = exponent_text(power);
    if text.is_empty() {
        return text;
    }
    match template {
        Template::Plain => superscript(&text),
        Template::Html => format!("<sup>{}</sup>", text),
        Template::Latex => format!("^{{{}}}", text),
    }
}

fn separator(template: Template) -> &'static str {
    match template {
        Template::Plain => "·",
        Template::Html => "&#8901;",
        Template::Latex => " \\cdot ",
    }
}

/// A prefixed symbol with markup applied. Embedded `·` separators
/// (e.g. `lb·ft`) follow the template.
pub fn render_symbol(prefix: &str, symbol: &str, template: Template) -> String {
    match template {
        Template::Plain => format!("{}{}", prefix, symbol),
        Template::Html => format!("{}{}", prefix, symbol)
            .replace('·', separator(template))
            .replace('Ω', "&#0937;"),
        Template::Latex => {
            let body = symbol
                .replace('·', &format!("}}{}\\mathrm{{", separator(template)))
                .replace('Ω', "\\Omega");
            format!("\\mathrm{{{}{}}}", prefix, body)
        }
    }
}

pub fn render_unit(prefix: &str, symbol: &str, power: Rational64, template: Template) -> String {
    format!(
        "{}{}",
        render_symbol(prefix, symbol, template),
        render_exponent(power, template)
    )
}

/// Product of SI base symbols, e.g. `kg·m·s⁻²`
pub fn render_compound(dimensions: &Dimensions, template: Template) -> String {
    dimensions
        .components()
        .into_iter()
        .map(|(symbol, exponent)| render_unit("", symbol, exponent, template))
        .collect::<Vec<_>>()
        .join(separator(template))
}
