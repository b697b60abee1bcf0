// WebAssembly bindings: load an environment from text and format through it
use crate::catalog::{self, Catalog, SourceFormat};
use crate::format::{Formatter, Template};
use crate::Quantity;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct UnitsWasm {
    catalog: Catalog,
}

#[wasm_bindgen]
impl UnitsWasm {
    /// Build from environment JSON (unit identifier -> record)
    #[wasm_bindgen(constructor)]
    pub fn new(environment_json: &str) -> Result<UnitsWasm, JsValue> {
        let catalog = catalog::load_from_str("wasm", environment_json, SourceFormat::Json)
            .map_err(|e| JsValue::from_str(&format!("Failed to load environment: {}", e)))?;
        Ok(Self { catalog })
    }

    /// Format `magnitude` of the named unit. `template` is "plain", "html"
    /// or "latex" (default plain).
    #[wasm_bindgen]
    pub fn format(
        &self,
        magnitude: f64,
        unit: &str,
        template: Option<String>,
        precision: Option<usize>,
    ) -> Result<String, JsValue> {
        let quantity = self.quantity(magnitude, unit)?;
        let template: Template = match template {
            Some(t) => t
                .parse()
                .map_err(|e| JsValue::from_str(&format!("{}", e)))?,
            None => Template::Plain,
        };
        let mut formatter = Formatter::new(&self.catalog).template(template);
        if let Some(precision) = precision {
            formatter = formatter.precision(precision);
        }
        Ok(formatter.format(&quantity))
    }

    /// Express `magnitude` of `from` in `to`, returned as plain text
    #[wasm_bindgen]
    pub fn convert(&self, magnitude: f64, from: &str, to: &str) -> Result<String, JsValue> {
        let converted = self
            .quantity(magnitude, from)?
            .convert_to(&self.catalog, to)
            .map_err(|e| JsValue::from_str(&format!("Failed to convert: {}", e)))?;
        Ok(Formatter::new(&self.catalog).format(&converted))
    }

    /// JSON object of unit identifier -> one unit as a quantity
    #[wasm_bindgen]
    pub fn list_units(&self) -> Result<String, JsValue> {
        let units: serde_json::Map<String, serde_json::Value> = self
            .catalog
            .units()
            .into_iter()
            .map(|(name, q)| Ok((name.to_string(), serde_json::to_value(q)?)))
            .collect::<Result<_, serde_json::Error>>()
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize units: {}", e)))?;
        serde_json::to_string(&units)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize units: {}", e)))
    }
}

impl UnitsWasm {
    fn quantity(&self, magnitude: f64, unit: &str) -> Result<Quantity, JsValue> {
        let entry = self
            .catalog
            .find(unit)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown unit: '{}'", unit)))?;
        Ok(magnitude * entry.quantity())
    }
}
