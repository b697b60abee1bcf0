use crate::catalog::environment::Catalog;
use crate::catalog::models::UnitRecord;
use crate::dim::error::UnitError;
use log::debug;
use serde_json::{Map, Value as JsonValue};
use std::fs;
use std::path::Path;

/// Syntax of an environment source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
}

impl SourceFormat {
    /// `.toml` files are TOML, everything else is read as JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => SourceFormat::Toml,
            _ => SourceFormat::Json,
        }
    }
}

/// Load an environment file. The catalog is named after the file stem
/// (`envs/structural.toml` -> `structural`).
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Catalog, UnitError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| UnitError::Io(format!("{}: {}", path.display(), e)))?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| UnitError::Io(format!("Invalid filename: {}", path.display())))?;

    debug!("loading environment '{}' from {}", name, path.display());
    load_from_str(name, &content, SourceFormat::from_path(path))
}

/// Parse environment text. Units keep the order they are declared in.
pub fn load_from_str(name: &str, content: &str, format: SourceFormat) -> Result<Catalog, UnitError> {
    let records: Map<String, JsonValue> = match format {
        SourceFormat::Json => serde_json::from_str(content)?,
        SourceFormat::Toml => toml::from_str(content)?,
    };

    let mut entries = Vec::with_capacity(records.len());
    for (unit, value) in records {
        let record: UnitRecord = serde_json::from_value(value)
            .map_err(|e| UnitError::Parse(format!("unit '{}': {}", unit, e)))?;
        entries.push(record.into_entry(&unit, name)?);
    }

    Catalog::new(name, entries)
}
