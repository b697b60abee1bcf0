use crate::catalog::environment::{UnitEntry, UnitKind};
use crate::dim::error::UnitError;
use std::collections::HashMap;
use std::fmt;

/// Non-fatal observations made while building a catalog
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub warnings: Vec<ValidationIssue>,
}

#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub message: String,
    /// Identifier of the unit the issue was raised on
    pub location: Option<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    pub fn add_warning(&mut self, message: String, location: Option<String>) {
        self.warnings.push(ValidationIssue { message, location });
    }

    pub fn has_issues(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "[{}] {}", loc, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.warnings.is_empty() {
            writeln!(f, "Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "  {}", warning)?;
            }
        }
        Ok(())
    }
}

/// Check a unit table before it becomes a catalog.
///
/// Two defaults for one dimension vector is an error. Ignored default flags
/// and names that shadow earlier units are reported as warnings.
pub fn validate(entries: &[UnitEntry]) -> Result<ValidationResult, UnitError> {
    let mut result = ValidationResult::new();
    let mut defaults: Vec<&UnitEntry> = Vec::new();
    let mut seen: HashMap<&str, &str> = HashMap::new();

    for entry in entries {
        if entry.is_default() {
            if entry.kind() == UnitKind::Defined {
                if let Some(first) = defaults
                    .iter()
                    .find(|d| d.dimensions() == entry.dimensions())
                {
                    return Err(UnitError::ConflictingDefault {
                        first: first.name().to_string(),
                        second: entry.name().to_string(),
                        dimensions: entry.dimensions(),
                    });
                }
                defaults.push(entry);
            } else {
                result.add_warning(
                    "'Default' has no effect on a unit with factor 1 and is ignored".to_string(),
                    Some(entry.name().to_string()),
                );
            }
        }

        for key in [entry.name(), entry.symbol()] {
            if let Some(earlier) = seen.get(key) {
                if *earlier != entry.name() {
                    result.add_warning(
                        format!("'{}' is already used by unit '{}'", key, earlier),
                        Some(entry.name().to_string()),
                    );
                }
            }
        }
        seen.entry(entry.name()).or_insert(entry.name());
        seen.entry(entry.symbol()).or_insert(entry.name());
    }

    Ok(result)
}
