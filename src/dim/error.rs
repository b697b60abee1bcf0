use crate::dim::dimensions::Dimensions;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("Dimension mismatch in {operation}: {left} vs {right}")]
    DimensionMismatch {
        operation: &'static str,
        left: Dimensions,
        right: Dimensions,
    },

    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    #[error("Unknown unit: '{0}'")]
    UnknownUnit(String),

    #[error("Unknown prefix: '{0}'")]
    UnknownPrefix(String),

    #[error("Dimension array not defined for unit '{unit}' in environment '{environment}'")]
    MissingDimension { unit: String, environment: String },

    #[error("Invalid dimension for unit '{unit}': {reason}")]
    InvalidDimension { unit: String, reason: String },

    #[error("Invalid factor expression '{expression}': {reason}")]
    InvalidFactorExpression { expression: String, reason: String },

    #[error("Units '{first}' and '{second}' are both marked as default for {dimensions}")]
    ConflictingDefault {
        first: String,
        second: String,
        dimensions: Dimensions,
    },

    #[error("Environment '{0}' not found")]
    EnvironmentNotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl UnitError {
    pub(crate) fn factor(expression: &str, reason: impl Into<String>) -> Self {
        UnitError::InvalidFactorExpression {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for UnitError {
    fn from(e: std::io::Error) -> Self {
        UnitError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for UnitError {
    fn from(e: serde_json::Error) -> Self {
        UnitError::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for UnitError {
    fn from(e: toml::de::Error) -> Self {
        UnitError::Parse(e.to_string())
    }
}
