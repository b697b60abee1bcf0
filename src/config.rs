use crate::dim::error::UnitError;
use crate::dim::quantity::DEFAULT_PRECISION;
use crate::format::Template;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no config is given
pub const SETTINGS_FILE: &str = "unitsafe.toml";

/// Front-end settings, read from `unitsafe.toml`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    // Environment activated at startup
    #[serde(default = "default_environment")]
    pub environment: String,

    // Extra directories searched for <name>.json / <name>.toml
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,

    #[serde(default = "default_precision")]
    pub precision: usize,

    #[serde(default)]
    pub template: Template,
}

fn default_environment() -> String {
    "default".to_string()
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

impl Settings {
    /// Relative search paths are taken relative to the settings file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, UnitError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| UnitError::Io(format!("{}: {}", path.display(), e)))?;
        let mut settings: Settings = toml::from_str(&content)?;

        if let Some(base) = path.parent() {
            for search_path in settings.search_paths.iter_mut() {
                if search_path.is_relative() {
                    *search_path = base.join(&*search_path);
                }
            }
        }
        Ok(settings)
    }

    /// `path` if given, else `unitsafe.toml` in the working directory if it
    /// exists, else the defaults
    pub fn discover(path: Option<&Path>) -> Result<Self, UnitError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None if Path::new(SETTINGS_FILE).is_file() => Self::load_from_file(SETTINGS_FILE),
            None => Ok(Self::empty()),
        }
    }

    pub fn empty() -> Self {
        Self {
            environment: default_environment(),
            search_paths: Vec::new(),
            precision: default_precision(),
            template: Template::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::empty());
        assert_eq!(settings.environment, "default");
        assert_eq!(settings.precision, 3);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(
            &path,
            r#"
environment = "structural"
search_paths = ["envs", "/opt/units"]
precision = 2
template = "latex"
"#,
        )
        .unwrap();

        let settings = Settings::load_from_file(&path).unwrap();
        assert_eq!(settings.environment, "structural");
        assert_eq!(settings.precision, 2);
        assert_eq!(settings.template, Template::Latex);
        assert_eq!(settings.search_paths[0], dir.path().join("envs"));
        assert_eq!(settings.search_paths[1], PathBuf::from("/opt/units"));
    }

    #[test]
    fn test_bad_template_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "template = \"markdown\"\n").unwrap();
        assert!(matches!(
            Settings::load_from_file(&path),
            Err(UnitError::Parse(_))
        ));
    }
}
