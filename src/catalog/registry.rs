use crate::catalog::environment::Catalog;
use crate::catalog::loader::{load_from_file, load_from_str, SourceFormat};
use crate::config::Settings;
use crate::dim::error::UnitError;
use log::debug;
use std::path::{Path, PathBuf};

/// Environments compiled into the crate
const BUILTIN: [(&str, &str); 2] = [
    ("default", include_str!("../../environments/default.json")),
    ("structural", include_str!("../../environments/structural.json")),
];

const EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Finds environments by name: an explicit file path, then
/// `<dir>/<name>.json|toml` for each search path, then the built-ins
#[derive(Debug, Clone, Default)]
pub struct Registry {
    search_paths: Vec<PathBuf>,
}

impl Registry {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.search_paths.clone())
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    pub fn locate(&self, name: &str) -> Result<Catalog, UnitError> {
        let path = Path::new(name);
        let has_extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map_or(false, |ext| EXTENSIONS.contains(&ext));
        if has_extension && path.is_file() {
            return load_from_file(path);
        }

        for dir in &self.search_paths {
            for ext in EXTENSIONS {
                let candidate = dir.join(format!("{}.{}", name, ext));
                if candidate.is_file() {
                    return load_from_file(candidate);
                }
            }
        }

        match Self::builtin_source(name) {
            Some(source) => {
                debug!("using built-in environment '{}'", name);
                load_from_str(name, source, SourceFormat::Json)
            }
            None => Err(UnitError::EnvironmentNotFound(name.to_string())),
        }
    }

    /// Environment names found on the search paths followed by the built-ins
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for dir in &self.search_paths {
            let entries = match std::fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) => {
                    debug!("skipping search path {}: {}", dir.display(), e);
                    continue;
                }
            };
            let mut found: Vec<String> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| {
                    path.extension()
                        .and_then(|s| s.to_str())
                        .map_or(false, |ext| EXTENSIONS.contains(&ext))
                })
                .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
                .collect();
            found.sort();
            names.extend(found);
        }
        names.extend(Self::builtin_names().iter().map(|n| n.to_string()));

        let mut seen = std::collections::HashSet::new();
        names.retain(|n| seen.insert(n.clone()));
        names
    }

    pub fn builtin_names() -> Vec<&'static str> {
        BUILTIN.iter().map(|(name, _)| *name).collect()
    }

    fn builtin_source(name: &str) -> Option<&'static str> {
        BUILTIN
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(_, source)| *source)
    }
}
