//! Engine configuration

use std::env;
use std::path::{Path, PathBuf};

use sheetsmith_domain::common::none_if_empty;

/// Engine configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Log a warning when a template change drops stored values
    pub warn_on_prune: bool,
    /// Template document to open (runner input)
    pub schema_path: Option<PathBuf>,
    /// Persisted wrapped sheet to load (runner input)
    pub sheet_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            warn_on_prune: true,
            schema_path: None,
            sheet_path: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup. Missing or unparsable values
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            warn_on_prune: lookup("SHEETSMITH_WARN_ON_PRUNE")
                .and_then(|value| parse_flag(&value))
                .unwrap_or(defaults.warn_on_prune),
            schema_path: lookup("SHEETSMITH_SCHEMA_PATH")
                .as_deref()
                .and_then(none_if_empty)
                .map(PathBuf::from),
            sheet_path: lookup("SHEETSMITH_SHEET_PATH")
                .as_deref()
                .and_then(none_if_empty)
                .map(PathBuf::from),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Load `.env.local` then `.env` from `root`, when present. Variables already
/// set in the process environment win.
pub fn load_dotenv_from(root: &Path) {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(EngineConfig::from_lookup(lookup(&[])), EngineConfig::default());
    }

    #[test]
    fn test_reads_values() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("SHEETSMITH_WARN_ON_PRUNE", "off"),
            ("SHEETSMITH_SCHEMA_PATH", "templates/ficha.json"),
            ("SHEETSMITH_SHEET_PATH", ""),
        ]));
        assert!(!config.warn_on_prune);
        assert_eq!(config.schema_path, Some(PathBuf::from("templates/ficha.json")));
        assert_eq!(config.sheet_path, None);
    }

    #[test]
    fn test_invalid_flag_falls_back() {
        let config = EngineConfig::from_lookup(lookup(&[("SHEETSMITH_WARN_ON_PRUNE", "maybe")]));
        assert!(config.warn_on_prune);
    }
}
