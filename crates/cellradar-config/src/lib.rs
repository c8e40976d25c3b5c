//! cellradar-config — Service settings and the dataset registry.
//!
//! The registry maps human-readable dataset names to store files on disk.
//! It is loaded once at startup and passed into the pipeline explicitly;
//! nothing in this crate is process-global state.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate dataset name: {0}")]
    DuplicateDataset(String),
}

/// Complete service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    /// Registered datasets, in display order.
    #[serde(default, rename = "dataset")]
    pub datasets: Vec<DatasetEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    10751
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// One registered dataset: display name plus store file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub name: String,
    pub path: PathBuf,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for dataset in &self.datasets {
            if !seen.insert(dataset.name.as_str()) {
                return Err(ConfigError::DuplicateDataset(dataset.name.clone()));
            }
        }
        Ok(())
    }

    /// Look up a dataset by its display name.
    pub fn resolve_dataset(&self, name: &str) -> Option<&DatasetEntry> {
        self.datasets.iter().find(|d| d.name == name)
    }

    pub fn dataset_names(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(|d| d.name.as_str())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [server]
        port = 8080

        [[dataset]]
        name = "Human normal hematopoiesis (HemaExplorer)"
        path = "datasets/human_hemaexplorer.parquet"

        [[dataset]]
        name = "Mouse normal hematopoiesis (BloodSpot)"
        path = "datasets/mouse_bloodspot.parquet"
    "#;

    #[test]
    fn test_parse_sample() {
        let settings = Settings::from_toml_str(SAMPLE).unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.datasets.len(), 2);
        assert_eq!(
            settings.datasets[1].path,
            PathBuf::from("datasets/mouse_bloodspot.parquet")
        );
    }

    #[test]
    fn test_defaults_when_sections_absent() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 10751);
        assert!(settings.datasets.is_empty());
    }

    #[test]
    fn test_resolve_dataset() {
        let settings = Settings::from_toml_str(SAMPLE).unwrap();
        let entry = settings
            .resolve_dataset("Mouse normal hematopoiesis (BloodSpot)")
            .unwrap();
        assert_eq!(entry.path, PathBuf::from("datasets/mouse_bloodspot.parquet"));
        assert!(settings.resolve_dataset("Zebrafish").is_none());
    }

    #[test]
    fn test_duplicate_dataset_rejected() {
        let toml = r#"
            [[dataset]]
            name = "Same"
            path = "a.parquet"

            [[dataset]]
            name = "Same"
            path = "b.parquet"
        "#;
        let err = Settings::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateDataset(name) if name == "Same"));
    }

    #[test]
    fn test_dataset_names_ordered() {
        let settings = Settings::from_toml_str(SAMPLE).unwrap();
        let names: Vec<&str> = settings.dataset_names().collect();
        assert_eq!(names[0], "Human normal hematopoiesis (HemaExplorer)");
        assert_eq!(names[1], "Mouse normal hematopoiesis (BloodSpot)");
    }
}
