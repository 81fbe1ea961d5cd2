use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    source::Source,
};

/// Application configuration.
///
/// Owned by the caller and passed explicitly into the sync pipeline; there is
/// no process-wide configuration store.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Configured documentation sources.
    #[serde(default)]
    pub sources: Vec<Source>,

    /// Root directory for the rendered HTML trees.
    /// Default: ./public/docs
    pub dest_path: Option<String>,

    /// Whether validated image files are copied next to the rendered HTML.
    /// Default: false
    pub copy_images: Option<bool>,
}

impl Config {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for source in &self.sources {
            if !seen.insert(source.name.as_str()) {
                return Err(ConfigError::DuplicateSourceName(source.name.clone()));
            }
            if source.tags.is_empty() {
                return Err(ConfigError::EmptyTags(source.name.clone()));
            }
        }
        Ok(())
    }

    /// Look up a source by name.
    pub fn find_source(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|source| source.name == name)
    }

    pub fn dest_path(&self) -> PathBuf {
        self.dest_path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("public/docs"))
    }

    pub fn copy_images(&self) -> bool {
        self.copy_images.unwrap_or(false)
    }
}
