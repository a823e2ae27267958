//! Named configuration loader
//!
//! Sources, lowest to highest precedence:
//! 1. Presets (embedded TOML files, named after the file stem)
//! 2. Config file (.rte-config.toml, $RTE_CONFIG or
//!    ~/.config/rte-config/config.toml, first one found)

use crate::config::store::ConfigStore;
use crate::types::{ConfigError, Result};
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// Embed the presets directory at compile time
static PRESETS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/presets");

/// On-disk layout: one `[configs.<name>]` table per named config
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    configs: BTreeMap<String, Value>,
}

pub struct ConfigLoader {
    presets: HashMap<String, Value>,
    file_configs: HashMap<String, Value>,
    source: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Result<Self> {
        Self::from_paths(Self::default_candidates())
    }

    /// Load presets plus the first existing file among `candidates`
    pub fn from_paths(candidates: Vec<PathBuf>) -> Result<Self> {
        let presets = Self::load_presets();
        info!("Loaded {} config presets", presets.len());

        let (source, file_configs) = match candidates.into_iter().find(|p| p.exists()) {
            Some(path) => {
                let configs = Self::load_file(&path)?;
                info!("Loaded {} configs from {}", configs.len(), path.display());
                (Some(path), configs)
            }
            None => {
                debug!("No config file found");
                (None, HashMap::new())
            }
        };

        Ok(Self {
            presets,
            file_configs,
            source,
        })
    }

    fn default_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        // Project-specific config
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(".rte-config.toml"));
        }

        if let Ok(config_path) = std::env::var("RTE_CONFIG") {
            candidates.push(PathBuf::from(config_path));
        }

        // User-global config
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("rte-config").join("config.toml"));
        }

        candidates
    }

    fn load_presets() -> HashMap<String, Value> {
        let mut presets = HashMap::new();

        for file in PRESETS_DIR.files() {
            let path = file.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };

            let Some(content) = file.contents_utf8() else {
                warn!("Skipping preset {}: invalid UTF-8", path.display());
                continue;
            };

            match toml::from_str::<Value>(content) {
                Ok(config) => {
                    debug!("Loaded preset: {}", name);
                    presets.insert(name, config);
                }
                Err(e) => {
                    warn!("Failed to parse preset {}: {}", path.display(), e);
                }
            }
        }

        presets
    }

    /// Parse a config file into its named configs
    pub fn load_file(path: &Path) -> Result<HashMap<String, Value>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::ConfigFile(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let file: ConfigFile = toml::from_str(&content).map_err(|e| {
            ConfigError::ConfigFile(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        if let Some(name) = file.configs.keys().find(|name| name.is_empty()) {
            return Err(ConfigError::ConfigFile(format!(
                "Config name '{}' in {} cannot be empty",
                name,
                path.display()
            )));
        }

        Ok(file.configs.into_iter().collect())
    }

    /// File the named configs were read from, if any
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn preset_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Look up a named config; file entries shadow presets
    pub fn get_config(&self, name: &str) -> Option<&Value> {
        self.file_configs.get(name).or_else(|| self.presets.get(name))
    }

    /// All config names from every source, sorted and deduplicated
    pub fn config_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .presets
            .keys()
            .chain(self.file_configs.keys())
            .map(String::as_str)
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Build a store over every loaded config.
    ///
    /// Merged configs are produced on first lookup.
    pub fn into_store(self) -> ConfigStore {
        let mut configs = self.presets;
        for (name, config) in self.file_configs {
            if configs.insert(name.clone(), config).is_some() {
                debug!("Config file overrides preset '{}'", name);
            }
        }
        ConfigStore::from_user_configs(configs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ConfigType, Plugin};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn loader_without_file() -> ConfigLoader {
        ConfigLoader::from_paths(vec![]).expect("Failed to create ConfigLoader")
    }

    #[test]
    fn test_presets_loaded() {
        let loader = loader_without_file();
        assert_eq!(loader.preset_names(), vec!["comment", "full", "minimal"]);
        assert!(loader.source_path().is_none());

        let minimal = loader.get_config("minimal").unwrap();
        assert_eq!(
            minimal["plugins"]["toolbar"]["textActions"],
            json!(["bold", "italic", "underline"])
        );
        assert_eq!(minimal["plugins"]["floatingMenu"], json!(false));
    }

    #[test]
    fn test_file_overrides_preset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[configs.minimal.plugins]
html = false

[configs.review.plugins.toolbar]
register = true
textActions = ["bold", "code"]
"#,
        )
        .unwrap();

        let missing = dir.path().join("missing.toml");
        let loader = ConfigLoader::from_paths(vec![missing, path.clone()]).unwrap();

        assert_eq!(loader.source_path(), Some(path.as_path()));
        assert_eq!(loader.config_names(), vec!["comment", "full", "minimal", "review"]);
        assert_eq!(
            loader.get_config("minimal").unwrap(),
            &json!({ "plugins": { "html": false } })
        );

        let store = loader.into_store();
        assert!(!store.plugin_is_registered(Plugin::Html, Some("minimal"), ConfigType::Merged));
        assert_eq!(
            store.get_config_for_path("plugins.toolbar.textActions", Some("review"), ConfigType::Merged),
            Some(json!(["bold", "code"]))
        );
    }

    #[test]
    fn test_into_store_merges_lazily() {
        let store = loader_without_file().into_store();
        assert!(store.merged_configs().is_empty());

        assert!(store.plugin_is_registered(Plugin::FloatingMenu, Some("comment"), ConfigType::Merged));
        assert!(!store.plugin_is_registered(Plugin::Toolbar, Some("comment"), ConfigType::Merged));
        assert!(store.merged_configs().contains_key("comment"));
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[configs.a\nplugins = ").unwrap();

        let result = ConfigLoader::from_paths(vec![path]);
        assert!(matches!(result, Err(ConfigError::ConfigFile(_))));
    }

    #[test]
    fn test_empty_file_has_no_configs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.toml");
        fs::write(&path, "").unwrap();

        let loader = ConfigLoader::from_paths(vec![path]).unwrap();
        assert_eq!(loader.config_names(), vec!["comment", "full", "minimal"]);
    }
}
