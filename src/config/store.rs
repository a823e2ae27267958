//! Named configuration store
//!
//! Holds the default configuration plus any number of named user
//! configurations and their merged counterparts. Trees are shared as
//! `Arc<Value>` snapshots, so a reader can never observe another reader's
//! changes; path lookups hand out owned copies.

use crate::config::define::{define_config, NamedConfig};
use crate::config::defaults::default_config_tree;
use crate::config::merge::{merge_configs, validate_default};
use crate::config::path::resolve_path;
use crate::config::registration::is_registered;
use crate::config::schema::ConfigType;
use crate::types::{ConfigError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

static SHARED_STORE: LazyLock<Arc<ConfigStore>> = LazyLock::new(|| Arc::new(ConfigStore::new()));

#[derive(Debug, Default)]
struct ConfigMaps {
    /// Configurations provided by the user, by name
    user_configs: HashMap<String, Arc<Value>>,

    /// User configurations merged over the default, under the same names
    merged_configs: HashMap<String, Arc<Value>>,
}

#[derive(Debug)]
pub struct ConfigStore {
    default_config: Arc<Value>,
    maps: RwLock<ConfigMaps>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Create a store over the built-in default with no named configs
    pub fn new() -> Self {
        Self {
            default_config: Arc::new(default_config_tree()),
            maps: RwLock::new(ConfigMaps::default()),
        }
    }

    /// Create a store over a custom default configuration.
    ///
    /// The whole default is checked up front, so later merges against it
    /// cannot fail.
    pub fn with_default(default_config: Value) -> Result<Self> {
        validate_default(&default_config)?;

        Ok(Self {
            default_config: Arc::new(default_config),
            maps: RwLock::new(ConfigMaps::default()),
        })
    }

    /// Create a store pre-seeded with one or more named configs
    pub fn with_configs(configs: impl Into<Vec<NamedConfig>>) -> Result<Self> {
        let store = Self::new();
        define_config(configs, Some(&store))?;
        Ok(store)
    }

    /// Create a store holding user configs whose merged trees are built on
    /// first access.
    pub fn from_user_configs<I>(user_configs: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let user_configs: HashMap<String, Arc<Value>> = user_configs
            .into_iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, config)| (name, Arc::new(config)))
            .collect();

        debug!("Seeded store with {} user configs", user_configs.len());

        Self {
            default_config: Arc::new(default_config_tree()),
            maps: RwLock::new(ConfigMaps {
                user_configs,
                merged_configs: HashMap::new(),
            }),
        }
    }

    /// The process-wide store used when no store is given explicitly
    pub fn shared() -> Arc<ConfigStore> {
        Arc::clone(&SHARED_STORE)
    }

    fn read_maps(&self) -> RwLockReadGuard<'_, ConfigMaps> {
        self.maps.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_maps(&self) -> RwLockWriteGuard<'_, ConfigMaps> {
        self.maps.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn default_config(&self) -> Arc<Value> {
        Arc::clone(&self.default_config)
    }

    /// Names of all registered user configs, sorted
    pub fn user_config_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read_maps().user_configs.keys().cloned().collect();
        names.sort();
        names
    }

    /// Copy of the user config mapping
    pub fn user_configs(&self) -> HashMap<String, Value> {
        self.read_maps()
            .user_configs
            .iter()
            .map(|(name, config)| (name.clone(), config.as_ref().clone()))
            .collect()
    }

    /// Copy of the merged config mapping, as computed so far
    pub fn merged_configs(&self) -> HashMap<String, Value> {
        self.read_maps()
            .merged_configs
            .iter()
            .map(|(name, config)| (name.clone(), config.as_ref().clone()))
            .collect()
    }

    pub fn get_user_config_by_name(&self, name: &str) -> Option<Arc<Value>> {
        self.read_maps().user_configs.get(name).cloned()
    }

    /// Get the merged config for `name`.
    ///
    /// When a user config exists but has not been merged yet, the merge runs
    /// now and its result is stored.
    pub fn get_merged_config_by_name(&self, name: &str) -> Option<Arc<Value>> {
        let user_config = {
            let maps = self.read_maps();
            if let Some(merged) = maps.merged_configs.get(name) {
                return Some(Arc::clone(merged));
            }
            Arc::clone(maps.user_configs.get(name)?)
        };

        debug!("Merging config '{}' on first access", name);
        let merged = match merge_configs(&self.default_config, &user_config) {
            Ok(merged) => Arc::new(merged),
            Err(e) => {
                warn!("Failed to merge config '{}': {}", name, e);
                return None;
            }
        };

        let mut maps = self.write_maps();
        // The user entry may have been replaced while unlocked
        let unchanged = maps
            .user_configs
            .get(name)
            .is_some_and(|current| Arc::ptr_eq(current, &user_config));

        if unchanged {
            let entry = maps
                .merged_configs
                .entry(name.to_string())
                .or_insert(merged);
            Some(Arc::clone(entry))
        } else {
            maps.merged_configs.get(name).cloned()
        }
    }

    /// Set the user config for `name` and regenerate its merged config.
    pub fn set_user_config(&self, name: &str, config: impl Into<Value>) -> Result<()> {
        self.set_user_configs(vec![(name.to_string(), config.into())])
    }

    /// Set several user configs at once.
    ///
    /// Every name is checked and every merge computed before anything is
    /// stored; either all entries land or none do.
    pub fn set_user_configs(&self, configs: Vec<(String, Value)>) -> Result<()> {
        let mut staged = Vec::with_capacity(configs.len());

        for (name, config) in configs {
            check_name(&name)?;
            let merged = merge_configs(&self.default_config, &config)?;
            staged.push((name, Arc::new(config), Arc::new(merged)));
        }

        let mut maps = self.write_maps();
        for (name, config, merged) in staged {
            if maps.user_configs.contains_key(&name) {
                info!("Replacing config '{}'", name);
            } else {
                info!("Registering config '{}'", name);
            }
            maps.user_configs.insert(name.clone(), config);
            maps.merged_configs.insert(name, merged);
        }

        Ok(())
    }

    /// Get the `user` or `merged` config registered under `name`.
    pub fn get_config_by_name(
        &self,
        name: &str,
        config_type: ConfigType,
    ) -> Result<Option<Arc<Value>>> {
        if name.is_empty() {
            let options: Vec<String> = self
                .user_config_names()
                .iter()
                .map(|n| format!("'{}'", n))
                .collect();

            return Err(ConfigError::InvalidArgument(format!(
                "'name' must be a non-empty string. Options are: {}",
                options.join(", ")
            )));
        }

        match config_type {
            ConfigType::User => Ok(self.get_user_config_by_name(name)),
            ConfigType::Merged => Ok(self.get_merged_config_by_name(name)),
            ConfigType::Default => Err(ConfigError::ConfigType(
                "'configType' must be 'merged' or 'user'".to_string(),
            )),
        }
    }

    fn select_config(&self, name: Option<&str>, config_type: ConfigType) -> Option<Arc<Value>> {
        match name.filter(|n| !n.is_empty()) {
            None => Some(self.default_config()),
            Some(name) => match config_type {
                ConfigType::User => self.get_user_config_by_name(name),
                // Naming a config means its resolved value, not the global default
                ConfigType::Merged | ConfigType::Default => self.get_merged_config_by_name(name),
            },
        }
    }

    /// Get a copy of the value at `path`.
    ///
    /// Without a (non-empty) name the default config is read whatever
    /// `config_type` says. With a name, `Default` is read as `Merged`.
    /// Unknown names and paths resolve to `None`.
    pub fn get_config_for_path(
        &self,
        path: &str,
        name: Option<&str>,
        config_type: ConfigType,
    ) -> Option<Value> {
        let config = self.select_config(name, config_type)?;
        resolve_path(&config, path).cloned()
    }

    /// Whether `plugin` is registered in the selected config.
    ///
    /// Unknown plugins are never registered.
    pub fn plugin_is_registered(
        &self,
        plugin: impl AsRef<str>,
        name: Option<&str>,
        config_type: ConfigType,
    ) -> bool {
        let config = match self.select_config(name, config_type) {
            Some(config) => config,
            None => return false,
        };
        let path = format!("plugins.{}", plugin.as_ref());
        is_registered(resolve_path(&config, &path))
    }
}

pub(crate) fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ConfigError::InvalidArgument(
            "'name' cannot be an empty string".to_string(),
        ));
    }
    Ok(())
}
