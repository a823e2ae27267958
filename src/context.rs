//! Configuration context handed to UI collaborators
//!
//! Bundles the store with the config name and type a component tree reads,
//! so components only ever ask for paths and plugins.

use crate::config::{
    is_registered, BlockType, ConfigPath, ConfigStore, ConfigType, HistoryAction, Plugin,
    TextAction,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct ConfigContext {
    store: Arc<ConfigStore>,
    name: String,
    config_type: ConfigType,
}

impl Default for ConfigContext {
    /// Reads the default config of the shared store
    fn default() -> Self {
        Self::new(ConfigStore::shared())
    }
}

impl ConfigContext {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self {
            store,
            name: String::new(),
            config_type: ConfigType::Default,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_config_type(mut self, config_type: ConfigType) -> Self {
        self.config_type = config_type;
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_config_type(&mut self, config_type: ConfigType) {
        self.config_type = config_type;
    }

    pub fn set_store(&mut self, store: Arc<ConfigStore>) {
        self.store = store;
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config_type(&self) -> ConfigType {
        self.config_type
    }

    fn name_arg(&self) -> Option<&str> {
        Some(self.name.as_str()).filter(|n| !n.is_empty())
    }

    /// Value at a dotted path, e.g. `plugins.toolbar`
    pub fn use_config(&self, path: &str) -> Option<Value> {
        self.store
            .get_config_for_path(path, self.name_arg(), self.config_type)
    }

    pub fn use_config_path(&self, path: ConfigPath) -> Option<Value> {
        self.use_config(&path.to_path_string())
    }

    pub fn plugin_is_registered(&self, plugin: Plugin) -> bool {
        self.store
            .plugin_is_registered(plugin, self.name_arg(), self.config_type)
    }

    /// Typed view of one plugin's resolved configuration
    pub fn plugin_view(&self, plugin: Plugin) -> PluginView {
        let entry = self.use_config_path(ConfigPath::Plugin(plugin));
        PluginView::from_entry(plugin, entry.as_ref())
    }
}

/// What a plugin's UI needs: whether to mount, and which actions to show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginView {
    pub registered: bool,
    pub text_actions: Vec<TextAction>,
    pub history_actions: Vec<HistoryAction>,
    pub block_types: Vec<BlockType>,
}

impl PluginView {
    pub fn from_entry(plugin: Plugin, entry: Option<&Value>) -> Self {
        let list = |key: &str| entry.and_then(|e| e.get(key));

        Self {
            registered: is_registered(entry),
            text_actions: parse_actions(plugin, "textActions", list("textActions")),
            history_actions: parse_actions(plugin, "historyActions", list("historyActions")),
            block_types: parse_actions(plugin, "blockTypes", list("blockTypes")),
        }
    }
}

fn parse_actions<T: DeserializeOwned>(plugin: Plugin, key: &str, value: Option<&Value>) -> Vec<T> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(action) => Some(action),
            Err(_) => {
                warn!("Ignoring unknown entry {} in plugins.{}.{}", item, plugin, key);
                None
            }
        })
        .collect()
}
