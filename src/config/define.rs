//! Registering named configurations
//!
//! `define_config` is the call-site API for handing configurations to a
//! store. Input is validated as a whole before any of it is applied.

use crate::config::schema::EditorConfigSchema;
use crate::config::store::ConfigStore;
use crate::types::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Keys every named config object must carry
pub const NAMED_CONFIG_REQUIRED_KEYS: &[&str] = &["name", "config"];

const INVALID_CONFIGURATION: &str = "Invalid configuration passed to defineConfig";

/// A configuration with a name to be mapped to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedConfig {
    /// Cannot be an empty string
    pub name: String,
    pub config: Value,
}

impl NamedConfig {
    pub fn new(name: impl Into<String>, config: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            config: config.into(),
        }
    }

    pub fn from_schema(name: impl Into<String>, config: &EditorConfigSchema) -> Self {
        Self::new(name, config.to_value())
    }
}

impl From<NamedConfig> for Vec<NamedConfig> {
    fn from(config: NamedConfig) -> Self {
        vec![config]
    }
}

/// Define one or more named configurations on `store`.
///
/// With no store, the shared store is used. Fails without touching the store
/// if the batch is empty or any name is empty.
pub fn define_config(configs: impl Into<Vec<NamedConfig>>, store: Option<&ConfigStore>) -> Result<()> {
    let configs = configs.into();

    if configs.is_empty() || configs.iter().any(|c| c.name.is_empty()) {
        return Err(ConfigError::Validation(INVALID_CONFIGURATION.to_string()));
    }

    let entries: Vec<(String, Value)> = configs.into_iter().map(|c| (c.name, c.config)).collect();
    debug!("Defining {} config(s)", entries.len());

    match store {
        Some(store) => store.set_user_configs(entries),
        None => ConfigStore::shared().set_user_configs(entries),
    }
}

/// Define configurations from untyped input.
///
/// Accepts a single `{ name, config }` object or a non-empty array of them.
pub fn define_config_value(input: &Value, store: Option<&ConfigStore>) -> Result<()> {
    let configs = parse_named_configs(input)
        .ok_or_else(|| ConfigError::Validation(INVALID_CONFIGURATION.to_string()))?;
    define_config(configs, store)
}

fn parse_named_configs(input: &Value) -> Option<Vec<NamedConfig>> {
    match input {
        Value::Array(items) if !items.is_empty() => items.iter().map(parse_named_config).collect(),
        Value::Object(_) => parse_named_config(input).map(|c| vec![c]),
        _ => None,
    }
}

fn parse_named_config(item: &Value) -> Option<NamedConfig> {
    let map = item.as_object()?;
    if NAMED_CONFIG_REQUIRED_KEYS.iter().any(|key| !map.contains_key(*key)) {
        return None;
    }

    Some(NamedConfig {
        name: map.get("name")?.as_str()?.to_string(),
        config: map.get("config")?.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ConfigType, Plugin, PluginSetting, PluginsConfig};
    use serde_json::json;

    #[test]
    fn test_define_single() {
        let store = ConfigStore::new();
        define_config(
            NamedConfig::new("comment", json!({ "plugins": { "toolbar": false } })),
            Some(&store),
        )
        .unwrap();

        assert_eq!(store.user_config_names(), vec!["comment".to_string()]);
        assert!(!store.plugin_is_registered(Plugin::Toolbar, Some("comment"), ConfigType::Merged));
    }

    #[test]
    fn test_define_from_schema() {
        let store = ConfigStore::new();
        let schema = EditorConfigSchema {
            plugins: Some(PluginsConfig {
                floating_menu: Some(PluginSetting::Enabled(true)),
                ..Default::default()
            }),
        };
        define_config(NamedConfig::from_schema("menu", &schema), Some(&store)).unwrap();

        assert!(store.plugin_is_registered(Plugin::FloatingMenu, Some("menu"), ConfigType::Merged));
    }

    #[test]
    fn test_empty_batch_is_invalid() {
        let store = ConfigStore::new();
        let err = define_config(Vec::<NamedConfig>::new(), Some(&store)).unwrap_err();
        assert_eq!(err.to_string(), INVALID_CONFIGURATION);
    }

    #[test]
    fn test_empty_name_rejects_whole_batch() {
        let store = ConfigStore::new();
        let result = define_config(
            vec![NamedConfig::new("a", json!({})), NamedConfig::new("", json!({}))],
            Some(&store),
        );

        assert!(matches!(result, Err(ConfigError::Validation(_))));
        assert!(store.user_config_names().is_empty());
    }

    #[test]
    fn test_value_missing_config_rejects_batch() {
        let store = ConfigStore::new();
        let input = json!([
            { "name": "a", "config": { "plugins": { "html": true } } },
            { "name": "b" }
        ]);

        let err = define_config_value(&input, Some(&store)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(store.get_user_config_by_name("a").is_none());
        assert!(store.get_user_config_by_name("b").is_none());
    }

    #[test]
    fn test_value_shapes() {
        let store = ConfigStore::new();

        assert!(define_config_value(&json!([]), Some(&store)).is_err());
        assert!(define_config_value(&json!("a"), Some(&store)).is_err());
        assert!(define_config_value(&json!({ "name": 1, "config": {} }), Some(&store)).is_err());
        assert!(define_config_value(&json!([{ "name": "a", "config": {} }, 3]), Some(&store)).is_err());
        assert!(store.user_config_names().is_empty());

        define_config_value(&json!({ "name": "single", "config": {} }), Some(&store)).unwrap();
        assert_eq!(store.user_config_names(), vec!["single".to_string()]);
    }
}
