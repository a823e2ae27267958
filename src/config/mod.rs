//! Configuration system for the editor plugins
//!
//! Resolves which plugins are mounted and which actions they expose by
//! layering named user configurations over a built-in default:
//! 1. Named user config (highest priority)
//! 2. Built-in default (lowest priority)

mod defaults;
mod define;
mod loader;
mod merge;
mod path;
mod registration;
mod schema;
mod store;

pub use defaults::{default_config_tree, get_default_config};
pub use define::{define_config, define_config_value, NamedConfig, NAMED_CONFIG_REQUIRED_KEYS};
pub use loader::ConfigLoader;
pub use merge::{merge_configs, unregistered, validate_default};
pub use path::resolve_path;
pub use registration::is_registered;
pub use schema::{
    BlockType, ConfigPath, ConfigType, EditorConfigSchema, HistoryAction, Plugin, PluginConfig,
    PluginSetting, PluginsConfig, TextAction, BOOLEAN_KEYS_IN_DEFAULT_CONFIG, REGISTER_KEY,
};
pub use store::ConfigStore;
