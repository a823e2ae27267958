//! RTE Config - configuration resolution for the rich text editor
//!
//! This crate decides which editor plugins are mounted and which actions
//! they expose. Named user configurations are layered over a built-in
//! default, and UI collaborators read the result through dotted paths or
//! typed plugin views.

pub mod config;
pub mod context;
pub mod types;

pub use config::{define_config, ConfigLoader, ConfigStore, ConfigType, NamedConfig, Plugin};
pub use context::{ConfigContext, PluginView};
pub use types::ConfigError;
