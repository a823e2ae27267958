//! Built-in default editor configuration
//!
//! Every plugin is explicitly registered or unregistered here, so a merged
//! configuration never has a gap for a decision the UI needs to make.

use crate::config::schema::{
    BlockType, EditorConfigSchema, HistoryAction, PluginConfig, PluginSetting, PluginsConfig,
    TextAction,
};
use serde_json::Value;

pub fn get_default_config() -> EditorConfigSchema {
    EditorConfigSchema {
        plugins: Some(PluginsConfig {
            toolbar: Some(toolbar_config()),
            floating_menu: Some(floating_menu_config()),
            html: Some(html_config()),
        }),
    }
}

/// Default configuration in tree form
pub fn default_config_tree() -> Value {
    get_default_config().to_value()
}

fn toolbar_config() -> PluginSetting {
    PluginSetting::Config(PluginConfig {
        register: true,
        text_actions: Some(TextAction::ALL.to_vec()),
        history_actions: Some(HistoryAction::ALL.to_vec()),
        block_types: Some(BlockType::ALL.to_vec()),
    })
}

// Opt-in: `floatingMenu = true` in a user config restores these lists.
fn floating_menu_config() -> PluginSetting {
    PluginSetting::Config(PluginConfig {
        register: false,
        text_actions: Some(vec![
            TextAction::Bold,
            TextAction::Italic,
            TextAction::Underline,
            TextAction::Strikethrough,
            TextAction::Highlight,
        ]),
        history_actions: Some(vec![]),
        block_types: Some(vec![]),
    })
}

fn html_config() -> PluginSetting {
    PluginSetting::Config(PluginConfig::registered(true))
}
