//! Configuration vocabulary
//!
//! Plugin names, action identifiers and the typed shape of an editor
//! configuration. The identifier lists are ordered: toolbars render actions
//! in this order, membership checks ignore it.

use crate::types::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Key allowed to hold a boolean in a default configuration tree.
pub const REGISTER_KEY: &str = "register";

/// Keys that may be booleans in the default configuration.
pub const BOOLEAN_KEYS_IN_DEFAULT_CONFIG: &[&str] = &[REGISTER_KEY];

/// Text formatting actions a plugin can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAction {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Highlight,
    Superscript,
    Subscript,
}

impl TextAction {
    pub const ALL: [TextAction; 8] = [
        TextAction::Bold,
        TextAction::Italic,
        TextAction::Underline,
        TextAction::Strikethrough,
        TextAction::Code,
        TextAction::Highlight,
        TextAction::Superscript,
        TextAction::Subscript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextAction::Bold => "bold",
            TextAction::Italic => "italic",
            TextAction::Underline => "underline",
            TextAction::Strikethrough => "strikethrough",
            TextAction::Code => "code",
            TextAction::Highlight => "highlight",
            TextAction::Superscript => "superscript",
            TextAction::Subscript => "subscript",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Undo,
    Redo,
}

impl HistoryAction {
    pub const ALL: [HistoryAction; 2] = [HistoryAction::Undo, HistoryAction::Redo];

    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Undo => "undo",
            HistoryAction::Redo => "redo",
        }
    }
}

/// Block types offered by the block type dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Paragraph,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Quote,
    Bullet,
    Number,
}

impl BlockType {
    pub const ALL: [BlockType; 10] = [
        BlockType::Paragraph,
        BlockType::H1,
        BlockType::H2,
        BlockType::H3,
        BlockType::H4,
        BlockType::H5,
        BlockType::H6,
        BlockType::Quote,
        BlockType::Bullet,
        BlockType::Number,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::H1 => "h1",
            BlockType::H2 => "h2",
            BlockType::H3 => "h3",
            BlockType::H4 => "h4",
            BlockType::H5 => "h5",
            BlockType::H6 => "h6",
            BlockType::Quote => "quote",
            BlockType::Bullet => "bullet",
            BlockType::Number => "number",
        }
    }

    /// Label shown in the block type dropdown
    pub fn label(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "Normal",
            BlockType::H1 => "Heading 1",
            BlockType::H2 => "Heading 2",
            BlockType::H3 => "Heading 3",
            BlockType::H4 => "Heading 4",
            BlockType::H5 => "Heading 5",
            BlockType::H6 => "Heading 6",
            BlockType::Quote => "Quote",
            BlockType::Bullet => "Bulleted List",
            BlockType::Number => "Numbered List",
        }
    }
}

/// Plugins whose registration is driven by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Plugin {
    Toolbar,
    FloatingMenu,
    Html,
}

impl Plugin {
    pub const ALL: [Plugin; 3] = [Plugin::Toolbar, Plugin::FloatingMenu, Plugin::Html];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plugin::Toolbar => "toolbar",
            Plugin::FloatingMenu => "floatingMenu",
            Plugin::Html => "html",
        }
    }

    /// Whether the plugin carries action lists besides `register`
    pub fn has_actions(&self) -> bool {
        !matches!(self, Plugin::Html)
    }
}

impl AsRef<str> for Plugin {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plugin {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plugin::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidArgument(format!("unknown plugin '{}'", s)))
    }
}

/// Full form of a plugin entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// Whether to mount the plugin at all
    pub register: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_actions: Option<Vec<TextAction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_actions: Option<Vec<HistoryAction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_types: Option<Vec<BlockType>>,
}

impl PluginConfig {
    pub fn registered(register: bool) -> Self {
        Self {
            register,
            text_actions: None,
            history_actions: None,
            block_types: None,
        }
    }
}

/// A plugin entry is either a boolean shorthand or a full object.
///
/// `true` means "registered with all defaults", `false` means "not registered".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginSetting {
    Enabled(bool),
    Config(PluginConfig),
}

impl From<bool> for PluginSetting {
    fn from(enabled: bool) -> Self {
        PluginSetting::Enabled(enabled)
    }
}

impl From<PluginConfig> for PluginSetting {
    fn from(config: PluginConfig) -> Self {
        PluginSetting::Config(config)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolbar: Option<PluginSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_menu: Option<PluginSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<PluginSetting>,
}

/// Complete schema of an editor configuration.
///
/// Every field is optional so the same type describes partial user
/// configurations and the fully populated default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfigSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<PluginsConfig>,
}

impl EditorConfigSchema {
    /// Convert into the tree form used by the merge engine and the store
    pub fn to_value(&self) -> Value {
        // Plain structs of strings, bools and vectors always serialize
        serde_json::to_value(self).unwrap_or(Value::Object(Default::default()))
    }
}

impl From<EditorConfigSchema> for Value {
    fn from(config: EditorConfigSchema) -> Self {
        config.to_value()
    }
}

/// Which tree a lookup reads from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConfigType {
    #[default]
    Default,
    User,
    Merged,
}

impl ConfigType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigType::Default => "default",
            ConfigType::User => "user",
            ConfigType::Merged => "merged",
        }
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ConfigType::Default),
            "user" => Ok(ConfigType::User),
            "merged" => Ok(ConfigType::Merged),
            other => Err(ConfigError::ConfigType(format!(
                "'configType' must be 'default', 'merged' or 'user', got '{}'",
                other
            ))),
        }
    }
}

/// Paths into a configuration tree that UI collaborators read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigPath {
    Root,
    Plugins,
    Plugin(Plugin),
    Register(Plugin),
    TextActions(Plugin),
    HistoryActions(Plugin),
    BlockTypes(Plugin),
}

impl ConfigPath {
    /// Every recognized path, in a stable order
    pub fn all() -> Vec<ConfigPath> {
        let mut paths = vec![ConfigPath::Root, ConfigPath::Plugins];
        for plugin in Plugin::ALL {
            paths.push(ConfigPath::Plugin(plugin));
            paths.push(ConfigPath::Register(plugin));
            if plugin.has_actions() {
                paths.push(ConfigPath::TextActions(plugin));
                paths.push(ConfigPath::HistoryActions(plugin));
                paths.push(ConfigPath::BlockTypes(plugin));
            }
        }
        paths
    }

    pub fn to_path_string(&self) -> String {
        match self {
            ConfigPath::Root => String::new(),
            ConfigPath::Plugins => "plugins".to_string(),
            ConfigPath::Plugin(p) => format!("plugins.{}", p),
            ConfigPath::Register(p) => format!("plugins.{}.register", p),
            ConfigPath::TextActions(p) => format!("plugins.{}.textActions", p),
            ConfigPath::HistoryActions(p) => format!("plugins.{}.historyActions", p),
            ConfigPath::BlockTypes(p) => format!("plugins.{}.blockTypes", p),
        }
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path_string())
    }
}

impl FromStr for ConfigPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigPath::all()
            .into_iter()
            .find(|p| p.to_path_string() == s)
            .ok_or_else(|| ConfigError::InvalidArgument(format!("unrecognized config path '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identifiers_serialize_as_strings() {
        assert_eq!(serde_json::to_value(TextAction::Strikethrough).unwrap(), json!("strikethrough"));
        assert_eq!(serde_json::to_value(BlockType::H3).unwrap(), json!("h3"));
        assert_eq!(serde_json::to_value(Plugin::FloatingMenu).unwrap(), json!("floatingMenu"));

        for action in TextAction::ALL {
            assert_eq!(serde_json::to_value(action).unwrap(), json!(action.as_str()));
        }
    }

    #[test]
    fn test_plugin_setting_shorthand() {
        let config: EditorConfigSchema = serde_json::from_value(json!({
            "plugins": {
                "toolbar": true,
                "floatingMenu": { "register": false, "textActions": ["bold"] }
            }
        }))
        .unwrap();

        let plugins = config.plugins.unwrap();
        assert_eq!(plugins.toolbar, Some(PluginSetting::Enabled(true)));
        assert_eq!(
            plugins.floating_menu,
            Some(PluginSetting::Config(PluginConfig {
                register: false,
                text_actions: Some(vec![TextAction::Bold]),
                history_actions: None,
                block_types: None,
            }))
        );
        assert!(plugins.html.is_none());
    }

    #[test]
    fn test_to_value_omits_unset_fields() {
        let config = EditorConfigSchema {
            plugins: Some(PluginsConfig {
                html: Some(PluginSetting::Enabled(false)),
                ..Default::default()
            }),
        };
        assert_eq!(config.to_value(), json!({ "plugins": { "html": false } }));
    }

    #[test]
    fn test_config_type_parse() {
        assert_eq!("merged".parse::<ConfigType>().unwrap(), ConfigType::Merged);
        assert_eq!(ConfigType::default(), ConfigType::Default);

        let err = "_invalid_config_type_".parse::<ConfigType>().unwrap_err();
        assert!(matches!(err, ConfigError::ConfigType(_)));
    }

    #[test]
    fn test_config_paths() {
        let paths: Vec<String> = ConfigPath::all().iter().map(|p| p.to_path_string()).collect();
        assert_eq!(paths.len(), 14);
        assert!(paths.contains(&"".to_string()));
        assert!(paths.contains(&"plugins.floatingMenu.blockTypes".to_string()));
        assert!(paths.contains(&"plugins.html.register".to_string()));
        assert!(!paths.contains(&"plugins.html.textActions".to_string()));

        assert_eq!(
            "plugins.toolbar.textActions".parse::<ConfigPath>().unwrap(),
            ConfigPath::TextActions(Plugin::Toolbar)
        );
        assert!("plugins-toolbar".parse::<ConfigPath>().is_err());
    }

    #[test]
    fn test_block_labels() {
        assert_eq!(BlockType::Paragraph.label(), "Normal");
        assert_eq!(BlockType::Bullet.label(), "Bulleted List");
    }
}
