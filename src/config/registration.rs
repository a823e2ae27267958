//! Plugin registration predicate

use crate::config::schema::REGISTER_KEY;
use serde_json::Value;

/// Decide whether a resolved plugin entry means "mount this plugin".
///
/// A missing entry is unregistered, a boolean entry is its own answer, and an
/// object entry answers with its `register` field.
pub fn is_registered(plugin_config: Option<&Value>) -> bool {
    match plugin_config {
        None => false,
        Some(Value::Bool(enabled)) => *enabled,
        Some(other) => other
            .get(REGISTER_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}
