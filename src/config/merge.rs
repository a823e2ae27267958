//! Default/user configuration merge
//!
//! The default tree drives the merge: only keys it knows are ever looked at,
//! so the result never grows keys the default does not have.
//!
//! - Arrays: REPLACE (user wins entirely)
//! - Objects: recurse
//! - `true`: take the default subtree, forcing its `register` on
//! - `false`: drop the key, or collapse the enclosing object to
//!   `{ register: false }` when the key is `register`
//! - Other scalars: user wins

use crate::config::schema::{BOOLEAN_KEYS_IN_DEFAULT_CONFIG, REGISTER_KEY};
use crate::types::{ConfigError, Result};
use serde_json::{Map, Value};

/// Recursively merge a user configuration over a default configuration.
///
/// A `null` user value is treated like a missing one. Merging an object over
/// a non-object default yields an empty object, since there are no default
/// keys to drive it.
pub fn merge_configs(default: &Value, user: &Value) -> Result<Value> {
    let mut merged = Map::new();

    let Value::Object(default_map) = default else {
        return Ok(Value::Object(merged));
    };
    let user_map = user.as_object();

    for (key, default_value) in default_map {
        if default_value.is_boolean() && !BOOLEAN_KEYS_IN_DEFAULT_CONFIG.contains(&key.as_str()) {
            return Err(ConfigError::Schema { key: key.clone() });
        }

        let user_value = user_map
            .and_then(|m| m.get(key))
            .filter(|v| !v.is_null());

        match user_value {
            None => {
                merged.insert(key.clone(), carry_default(default_value));
            }
            Some(Value::Array(items)) => {
                merged.insert(key.clone(), Value::Array(items.clone()));
            }
            Some(overlay @ Value::Object(_)) => {
                merged.insert(key.clone(), merge_configs(default_value, overlay)?);
            }
            Some(Value::Bool(true)) => {
                let value = if key == REGISTER_KEY {
                    Value::Bool(true)
                } else {
                    enable_default(default_value)
                };
                merged.insert(key.clone(), value);
            }
            Some(Value::Bool(false)) => {
                if key == REGISTER_KEY {
                    // Siblings already merged are discarded
                    return Ok(unregistered());
                }
            }
            Some(other) => {
                merged.insert(key.clone(), other.clone());
            }
        }
    }

    Ok(Value::Object(merged))
}

/// Walk a whole default tree and reject booleans outside `register` keys.
///
/// `merge_configs` only checks the levels a user configuration reaches, so
/// a custom default is checked once up front.
pub fn validate_default(default: &Value) -> Result<()> {
    if let Value::Object(map) = default {
        for (key, value) in map {
            if value.is_boolean() && !BOOLEAN_KEYS_IN_DEFAULT_CONFIG.contains(&key.as_str()) {
                return Err(ConfigError::Schema { key: key.clone() });
            }
            validate_default(value)?;
        }
    }
    Ok(())
}

/// `{ "register": false }`
pub fn unregistered() -> Value {
    let mut map = Map::new();
    map.insert(REGISTER_KEY.to_string(), Value::Bool(false));
    Value::Object(map)
}

fn register_flag(value: &Value) -> Option<bool> {
    value.as_object()?.get(REGISTER_KEY)?.as_bool()
}

// An unregistered default carries none of its action lists forward.
fn carry_default(default_value: &Value) -> Value {
    if register_flag(default_value) == Some(false) {
        unregistered()
    } else {
        default_value.clone()
    }
}

fn enable_default(default_value: &Value) -> Value {
    let mut value = default_value.clone();
    if register_flag(&value) == Some(false) {
        if let Some(map) = value.as_object_mut() {
            map.insert(REGISTER_KEY.to_string(), Value::Bool(true));
        }
    }
    value
}
