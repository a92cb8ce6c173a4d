//! `key=value` overrides applied on top of the merged document.
//!
//! The key is a dotted path (`redpanda.node_id`, `rpk.kafka_api.tls.cert_file`,
//! `redpanda.kafka_api.0.port`). The value is parsed as YAML so `3`, `true`,
//! `[a, b]` and `{address: x, port: 1}` keep their types; text that is not
//! valid YAML is taken as a plain string and an empty value is `""`.

use std::fmt;
use std::str::FromStr;

use serde_yaml::Value;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources, forget_below, get_nested, record_all_leaves, set_nested};

/// A single parsed override.
#[derive(Debug, Clone, PartialEq)]
pub struct Override {
    key: String,
    value: Value,
    raw: String,
}

impl Override {
    /// Parse `key=value`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if there is no `=`, the key
    /// is empty, or the key has an empty segment.
    pub fn parse(raw: &str) -> ConfigResult<Self> {
        let invalid = |message: &str| ConfigError::InvalidOverride {
            raw: raw.to_owned(),
            message: message.to_owned(),
        };

        let (key, value) = raw.split_once('=').ok_or_else(|| invalid("expected key=value"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(invalid("key is empty"));
        }
        if key.split('.').any(str::is_empty) {
            return Err(invalid("key has an empty path segment"));
        }

        Ok(Self {
            key: key.to_owned(),
            value: parse_value(value),
            raw: raw.to_owned(),
        })
    }

    /// Dotted key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Parsed value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Write the value into `tree`, recording the override layer for every
    /// leaf it sets.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if the path crosses a scalar
    /// or indexes outside a list.
    pub fn apply(&self, tree: &mut Value, sources: &mut FieldSources) -> ConfigResult<()> {
        let segments: Vec<&str> = self.key.split('.').collect();
        set_nested(tree, &segments, self.value.clone()).map_err(|message| {
            ConfigError::InvalidOverride {
                raw: self.raw.clone(),
                message,
            }
        })?;

        // Sequences are tracked as a whole; an edit inside one marks the list.
        let tracked = (0..segments.len())
            .find(|&depth| {
                segments
                    .get(..depth)
                    .and_then(|prefix| get_nested(tree, prefix))
                    .is_some_and(Value::is_sequence)
            })
            .and_then(|depth| segments.get(..depth))
            .map_or_else(|| self.key.clone(), |prefix| prefix.join("."));

        forget_below(&tracked, sources);
        if tracked == self.key {
            record_all_leaves(&self.value, &tracked, ConfigLayer::Override, sources);
        } else {
            sources.insert(tracked, ConfigLayer::Override);
        }
        debug!(key = %self.key, "applied override");
        Ok(())
    }
}

impl FromStr for Override {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    serde_yaml::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}
