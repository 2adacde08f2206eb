//! Stored configuration documents.
//!
//! Storage backends are loose about types: ids may come back as integers,
//! empty mappings as `[]`, flags as `0`/`"1"`. Decoding here absorbs those
//! variations so the resolver only sees one shape.

use jobdef_core::{ConfigVersion, Document};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{ConfigError, ConfigResult};

/// A configuration as kept by configuration storage: a base configuration and optional rows.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredConfiguration {
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub version: Option<ConfigVersion>,
    #[serde(default, deserialize_with = "document")]
    pub state: Document,
    #[serde(default, deserialize_with = "document")]
    pub configuration: Document,
    #[serde(default, deserialize_with = "rows")]
    pub rows: Vec<ConfigurationRow>,
}

/// A named overlay within a stored configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationRow {
    #[serde(deserialize_with = "id")]
    pub id: String,
    #[serde(default)]
    pub version: Option<ConfigVersion>,
    #[serde(default, deserialize_with = "flag")]
    pub is_disabled: bool,
    #[serde(default, deserialize_with = "document")]
    pub state: Document,
    #[serde(default, deserialize_with = "document")]
    pub configuration: Document,
}

impl StoredConfiguration {
    /// Decode a raw document as returned by configuration storage.
    pub fn from_document(raw: Document) -> ConfigResult<Self> {
        Ok(serde_json::from_value(Value::Object(raw))?)
    }

    /// Whether the base configuration declares any `before` or `after` processors.
    pub fn has_processors(&self) -> ConfigResult<bool> {
        has_processors(&self.configuration, "configuration.processors")
    }

    /// Whether any row, disabled ones included, declares processors.
    pub fn has_row_processors(&self) -> ConfigResult<bool> {
        for row in &self.rows {
            let field = format!("rows[{}].configuration.processors", row.id);
            if has_processors(&row.configuration, &field)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Check `processors.before` / `processors.after` of a configuration body for entries.
pub(crate) fn has_processors(configuration: &Document, field: &str) -> ConfigResult<bool> {
    let processors = match configuration.get("processors") {
        None | Some(Value::Null) => return Ok(false),
        Some(Value::Array(items)) if items.is_empty() => return Ok(false),
        Some(Value::Object(processors)) => processors,
        Some(other) => {
            return Err(ConfigError::invalid(
                field,
                format!("expected a mapping, got {}", kind(other)),
            ));
        }
    };

    for stage in ["before", "after"] {
        match processors.get(stage) {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                if !items.is_empty() {
                    return Ok(true);
                }
            }
            Some(other) => {
                return Err(ConfigError::invalid(
                    format!("{field}.{stage}"),
                    format!("expected a sequence, got {}", kind(other)),
                ));
            }
        }
    }
    Ok(false)
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

// Field decoders

fn document<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Document, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Document::new()),
        Value::Array(items) if items.is_empty() => Ok(Document::new()),
        Value::Object(map) => Ok(map),
        other => Err(serde::de::Error::custom(format!(
            "expected a mapping, got {}",
            kind(&other)
        ))),
    }
}

fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or integer id, got {}",
            kind(&other)
        ))),
    }
}

fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or integer id, got {}",
            kind(&other)
        ))),
    }
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    })
}

fn rows<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ConfigurationRow>, D::Error> {
    Ok(Option::<Vec<ConfigurationRow>>::deserialize(deserializer)?.unwrap_or_default())
}
