//! Structural walk over the parsed YAML document.
//!
//! Turns a `serde_yaml::Value` tree into typed structs, reporting missing or
//! mistyped fields with the entity they belong to. Referential and range
//! checks that need the whole catalogue happen afterwards in `validate`.

use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

use super::types::{Engine, EnginesConfig, Model};
use crate::error::{ConfigError, Result};

const ROOT: &str = "configuration";

/// Builds an unvalidated [`EnginesConfig`] from a YAML document tree.
pub(super) fn from_document(doc: &Value) -> Result<EnginesConfig> {
    let root = match doc {
        Value::Mapping(map) => map,
        Value::Null => return Err(ConfigError::missing(ROOT, "engines")),
        other => {
            return Err(ConfigError::schema(
                ROOT,
                "engines",
                format!("expected a mapping at the top level, found {}", kind_of(other)),
            ))
        }
    };

    let engines = require_sequence(root, ROOT, "engines")?
        .iter()
        .enumerate()
        .map(|(i, value)| engine_from(value, i))
        .collect::<Result<Vec<_>>>()?;

    let default = require_str(root, ROOT, "default")?;
    let temperature_settings = match root.get("temperature_settings") {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(value) => presets_from(value)?,
    };

    Ok(EnginesConfig {
        engines,
        default,
        temperature_settings,
    })
}

fn engine_from(value: &Value, index: usize) -> Result<Engine> {
    let positional = format!("engine #{}", index + 1);
    let map = as_mapping(value, ROOT, "engines")?;

    let name = require_str(map, &positional, "name")?;
    let entity = format!("engine '{name}'");

    let api_key_name = require_str(map, &entity, "api_key_name")?;
    let entries = require_sequence(map, &entity, "models")?;
    if entries.is_empty() {
        return Err(ConfigError::schema(
            entity,
            "models",
            "must contain at least one model",
        ));
    }
    let models = entries
        .iter()
        .enumerate()
        .map(|(i, value)| model_from(value, i, &name))
        .collect::<Result<Vec<_>>>()?;
    let default_model = require_str(map, &entity, "default_model")?;

    Ok(Engine {
        name,
        api_key_name,
        models,
        default_model,
    })
}

fn model_from(value: &Value, index: usize, engine: &str) -> Result<Model> {
    let positional = format!("model #{} of engine '{engine}'", index + 1);
    let map = as_mapping(value, &format!("engine '{engine}'"), "models")?;

    let name = require_str(map, &positional, "name")?;
    let entity = format!("model '{name}' of engine '{engine}'");

    Ok(Model {
        context_length: require_count(map, &entity, "context_length")?,
        max_tokens: require_count(map, &entity, "max_tokens")?,
        max_temperature: require_number(map, &entity, "max_temperature")?,
        temperature: require_number(map, &entity, "temperature")?,
        name,
    })
}

fn presets_from(value: &Value) -> Result<BTreeMap<String, f64>> {
    let map = match value {
        Value::Mapping(map) => map,
        other => {
            return Err(ConfigError::schema(
                ROOT,
                "temperature_settings",
                format!("must be a mapping of label to number, found {}", kind_of(other)),
            ))
        }
    };

    let mut presets = BTreeMap::new();
    for (key, value) in map {
        let label = key.as_str().ok_or_else(|| {
            ConfigError::schema(
                ROOT,
                "temperature_settings",
                format!("has a non-string label ({})", kind_of(key)),
            )
        })?;
        let number = value.as_f64().ok_or_else(|| {
            ConfigError::schema(
                "temperature_settings",
                label,
                format!("must be a number, found {}", kind_of(value)),
            )
        })?;
        presets.insert(label.to_string(), number);
    }
    Ok(presets)
}

/// Entries of `engines` and `models` must be mappings; anything else is
/// reported against the list that contains it.
fn as_mapping<'a>(value: &'a Value, entity: &str, list: &str) -> Result<&'a Mapping> {
    value.as_mapping().ok_or_else(|| {
        ConfigError::schema(
            entity,
            list,
            format!("entries must be mappings, found {}", kind_of(value)),
        )
    })
}

fn require<'a>(map: &'a Mapping, entity: &str, field: &str) -> Result<&'a Value> {
    match map.get(field) {
        None | Some(Value::Null) => Err(ConfigError::missing(entity, field)),
        Some(value) => Ok(value),
    }
}

fn require_str(map: &Mapping, entity: &str, field: &str) -> Result<String> {
    let value = require(map, entity, field)?;
    match value.as_str() {
        Some(s) if s.trim().is_empty() => {
            Err(ConfigError::schema(entity, field, "must not be empty"))
        }
        Some(s) => Ok(s.to_string()),
        None => Err(ConfigError::schema(
            entity,
            field,
            format!("must be a string, found {}", kind_of(value)),
        )),
    }
}

fn require_sequence<'a>(map: &'a Mapping, entity: &str, field: &str) -> Result<&'a Vec<Value>> {
    let value = require(map, entity, field)?;
    value.as_sequence().ok_or_else(|| {
        ConfigError::schema(
            entity,
            field,
            format!("must be a list, found {}", kind_of(value)),
        )
    })
}

/// Reads a non-negative integer. Negative integers are a range problem, not a
/// schema one, so they are reported as such.
fn require_count(map: &Mapping, entity: &str, field: &str) -> Result<u64> {
    let value = require(map, entity, field)?;
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    match value.as_i64() {
        Some(n) => Err(ConfigError::range(entity, field, n as f64, "> 0")),
        None => Err(ConfigError::schema(
            entity,
            field,
            format!("must be an integer, found {}", kind_of(value)),
        )),
    }
}

fn require_number(map: &Mapping, entity: &str, field: &str) -> Result<f64> {
    let value = require(map, entity, field)?;
    value.as_f64().ok_or_else(|| {
        ConfigError::schema(
            entity,
            field,
            format!("must be a number, found {}", kind_of(value)),
        )
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(_) => "an integer",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_empty_document_reports_missing_engines() {
        let err = from_document(&Value::Null).unwrap_err();
        match err {
            ConfigError::Schema { entity, field, .. } => {
                assert_eq!(entity, "configuration");
                assert_eq!(field, "engines");
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_engine_without_name_is_labelled_by_position() {
        let err = from_document(&doc(
            "engines:\n  - api_key_name: KEY\n    models: []\n    default_model: m\ndefault: x\n",
        ))
        .unwrap_err();
        match err {
            ConfigError::Schema { entity, field, .. } => {
                assert_eq!(entity, "engine #1");
                assert_eq!(field, "name");
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_string_where_integer_expected() {
        let err = from_document(&doc(
            r#"
engines:
  - name: e
    api_key_name: KEY
    models:
      - name: m
        context_length: "lots"
        max_tokens: 10
        max_temperature: 1.0
        temperature: 0.5
    default_model: m
default: e
"#,
        ))
        .unwrap_err();
        match err {
            ConfigError::Schema { entity, field, reason } => {
                assert_eq!(entity, "model 'm' of engine 'e'");
                assert_eq!(field, "context_length");
                assert!(reason.contains("a string"));
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_count_is_a_range_error() {
        let err = from_document(&doc(
            r#"
engines:
  - name: e
    api_key_name: KEY
    models:
      - name: m
        context_length: -1
        max_tokens: 10
        max_temperature: 1.0
        temperature: 0.5
    default_model: m
default: e
"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Range { ref field, .. } if field == "context_length"));
    }

    #[test]
    fn test_integer_temperatures_are_accepted() {
        let config = from_document(&doc(
            r#"
engines:
  - name: e
    api_key_name: KEY
    models:
      - name: m
        context_length: 10
        max_tokens: 10
        max_temperature: 2
        temperature: 1
    default_model: m
default: e
temperature_settings:
  precise: 0
"#,
        ))
        .unwrap();
        assert_eq!(config.engines[0].models[0].max_temperature, 2.0);
        assert_eq!(config.temperature_preset("precise"), Some(0.0));
    }

    #[test]
    fn test_missing_presets_default_to_empty() {
        let config = from_document(&doc(
            "engines:\n  - name: e\n    api_key_name: K\n    models:\n      - name: m\n        context_length: 1\n        max_tokens: 1\n        max_temperature: 1\n        temperature: 0\n    default_model: m\ndefault: e\n",
        ))
        .unwrap();
        assert!(config.temperature_settings.is_empty());
    }
}
