//! Referential and range checks over a structurally complete catalogue.

use std::collections::HashSet;

use super::types::{Engine, EnginesConfig, Model};
use crate::constants::{PRESET_MAX, TEMPERATURE_MIN};
use crate::error::{ConfigError, Result};

impl EnginesConfig {
    /// Checks every invariant the schema walk cannot see on its own.
    ///
    /// Duplicate names are reported first, then dangling references, then
    /// numeric bounds, so the first error is the most structural one.
    pub(super) fn validate(&self) -> Result<()> {
        unique_names(
            "configuration",
            "engines",
            self.engines.iter().map(|e| e.name.as_str()),
        )?;
        for engine in &self.engines {
            let entity = format!("engine '{}'", engine.name);
            unique_names(&entity, "models", engine.models.iter().map(|m| m.name.as_str()))?;
        }

        for engine in &self.engines {
            check_default_model(engine)?;
        }
        if self.default_engine().is_none() {
            return Err(ConfigError::Reference {
                entity: "configuration".into(),
                field: "default".into(),
                kind: "engine",
                target: self.default.clone(),
            });
        }

        for engine in &self.engines {
            for model in &engine.models {
                check_model_ranges(&engine.name, model)?;
            }
        }
        for (label, value) in &self.temperature_settings {
            if !(TEMPERATURE_MIN..=PRESET_MAX).contains(value) {
                return Err(ConfigError::range(
                    "temperature_settings",
                    label,
                    *value,
                    format!("[{TEMPERATURE_MIN}, {PRESET_MAX}]"),
                ));
            }
        }
        Ok(())
    }
}

fn unique_names<'a>(
    entity: &str,
    list: &str,
    names: impl Iterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ConfigError::schema(
                entity,
                list,
                format!("contains duplicate name '{name}'"),
            ));
        }
    }
    Ok(())
}

fn check_default_model(engine: &Engine) -> Result<()> {
    if engine.default_model().is_some() {
        return Ok(());
    }
    Err(ConfigError::Reference {
        entity: format!("engine '{}'", engine.name),
        field: "default_model".into(),
        kind: "model",
        target: engine.default_model.clone(),
    })
}

fn check_model_ranges(engine: &str, model: &Model) -> Result<()> {
    let entity = format!("model '{}' of engine '{engine}'", model.name);

    if model.context_length == 0 {
        return Err(ConfigError::range(&entity, "context_length", 0.0, "> 0"));
    }
    if model.max_tokens == 0 {
        return Err(ConfigError::range(&entity, "max_tokens", 0.0, "> 0"));
    }
    if !model.max_temperature.is_finite() || model.max_temperature <= TEMPERATURE_MIN {
        return Err(ConfigError::range(
            &entity,
            "max_temperature",
            model.max_temperature,
            "> 0",
        ));
    }
    if !(TEMPERATURE_MIN..=model.max_temperature).contains(&model.temperature) {
        return Err(ConfigError::range(
            &entity,
            "temperature",
            model.temperature,
            format!("[{TEMPERATURE_MIN}, {}]", model.max_temperature),
        ));
    }
    Ok(())
}
