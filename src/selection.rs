//! Engine, model and temperature resolution over a loaded catalogue.
//!
//! Resolves which engine and model to use, and at which temperature, from
//! caller choices and the catalogue defaults. Priority: explicit choice >
//! catalogue default.

use tracing::{debug, warn};

use crate::config::{EnginesConfig, Model};
use crate::constants::DEFAULT_PRESETS;
use crate::error::SelectionError;

/// How the caller wants the sampling temperature chosen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TemperatureChoice {
    /// Use the model's own default `temperature`.
    #[default]
    ModelDefault,
    /// Use a named preset from `temperature_settings`.
    Preset(String),
    /// Use this exact value (clamped to the model's maximum).
    Explicit(f64),
}

/// What the caller asked for. `None` means "use the catalogue default".
#[derive(Debug, Clone, Default)]
pub struct SelectionRequest {
    pub engine: Option<String>,
    pub model: Option<String>,
    pub temperature: TemperatureChoice,
    /// Output token limit; capped at the model's `max_tokens`.
    pub max_tokens: Option<u64>,
}

/// Resolved engine + model + temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub engine: String,
    pub api_key_name: String,
    pub model: Model,
    /// Effective temperature after preset lookup and clamping.
    pub temperature: f64,
    /// Set when the requested temperature exceeded the model maximum.
    pub clamped_from: Option<f64>,
    /// Effective output token limit.
    pub max_tokens: u64,
    /// Set when the requested `max_tokens` exceeded the model's limit.
    pub max_tokens_capped_from: Option<u64>,
}

impl Selection {
    /// Reads the engine's credential from the environment.
    ///
    /// Empty values are treated as absent.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_name)
            .ok()
            .filter(|val| !val.is_empty())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }
}

/// Resolve which engine, model, temperature and output limit to use.
///
/// Accepts these combinations:
///   engine + model        (both must exist)
///   engine only           (engine's `default_model`)
///   model only            (looked up in the default engine)
///   nothing               (catalogue `default` and its `default_model`)
pub fn select(
    config: &EnginesConfig,
    request: &SelectionRequest,
) -> Result<Selection, SelectionError> {
    let engine_name = request.engine.as_deref().unwrap_or(&config.default);
    let engine = config
        .engine(engine_name)
        .ok_or_else(|| SelectionError::UnknownEngine {
            name: engine_name.to_string(),
            available: config.engine_names().into_iter().map(String::from).collect(),
        })?;

    let model_name = request.model.as_deref().unwrap_or(&engine.default_model);
    let model = engine
        .model(model_name)
        .ok_or_else(|| SelectionError::UnknownModel {
            engine: engine.name.clone(),
            name: model_name.to_string(),
            available: engine.model_names().into_iter().map(String::from).collect(),
        })?;

    let requested = match &request.temperature {
        TemperatureChoice::ModelDefault => model.temperature,
        TemperatureChoice::Preset(label) => preset_value(config, label)?,
        TemperatureChoice::Explicit(value) => *value,
    };
    if requested.is_nan() || requested < 0.0 {
        return Err(SelectionError::InvalidTemperature(requested));
    }

    let (temperature, clamped_from) = if requested > model.max_temperature {
        warn!(
            "temperature {} exceeds the maximum {} of {}; clamping",
            requested, model.max_temperature, model.name
        );
        (model.max_temperature, Some(requested))
    } else {
        (requested, None)
    };

    let (max_tokens, max_tokens_capped_from) = match request.max_tokens {
        None => (model.max_tokens, None),
        Some(0) => return Err(SelectionError::ZeroMaxTokens),
        Some(n) if n > model.max_tokens => {
            warn!(
                "max_tokens {} exceeds the limit {} of {}; capping",
                n, model.max_tokens, model.name
            );
            (model.max_tokens, Some(n))
        }
        Some(n) => (n, None),
    };

    debug!(
        engine = %engine.name,
        model = %model.name,
        temperature,
        max_tokens,
        "selection resolved"
    );

    Ok(Selection {
        engine: engine.name.clone(),
        api_key_name: engine.api_key_name.clone(),
        model: model.clone(),
        temperature,
        clamped_from,
        max_tokens,
        max_tokens_capped_from,
    })
}

/// Preset value from the catalogue, falling back to the built-in
/// `precise`/`balanced`/`creative` values when the catalogue omits one.
pub fn preset_value(config: &EnginesConfig, label: &str) -> Result<f64, SelectionError> {
    if let Some(value) = config.temperature_preset(label) {
        return Ok(value);
    }
    let fallback = DEFAULT_PRESETS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, value)| *value)
        .ok_or_else(|| SelectionError::UnknownPreset(label.to_string()))?;
    warn!("preset '{}' not in catalogue, using built-in {}", label, fallback);
    Ok(fallback)
}

/// All presets the caller can choose from: catalogue entries plus any
/// built-in ones the catalogue does not override, sorted by value.
pub fn presets(config: &EnginesConfig) -> Vec<(String, f64)> {
    let mut all: Vec<(String, f64)> = config
        .temperature_settings
        .iter()
        .map(|(label, value)| (label.clone(), *value))
        .collect();
    for (label, value) in DEFAULT_PRESETS {
        if !config.temperature_settings.contains_key(*label) {
            all.push((label.to_string(), *value));
        }
    }
    all.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    all
}
