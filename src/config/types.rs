//! Struct definitions for the validated engine catalogue.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of the engine catalogue, as read from `engines.yaml`.
///
/// Only produced by the loader after every invariant has been checked, so
/// holders can index into it without re-validating. Deserializing through
/// serde goes through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_yaml::Value")]
pub struct EnginesConfig {
    /// Providers in file order. Names are unique.
    pub engines: Vec<Engine>,
    /// Name of the engine used when the caller does not pick one.
    pub default: String,
    /// Named temperature presets (e.g. `precise`, `balanced`, `creative`).
    pub temperature_settings: BTreeMap<String, f64>,
}

/// One AI provider and the models it offers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Engine {
    /// Unique identifier (e.g. `"openai"`).
    pub name: String,
    /// Environment variable expected to hold this provider's credential.
    pub api_key_name: String,
    /// Selectable models in file order. Never empty.
    pub models: Vec<Model>,
    /// Name of the model used when the caller does not pick one.
    pub default_model: String,
}

/// One selectable model variant within an engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    /// Identifier passed to the provider, unique within its engine.
    pub name: String,
    /// Maximum input size in provider tokens.
    pub context_length: u64,
    /// Maximum output size in provider tokens.
    pub max_tokens: u64,
    /// Upper bound on sampling temperature.
    pub max_temperature: f64,
    /// Default sampling temperature, within `0..=max_temperature`.
    pub temperature: f64,
}

impl EnginesConfig {
    /// Looks up an engine by name.
    pub fn engine(&self, name: &str) -> Option<&Engine> {
        self.engines.iter().find(|e| e.name == name)
    }

    /// The engine named by `default`.
    ///
    /// Always present on a validated catalogue.
    pub fn default_engine(&self) -> Option<&Engine> {
        self.engine(&self.default)
    }

    /// Engine names in file order.
    pub fn engine_names(&self) -> Vec<&str> {
        self.engines.iter().map(|e| e.name.as_str()).collect()
    }

    /// Value of a named temperature preset, if the catalogue defines it.
    pub fn temperature_preset(&self, label: &str) -> Option<f64> {
        self.temperature_settings.get(label).copied()
    }
}

impl Engine {
    /// Looks up a model of this engine by name.
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// The model named by `default_model`.
    pub fn default_model(&self) -> Option<&Model> {
        self.model(&self.default_model)
    }

    /// Model names of this engine in file order.
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }
}
