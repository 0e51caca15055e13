//! Reading, validating and re-serializing the engine catalogue.

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::schema;
use super::types::EnginesConfig;
use crate::constants::BUILTIN_CONFIG;
use crate::error::{ConfigError, Result};

impl TryFrom<serde_yaml::Value> for EnginesConfig {
    type Error = ConfigError;

    /// Structural walk plus reference and range checks over a parsed
    /// document. Also backs `Deserialize`, so serde cannot skip validation.
    fn try_from(doc: serde_yaml::Value) -> Result<Self> {
        let config = schema::from_document(&doc)?;
        config.validate()?;

        info!(
            engines = config.engines.len(),
            default = %config.default,
            "engine catalogue loaded"
        );
        Ok(config)
    }
}

impl EnginesConfig {
    /// Parses and validates catalogue text.
    ///
    /// Runs three stages in order: YAML parsing ([`ConfigError::Parse`]),
    /// the structural walk ([`ConfigError::Schema`]), then reference and
    /// range checks ([`ConfigError::Reference`], [`ConfigError::Range`]).
    /// Pure: reads nothing besides `text`.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let doc: serde_yaml::Value = serde_yaml::from_str(text)?;
        debug!("parsed catalogue document ({} bytes)", text.len());
        Self::try_from(doc)
    }

    /// Reads and validates the catalogue file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("reading engine catalogue from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// The catalogue bundled into the binary.
    ///
    /// Callers use this as the fallback when no file is found, or when they
    /// prefer to continue after a [`ConfigError`].
    pub fn builtin() -> Self {
        Self::from_yaml_str(BUILTIN_CONFIG).expect("bundled engines.yaml is valid")
    }

    /// Serializes back to the YAML shape the loader accepts.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Pretty JSON rendering, for tools that do not speak YAML.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue_defaults() {
        let config = EnginesConfig::builtin();
        assert_eq!(config.default, "google");
        let engine = config.default_engine().unwrap();
        let model = engine.default_model().unwrap();
        assert_eq!(model.name, "gemini-1.5-pro-latest");
        assert_eq!(model.context_length, 128_000);
    }

    #[test]
    fn test_round_trip_is_stable() {
        let config = EnginesConfig::builtin();
        let text = config.to_yaml_string().unwrap();
        let reloaded = EnginesConfig::from_yaml_str(&text).unwrap();
        assert_eq!(config, reloaded);
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let err = EnginesConfig::from_yaml_str("engines:\n  - name: [unclosed\n").unwrap_err();
        match err {
            ConfigError::Parse { line, .. } => assert!(line.is_some()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_serde_deserialize_runs_validation() {
        let res = serde_yaml::from_str::<EnginesConfig>(
            "engines: []\ndefault: ghost\ntemperature_settings:\n  wild: 7.5\n",
        );
        assert!(res.is_err());

        let text = EnginesConfig::builtin().to_yaml_string().unwrap();
        let config: EnginesConfig = serde_yaml::from_str(&text).unwrap();
        assert_eq!(config, EnginesConfig::builtin());
    }

    #[test]
    fn test_serde_json_deserialize_rejects_dangling_default() {
        let json = r#"{"engines":[{"name":"e","api_key_name":"K","models":[{"name":"m","context_length":1,"max_tokens":1,"max_temperature":1.0,"temperature":0.5}],"default_model":"m"}],"default":"ghost"}"#;
        let err = serde_json::from_str::<EnginesConfig>(json).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = EnginesConfig::load(Path::new("/nonexistent/engines.yaml")).unwrap_err();
        assert_eq!(err.kind(), "IoError");
    }

    #[test]
    fn test_json_rendering_contains_engines() {
        let json = EnginesConfig::builtin().to_json_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["default"], "google");
        assert!(value["engines"].as_array().unwrap().len() >= 3);
    }
}
