//! Locating the engine catalogue on disk.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::EnginesConfig;
use crate::constants::{APP_NAME, CONFIG_FILENAME};
use crate::error::Result;

/// Where the loaded catalogue came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from this file.
    File(PathBuf),
    /// No file found; the bundled catalogue was used.
    Builtin,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Builtin => write!(f, "(built-in)"),
        }
    }
}

impl EnginesConfig {
    /// Returns the platform-specific configuration directory for this tool.
    ///
    /// Returns `~/.config/engines/` on Linux (`XDG_CONFIG_HOME/engines`), or
    /// `None` when the platform has no such directory.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME))
    }

    /// Returns the user-level catalogue path, `~/.config/engines/engines.yaml` on Linux.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    /// Finds and loads a catalogue.
    ///
    /// Search order: `explicit`, `./engines.yaml`, the user config path, then
    /// the bundled catalogue. An explicit path is never skipped: if it cannot
    /// be loaded the error is returned as-is.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let config = Self::load(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        let candidates = std::env::current_dir()
            .ok()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .into_iter()
            .chain(Self::config_path());
        for candidate in candidates {
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok((config, ConfigSource::File(candidate)));
            }
            debug!("no catalogue at {:?}", candidate);
        }

        debug!("falling back to the built-in catalogue");
        Ok((Self::builtin(), ConfigSource::Builtin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(
            &path,
            r#"
engines:
  - name: local
    api_key_name: LOCAL_KEY
    models:
      - name: tiny
        context_length: 2048
        max_tokens: 256
        max_temperature: 1.0
        temperature: 0.3
    default_model: tiny
default: local
"#,
        )
        .unwrap();

        let (config, source) = EnginesConfig::discover(Some(&path)).unwrap();
        assert_eq!(config.default, "local");
        assert_eq!(source, ConfigSource::File(path));
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(EnginesConfig::discover(Some(&path)).is_err());
    }

    #[test]
    fn test_config_path_ends_with_filename() {
        if let Some(path) = EnginesConfig::config_path() {
            assert!(path.ends_with("engines/engines.yaml"));
        }
    }
}
