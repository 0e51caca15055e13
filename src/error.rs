//! Error types for loading and querying the engine catalogue.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while turning catalogue text into a validated [`EnginesConfig`].
///
/// Every variant is terminal: the loader never recovers on its own. Callers
/// decide whether to abort or fall back to [`EnginesConfig::builtin`].
///
/// [`EnginesConfig`]: crate::config::EnginesConfig
/// [`EnginesConfig::builtin`]: crate::config::EnginesConfig::builtin
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source text is not well-formed YAML.
    #[error("parse error{}: {message}", location_suffix(.line, .column))]
    Parse {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// A required field is missing, has the wrong kind of value, or repeats a name.
    #[error("schema error in {entity}: field `{field}` {reason}")]
    Schema {
        entity: String,
        field: String,
        reason: String,
    },

    /// A `default` or `default_model` names something that does not exist.
    #[error("reference error in {entity}: `{field}` refers to unknown {kind} '{target}'")]
    Reference {
        entity: String,
        field: String,
        kind: &'static str,
        target: String,
    },

    /// A numeric field lies outside its documented bounds.
    #[error("range error in {entity}: `{field}` = {value} is outside {bound}")]
    Range {
        entity: String,
        field: String,
        value: f64,
        bound: String,
    },

    /// The catalogue file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn location_suffix(line: &Option<usize>, column: &Option<usize>) -> String {
    match (line, column) {
        (Some(l), Some(c)) => format!(" at line {l}, column {c}"),
        (Some(l), None) => format!(" at line {l}"),
        _ => String::new(),
    }
}

impl ConfigError {
    pub(crate) fn schema(entity: impl Into<String>, field: &str, reason: impl Into<String>) -> Self {
        Self::Schema {
            entity: entity.into(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(entity: impl Into<String>, field: &str) -> Self {
        Self::schema(entity, field, "is missing")
    }

    pub(crate) fn range(
        entity: impl Into<String>,
        field: &str,
        value: f64,
        bound: impl Into<String>,
    ) -> Self {
        Self::Range {
            entity: entity.into(),
            field: field.to_string(),
            value,
            bound: bound.into(),
        }
    }

    /// Short category name, used by the CLI when reporting failures.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "ParseError",
            Self::Schema { .. } => "SchemaError",
            Self::Reference { .. } => "ReferenceError",
            Self::Range { .. } => "RangeError",
            Self::Io { .. } => "IoError",
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location();
        Self::Parse {
            message: strip_location(&err.to_string()),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
        }
    }
}

/// Drops serde_yaml's embedded ` at line N column M`; the location is kept in
/// `line`/`column` instead.
fn strip_location(message: &str) -> String {
    const MARKER: &str = " at line ";
    let Some(start) = message.find(MARKER) else {
        return message.to_string();
    };
    let rest = &message[start + MARKER.len()..];
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    let rest = match rest.strip_prefix(" column ") {
        Some(tail) => tail.trim_start_matches(|c: char| c.is_ascii_digit()),
        None => rest,
    };
    format!("{}{}", &message[..start], rest)
}

/// Failure while picking an engine, model and temperature from a loaded catalogue.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("unknown engine '{name}'. Available: {}", .available.join(", "))]
    UnknownEngine {
        name: String,
        available: Vec<String>,
    },

    #[error("unknown model '{name}' for engine '{engine}'. Available: {}", .available.join(", "))]
    UnknownModel {
        engine: String,
        name: String,
        available: Vec<String>,
    },

    #[error("unknown temperature preset '{0}'")]
    UnknownPreset(String),

    #[error("temperature {0} must be a non-negative number")]
    InvalidTemperature(f64),

    #[error("max_tokens must be greater than 0")]
    ZeroMaxTokens,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
