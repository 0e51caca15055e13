//! Load, validate and query a catalogue of AI engines and their models.
//!
//! The catalogue lists providers ("engines"), each with the environment
//! variable holding its credential, its models with context/output limits
//! and temperature bounds, and a default model; plus a global default engine
//! and named temperature presets.
//!
//! ```no_run
//! use engines::config::EnginesConfig;
//!
//! let config = EnginesConfig::load("engines.yaml".as_ref())?;
//! let engine = config.default_engine().expect("validated");
//! println!("{} -> {}", engine.name, engine.default_model);
//! # Ok::<(), engines::error::ConfigError>(())
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod selection;

pub use config::{ConfigSource, Engine, EnginesConfig, Model};
pub use error::{ConfigError, SelectionError};
pub use selection::{select, Selection, SelectionRequest, TemperatureChoice};
