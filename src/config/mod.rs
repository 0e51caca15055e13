//! The engine catalogue: types, loading, validation and discovery.
//!
//! The catalogue is YAML, usually `engines.yaml` in the working directory or
//! under the platform config dir (e.g. `~/.config/engines/engines.yaml` on
//! Linux). Once loaded it is immutable; share it by reference or `Arc`.

mod loader;
mod paths;
mod schema;
mod types;
mod validate;

pub use paths::ConfigSource;
pub use types::{Engine, EnginesConfig, Model};
