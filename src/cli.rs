//! Command-line interface definition and dispatch for `engines`.
//!
//! Uses [`clap`] derive macros. Every subcommand loads the catalogue once
//! through [`EnginesConfig::discover`] and then only reads from it.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use engines::config::{ConfigSource, EnginesConfig};
use engines::format::{render_catalogue, render_engine, render_selection};
use engines::selection::{self, SelectionRequest, TemperatureChoice};

/// Top-level CLI structure.
#[derive(Parser)]
#[command(
    name = "engines",
    version,
    about = "Inspect and validate an AI engine catalogue"
)]
pub struct Cli {
    /// Catalogue file (defaults to ./engines.yaml, then the user config dir)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
///
/// The `///` doc comments on variants double as `--help` text.
#[derive(Subcommand)]
pub enum Commands {
    /// List engines and their models
    List,
    /// Show one engine's models and limits
    Show {
        /// Engine name
        engine: String,
    },
    /// Load and validate a catalogue, reporting the first problem found
    Validate {
        /// File to validate (overrides --config)
        path: Option<PathBuf>,
    },
    /// Resolve engine, model, temperature and output limit as a consumer would
    Resolve(ResolveArgs),
    /// List temperature presets
    Presets,
    /// Print the loaded catalogue re-serialized
    Dump {
        /// Emit JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Engine to use (defaults to the catalogue default)
    #[arg(short, long)]
    pub engine: Option<String>,

    /// Model to use (defaults to the engine's default model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Explicit sampling temperature
    #[arg(short, long, conflicts_with = "preset")]
    pub temperature: Option<f64>,

    /// Named temperature preset (precise, balanced, creative, ...)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Output token limit (defaults to the model's max_tokens)
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<u64>,
}

impl ResolveArgs {
    fn into_request(self) -> SelectionRequest {
        let temperature = match (self.temperature, self.preset) {
            (Some(value), _) => TemperatureChoice::Explicit(value),
            (None, Some(label)) => TemperatureChoice::Preset(label),
            (None, None) => TemperatureChoice::ModelDefault,
        };
        SelectionRequest {
            engine: self.engine,
            model: self.model,
            temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub fn run(cli: Cli) -> Result<()> {
    let path = cli.config;
    match cli.command {
        Commands::List => {
            let config = load(path.as_ref())?;
            print!("{}", render_catalogue(&config));
        }
        Commands::Show { engine } => {
            let config = load(path.as_ref())?;
            let engine = config.engine(&engine).with_context(|| {
                format!(
                    "Unknown engine '{}'. Available: {}",
                    engine,
                    config.engine_names().join(", ")
                )
            })?;
            print!("{}", render_engine(engine));
        }
        Commands::Validate { path: file } => validate(file.as_ref().or(path.as_ref()))?,
        Commands::Resolve(args) => {
            let config = load(path.as_ref())?;
            let selected = selection::select(&config, &args.into_request())?;
            print!("{}", render_selection(&selected));
        }
        Commands::Presets => {
            let config = load(path.as_ref())?;
            for (label, value) in selection::presets(&config) {
                println!("{label:<10} {value}");
            }
        }
        Commands::Dump { json } => {
            let config = load(path.as_ref())?;
            let text = if json {
                config.to_json_string()?
            } else {
                config.to_yaml_string()?
            };
            println!("{}", text.trim_end());
        }
    }
    Ok(())
}

fn load(path: Option<&PathBuf>) -> Result<EnginesConfig> {
    let (config, source) = EnginesConfig::discover(path.map(PathBuf::as_path))
        .context("Failed to load engine catalogue")?;
    tracing::debug!("using catalogue from {}", source);
    Ok(config)
}

fn validate(path: Option<&PathBuf>) -> Result<()> {
    match EnginesConfig::discover(path.map(PathBuf::as_path)) {
        Ok((config, source)) => {
            let models: usize = config.engines.iter().map(|e| e.models.len()).sum();
            println!(
                "{}: ok ({} engines, {} models, default '{}')",
                source,
                config.engines.len(),
                models,
                config.default
            );
            if source == ConfigSource::Builtin {
                println!("no catalogue file found; checked the built-in catalogue");
            }
            Ok(())
        }
        Err(err) => anyhow::bail!("{}: {}", err.kind(), err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_flags_build_request() {
        let cli = Cli::try_parse_from(["engines", "resolve", "-e", "openai", "-p", "precise"]).unwrap();
        let Commands::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        let req = args.into_request();
        assert_eq!(req.engine.as_deref(), Some("openai"));
        assert_eq!(req.temperature, TemperatureChoice::Preset("precise".into()));
    }

    #[test]
    fn test_max_tokens_flag_reaches_request() {
        let cli = Cli::try_parse_from(["engines", "resolve", "--max-tokens", "2048"]).unwrap();
        let Commands::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        let req = args.into_request();
        assert_eq!(req.max_tokens, Some(2048));
        assert_eq!(req.temperature, TemperatureChoice::ModelDefault);
    }

    #[test]
    fn test_temperature_and_preset_conflict() {
        let res = Cli::try_parse_from(["engines", "resolve", "-t", "0.3", "-p", "precise"]);
        assert!(res.is_err());
    }
}
