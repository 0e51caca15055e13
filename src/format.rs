//! Terminal rendering for catalogue listings.

use colored::Colorize;

use crate::config::{Engine, EnginesConfig, Model};
use crate::selection::Selection;

/// Format a token count with thousands separators. Example: `128,000`.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// One line per engine with its models, defaults marked.
pub fn render_catalogue(config: &EnginesConfig) -> String {
    let mut out = String::new();
    for engine in &config.engines {
        let marker = if engine.name == config.default {
            format!(" {}", "(default)".green())
        } else {
            String::new()
        };
        out.push_str(&format!("{}{marker}\n", engine.name.bold()));
        for model in &engine.models {
            let marker = if model.name == engine.default_model { " *" } else { "" };
            out.push_str(&format!("  {}{marker}\n", model.name));
        }
    }
    out
}

/// Table of one engine's models with their limits.
pub fn render_engine(engine: &Engine) -> String {
    let width = engine
        .models
        .iter()
        .map(|m| m.name.len())
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{}  {}\n",
        engine.name.bold(),
        format!("key: ${}", engine.api_key_name).dimmed()
    );
    for model in &engine.models {
        let marker = if model.name == engine.default_model { "*" } else { " " };
        out.push_str(&format!(
            "  {marker} {:<width$}  {}\n",
            model.name,
            render_limits(model),
        ));
    }
    out
}

/// `ctx 128,000 · out 4,096 · temp 0.75/2`
pub fn render_limits(model: &Model) -> String {
    format!(
        "ctx {} · out {} · temp {}/{}",
        format_number(model.context_length),
        format_number(model.max_tokens),
        model.temperature,
        model.max_temperature
    )
}

/// Summary of a resolved selection. Never prints the credential itself.
pub fn render_selection(selection: &Selection) -> String {
    let key_status = if selection.has_api_key() {
        "set".green().to_string()
    } else {
        "not set".red().to_string()
    };
    let mut out = format!(
        "engine:      {}\nmodel:       {}\nlimits:      {}\ntemperature: {}",
        selection.engine,
        selection.model.name,
        render_limits(&selection.model),
        selection.temperature,
    );
    if let Some(requested) = selection.clamped_from {
        out.push_str(&format!(" {}", format!("(clamped from {requested})").yellow()));
    }
    out.push_str(&format!("\nmax tokens:  {}", format_number(selection.max_tokens)));
    if let Some(requested) = selection.max_tokens_capped_from {
        out.push_str(&format!(" {}", format!("(capped from {requested})").yellow()));
    }
    out.push_str(&format!("\napi key:     ${} ({key_status})\n", selection.api_key_name));
    out
}
