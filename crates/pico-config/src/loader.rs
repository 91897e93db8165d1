// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./pico.toml` > `~/.config/pico/pico.toml` > `/etc/pico/pico.toml`
//! with environment variable overrides via `PICO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PicoConfig;

/// Config sections that env keys are split on, in match order.
const SECTIONS: [&str; 6] = ["agent", "gemini", "storage", "chat", "supplier", "pharmacy"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pico/pico.toml` (system-wide)
/// 3. `~/.config/pico/pico.toml` (user XDG config)
/// 4. `./pico.toml` (local directory)
/// 5. `PICO_*` environment variables
pub fn load_config() -> Result<PicoConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PicoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PicoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PicoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PicoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PicoConfig::default()))
        .merge(Toml::file("/etc/pico/pico.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("pico/pico.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("pico.toml"))
        .merge(env_provider())
}

/// Map a lowercased, prefix-stripped env key onto a dotted config path.
///
/// Only the first underscore after the section name is a separator, so
/// `gemini_text_model` becomes `gemini.text_model`, not `gemini.text.model`.
pub fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section)
            && let Some(field) = rest.strip_prefix('_')
        {
            return format!("{section}.{field}");
        }
    }
    key.to_string()
}

fn env_provider() -> Env {
    Env::prefixed("PICO_").map(|key| map_env_key(key.as_str()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_on_section_only() {
        assert_eq!(map_env_key("gemini_text_model"), "gemini.text_model");
        assert_eq!(map_env_key("chat_max_tool_iterations"), "chat.max_tool_iterations");
        assert_eq!(map_env_key("storage_database_path"), "storage.database_path");
    }

    #[test]
    fn unknown_sections_pass_through() {
        assert_eq!(map_env_key("telemetry_endpoint"), "telemetry_endpoint");
    }
}
