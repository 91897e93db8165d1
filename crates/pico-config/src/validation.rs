// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::PicoConfig;

/// Upper bound on `chat.max_tool_iterations`.
pub const MAX_TOOL_ITERATIONS_LIMIT: usize = 20;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &PicoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        fail(format!(
            "agent.log_level `{}` is not one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.gemini.text_model.trim().is_empty() {
        fail("gemini.text_model must not be empty".to_string());
    }
    if config.gemini.image_model.trim().is_empty() {
        fail("gemini.image_model must not be empty".to_string());
    }
    if !config.gemini.base_url.starts_with("http://")
        && !config.gemini.base_url.starts_with("https://")
    {
        fail(format!(
            "gemini.base_url `{}` must start with http:// or https://",
            config.gemini.base_url
        ));
    }
    if config.gemini.timeout_secs == 0 {
        fail("gemini.timeout_secs must be positive".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    let iterations = config.chat.max_tool_iterations;
    if !(1..=MAX_TOOL_ITERATIONS_LIMIT).contains(&iterations) {
        fail(format!(
            "chat.max_tool_iterations must be between 1 and {MAX_TOOL_ITERATIONS_LIMIT}, got {iterations}"
        ));
    }
    if config.chat.accepted_mime_types.is_empty() {
        fail("chat.accepted_mime_types must list at least one type".to_string());
    }

    if config.pharmacy.sales_window_days == 0 {
        fail("pharmacy.sales_window_days must be positive".to_string());
    }
    if config.pharmacy.low_stock_threshold == 0 {
        fail("pharmacy.low_stock_threshold must be positive".to_string());
    }
    if config.pharmacy.expiring_window_days == 0 {
        fail("pharmacy.expiring_window_days must be positive".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&PicoConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_violations() {
        let mut config = PicoConfig::default();
        config.chat.max_tool_iterations = 0;
        config.gemini.text_model = "  ".to_string();
        config.pharmacy.low_stock_threshold = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn tool_iterations_upper_bound() {
        let mut config = PicoConfig::default();
        config.chat.max_tool_iterations = MAX_TOOL_ITERATIONS_LIMIT;
        assert!(validate_config(&config).is_ok());
        config.chat.max_tool_iterations = MAX_TOOL_ITERATIONS_LIMIT + 1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = PicoConfig::default();
        config.agent.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("agent.log_level"));
    }
}
