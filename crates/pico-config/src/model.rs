// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Pico pharmacy assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Pico configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PicoConfig {
    /// Assistant identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Gemini completion and image service settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chat assistant settings.
    #[serde(default)]
    pub chat: ChatConfig,

    /// Simulated supplier settings.
    #[serde(default)]
    pub supplier: SupplierConfig,

    /// Mock pharmacy data settings.
    #[serde(default)]
    pub pharmacy: PharmacyConfig,
}

/// Assistant identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// System instruction for the chat assistant.
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,

    /// Path to a file containing the system instruction.
    /// Takes precedence over `system_instruction` if both are set.
    #[serde(default)]
    pub system_instruction_file: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            system_instruction: default_system_instruction(),
            system_instruction_file: None,
        }
    }
}

fn default_agent_name() -> String {
    "pico".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_system_instruction() -> String {
    "You are Pico, a helpful and friendly AI assistant for pharmacists. \
     Your primary goal is to assist with pharmacy management tasks."
        .to_string()
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` falls back to `GEMINI_API_KEY`, then `API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for text completions.
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model used for image generation.
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Base URL of the models endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries on 429/500/503. Zero disables retrying.
    #[serde(default)]
    pub max_retries: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: default_text_model(),
            image_model: default_image_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
        }
    }
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "imagen-3.0-generate-002".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL mode.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: true,
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|d| d.join("pico").join("pico.db").display().to_string())
        .unwrap_or_else(|| "pico.db".to_string())
}

fn default_true() -> bool {
    true
}

/// Chat assistant configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Maximum tool round-trips within a single user turn.
    #[serde(default = "default_max_tool_iterations")]
    pub max_tool_iterations: usize,

    /// MIME types accepted as chat attachments.
    #[serde(default = "default_accepted_mime_types")]
    pub accepted_mime_types: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_tool_iterations: default_max_tool_iterations(),
            accepted_mime_types: default_accepted_mime_types(),
        }
    }
}

fn default_max_tool_iterations() -> usize {
    5
}

fn default_accepted_mime_types() -> Vec<String> {
    vec!["text/plain".to_string(), "text/csv".to_string()]
}

/// Simulated supplier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SupplierConfig {
    /// Fixed delay before an order is confirmed, in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

impl Default for SupplierConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

fn default_latency_ms() -> u64 {
    1500
}

/// Mock pharmacy data configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PharmacyConfig {
    /// Number of synthetic sales generated at startup.
    #[serde(default = "default_sales_events")]
    pub sales_events: usize,

    /// Days of sales history to spread the events over.
    #[serde(default = "default_sales_window_days")]
    pub sales_window_days: u32,

    /// Items below this quantity raise a low-stock alert.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,

    /// Items expiring within this many days count as expiring soon.
    #[serde(default = "default_expiring_window_days")]
    pub expiring_window_days: u32,
}

impl Default for PharmacyConfig {
    fn default() -> Self {
        Self {
            sales_events: default_sales_events(),
            sales_window_days: default_sales_window_days(),
            low_stock_threshold: default_low_stock_threshold(),
            expiring_window_days: default_expiring_window_days(),
        }
    }
}

fn default_sales_events() -> usize {
    200
}

fn default_sales_window_days() -> u32 {
    14
}

fn default_low_stock_threshold() -> u32 {
    10
}

fn default_expiring_window_days() -> u32 {
    30
}
