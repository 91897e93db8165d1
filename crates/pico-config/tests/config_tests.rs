// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Pico configuration system.

use pico_config::diagnostic::{ConfigError, suggest_key};
use pico_config::model::PicoConfig;
use pico_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use serial_test::serial;

#[test]
fn valid_toml_deserializes_into_pico_config() {
    let toml = r#"
[agent]
name = "front-desk"
log_level = "debug"

[gemini]
api_key = "test-key"
text_model = "gemini-2.0-flash"

[storage]
database_path = "/tmp/pico-test.db"
wal_mode = false

[chat]
max_tool_iterations = 3
accepted_mime_types = ["text/plain"]

[supplier]
latency_ms = 0

[pharmacy]
sales_events = 50
low_stock_threshold = 5
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "front-desk");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.gemini.api_key.as_deref(), Some("test-key"));
    assert_eq!(config.gemini.text_model, "gemini-2.0-flash");
    assert_eq!(config.gemini.image_model, "imagen-3.0-generate-002");
    assert_eq!(config.storage.database_path, "/tmp/pico-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.chat.max_tool_iterations, 3);
    assert_eq!(config.chat.accepted_mime_types, vec!["text/plain"]);
    assert_eq!(config.supplier.latency_ms, 0);
    assert_eq!(config.pharmacy.sales_events, 50);
    assert_eq!(config.pharmacy.low_stock_threshold, 5);
    assert_eq!(config.pharmacy.expiring_window_days, 30);
}

#[test]
fn unknown_field_in_chat_produces_error() {
    let toml = r#"
[chat]
max_tool_iteration = 3
"#;
    let err = load_config_from_str(toml).unwrap_err();
    assert!(err.to_string().contains("max_tool_iteration"));
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let toml = r#"
[telegram]
bot_token = "x"
"#;
    assert!(load_config_from_str(toml).is_err());
}

#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.agent.name, "pico");
    assert_eq!(config.gemini.text_model, "gemini-2.5-flash");
    assert_eq!(config.gemini.timeout_secs, 120);
    assert_eq!(config.gemini.max_retries, 0);
    assert_eq!(config.chat.max_tool_iterations, 5);
    assert_eq!(config.supplier.latency_ms, 1500);
    assert_eq!(config.pharmacy.sales_events, 200);
    assert_eq!(config.pharmacy.sales_window_days, 14);
}

#[test]
fn dotted_override_sets_nested_field() {
    use figment::{Figment, providers::Serialized};

    let config: PicoConfig = Figment::new()
        .merge(Serialized::defaults(PicoConfig::default()))
        .merge(("gemini.text_model", "override-model"))
        .extract()
        .expect("should set text_model via dot notation");
    assert_eq!(config.gemini.text_model, "override-model");
}

#[test]
#[serial]
fn env_var_overrides_file_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pico.toml");
    std::fs::write(&path, "[chat]\nmax_tool_iterations = 2\n").unwrap();

    unsafe { std::env::set_var("PICO_CHAT_MAX_TOOL_ITERATIONS", "7") };
    let result = load_and_validate_path(&path);
    unsafe { std::env::remove_var("PICO_CHAT_MAX_TOOL_ITERATIONS") };

    let config = result.expect("env override should validate");
    assert_eq!(config.chat.max_tool_iterations, 7);
}

#[test]
#[serial]
fn file_value_used_without_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pico.toml");
    std::fs::write(&path, "[supplier]\nlatency_ms = 10\n").unwrap();

    let config = load_and_validate_path(&path).expect("file should validate");
    assert_eq!(config.supplier.latency_ms, 10);
}

#[test]
fn suggestion_for_model_typo() {
    assert_eq!(
        suggest_key("text_mdoel", &["api_key", "text_model", "image_model"]),
        Some("text_model".to_string())
    );
}

#[test]
fn unknown_key_error_carries_suggestion() {
    let toml = "[gemini]\ntext_mdoel = \"x\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            valid_keys,
            ..
        } => {
            assert_eq!(key, "text_mdoel");
            assert_eq!(suggestion.as_deref(), Some("text_model"));
            assert!(valid_keys.contains("image_model"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn invalid_type_is_reported() {
    let toml = "[chat]\nmax_tool_iterations = \"many\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    let text = errors[0].to_string();
    assert!(
        text.contains("invalid type") || text.contains("max_tool_iterations"),
        "got: {text}"
    );
}

#[test]
fn validation_rejects_zero_tool_iterations() {
    let errors = load_and_validate_str("[chat]\nmax_tool_iterations = 0\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
    assert!(errors[0].to_string().contains("max_tool_iterations"));
}

#[test]
fn validation_rejects_empty_mime_list() {
    let errors = load_and_validate_str("[chat]\naccepted_mime_types = []\n").unwrap_err();
    assert!(errors[0].to_string().contains("accepted_mime_types"));
}

#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "latency".to_string(),
        suggestion: Some("latency_ms".to_string()),
        valid_keys: "latency_ms".to_string(),
        span: None,
        src: None,
    };
    assert!(error.code().is_some());
    let help = error.help().map(|h| h.to_string()).unwrap_or_default();
    assert!(help.contains("did you mean `latency_ms`"));

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render");
    assert!(buf.contains("latency"));
}

#[test]
fn defaults_serialize_to_json() {
    let json = serde_json::to_value(PicoConfig::default()).unwrap();
    assert_eq!(json["chat"]["max_tool_iterations"], 5);
    assert_eq!(json["gemini"]["image_model"], "imagen-3.0-generate-002");
}
