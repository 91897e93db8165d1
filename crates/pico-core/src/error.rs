// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Pico pharmacy assistant.

use thiserror::Error;

/// Shown when a completion call fails.
pub const GENERATION_APOLOGY: &str = "죄송합니다, AI 응답을 생성하는 중 오류가 발생했습니다.";

/// Shown when a search-grounded completion call fails.
pub const GROUNDING_APOLOGY: &str = "죄송합니다, 실시간 검색 중 오류가 발생했습니다.";

/// Shown in the chat transcript when a turn fails.
pub const CHAT_APOLOGY: &str = "죄송합니다, 요청을 처리하는 중 오류가 발생했습니다.";

/// Shown when a structured response cannot be parsed.
pub const MALFORMED_RESPONSE_NOTICE: &str = "오류: AI 응답을 분석하는 데 실패했습니다.";

/// Shown when an attachment is not plain text or CSV.
pub const UNSUPPORTED_FILE_NOTICE: &str =
    "텍스트(.txt) 또는 CSV(.csv) 파일만 학습 및 분석할 수 있습니다.";

/// Shown when an attachment cannot be decoded as text.
pub const FILE_READ_FAILURE_NOTICE: &str = "파일을 읽는 데 실패했습니다. 다시 시도해주세요.";

/// Shown when the assistant keeps requesting tools past the configured cap.
pub const TOOL_LIMIT_NOTICE: &str =
    "요청하신 작업이 너무 많은 도구 호출을 필요로 하여 중단되었습니다.";

/// The primary error type used across all Pico adapter traits and core operations.
#[derive(Debug, Error)]
pub enum PicoError {
    /// Configuration errors (invalid TOML, missing API key, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Completion or image service errors (transport failure, API error body).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The service answered, but not in the declared JSON shape.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String, raw: String },

    /// Caller supplied an input that violates a domain rule.
    #[error("validation error: {0}")]
    Validation(String),

    /// A chat attachment with a MIME type other than plain text or CSV.
    #[error("unsupported file `{file_name}` ({mime_type})")]
    UnsupportedFile { file_name: String, mime_type: String },

    /// The assistant requested tools more times than allowed in one turn.
    #[error("tool loop aborted after {iterations} iterations")]
    ToolLimitExceeded { iterations: usize },

    /// A referenced entity does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PicoError {
    /// Fixed user-facing text for this failure.
    ///
    /// Callers that render into a UI use this instead of the `Display` output,
    /// which is meant for logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            PicoError::Provider { .. } | PicoError::Timeout { .. } => GENERATION_APOLOGY,
            PicoError::MalformedResponse { .. } => MALFORMED_RESPONSE_NOTICE,
            PicoError::UnsupportedFile { .. } => UNSUPPORTED_FILE_NOTICE,
            PicoError::ToolLimitExceeded { .. } => TOOL_LIMIT_NOTICE,
            _ => CHAT_APOLOGY,
        }
    }

    /// Convenience constructor for provider errors without a source.
    pub fn provider(message: impl Into<String>) -> Self {
        PicoError::Provider {
            message: message.into(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for PicoError {
    fn from(e: serde_json::Error) -> Self {
        PicoError::Internal(format!("serialization failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_failures_map_to_generation_apology() {
        let err = PicoError::provider("HTTP 500");
        assert_eq!(err.user_message(), GENERATION_APOLOGY);

        let timeout = PicoError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        assert_eq!(timeout.user_message(), GENERATION_APOLOGY);
    }

    #[test]
    fn malformed_response_keeps_raw_text() {
        let err = PicoError::MalformedResponse {
            message: "expected value at line 1".into(),
            raw: "not json".into(),
        };
        assert_eq!(err.user_message(), MALFORMED_RESPONSE_NOTICE);
        match err {
            PicoError::MalformedResponse { raw, .. } => assert_eq!(raw, "not json"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn display_is_log_oriented() {
        let err = PicoError::UnsupportedFile {
            file_name: "scan.pdf".into(),
            mime_type: "application/pdf".into(),
        };
        assert_eq!(err.to_string(), "unsupported file `scan.pdf` (application/pdf)");
        assert_eq!(err.user_message(), UNSUPPORTED_FILE_NOTICE);
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = PicoError::NotFound {
            kind: "customer",
            id: "cust-1".into(),
        };
        assert_eq!(err.to_string(), "customer not found: cust-1");
    }
}
