// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The single point of contact with the completion and image services.
//!
//! [`ContentGateway`] turns an application-level request into exactly one
//! provider call. Every mode returns a `Result` so callers can tell a model
//! answer apart from a failed call.

use std::sync::Arc;

use pico_core::error::PicoError;
use pico_core::traits::{CompletionProvider, ImageProvider};
use pico_core::types::{
    ChatMessage, ChatRole, Citation, CompletionRequest, CompletionResponse, FunctionDeclaration,
    ImageRef, Turn, TurnPart, TurnRole,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Text and web sources of a search-grounded completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundedAnswer {
    pub text: String,
    pub sources: Vec<Citation>,
}

/// Mediates all calls to the external completion and image services.
///
/// Holds no state across calls besides the model identifier and the chat
/// system instruction.
pub struct ContentGateway {
    completions: Arc<dyn CompletionProvider>,
    images: Arc<dyn ImageProvider>,
    text_model: Option<String>,
    system_instruction: String,
}

impl ContentGateway {
    pub fn new(
        completions: Arc<dyn CompletionProvider>,
        images: Arc<dyn ImageProvider>,
        system_instruction: impl Into<String>,
    ) -> Self {
        Self {
            completions,
            images,
            text_model: None,
            system_instruction: system_instruction.into(),
        }
    }

    /// Pins the text model instead of using the provider default.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = Some(model.into());
        self
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Plain completion: `prompt` appended to the converted chat history.
    pub async fn generate_text(
        &self,
        prompt: &str,
        history: &[ChatMessage],
    ) -> Result<String, PicoError> {
        let response = self
            .send(self.request(prompt, history), "plain")
            .await?;
        Ok(response.text)
    }

    /// Schema-constrained completion, returned unparsed.
    pub async fn generate_structured_raw(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
        history: &[ChatMessage],
    ) -> Result<String, PicoError> {
        let mut request = self.request(prompt, history);
        request.response_schema = Some(schema.clone());
        let response = self.send(request, "structured").await?;
        Ok(response.text)
    }

    /// Schema-constrained completion parsed into `T`.
    ///
    /// A reply that does not parse is [`PicoError::MalformedResponse`] with
    /// the raw text attached.
    pub async fn generate_structured<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
        history: &[ChatMessage],
    ) -> Result<T, PicoError> {
        let raw = self.generate_structured_raw(prompt, schema, history).await?;
        parse_structured(raw)
    }

    /// Single-shot completion with live web search. No history is sent.
    pub async fn generate_grounded(&self, prompt: &str) -> Result<GroundedAnswer, PicoError> {
        let mut request = self.request(prompt, &[]);
        request.use_search = true;
        let response = self.send(request, "grounded").await?;
        Ok(GroundedAnswer {
            text: response.text,
            sources: response.citations,
        })
    }

    /// Generates one image. Not retried.
    pub async fn generate_image(&self, prompt: &str) -> Result<ImageRef, PicoError> {
        debug!(provider = self.images.name(), "generating image");
        self.images.generate_image(prompt).await.inspect_err(|e| {
            warn!(error = %e, "image generation failed");
        })
    }

    /// One chat round-trip: the full turn list plus tool declarations, sent
    /// with the system instruction.
    pub async fn converse(
        &self,
        contents: Vec<Turn>,
        tools: Vec<FunctionDeclaration>,
    ) -> Result<CompletionResponse, PicoError> {
        let request = CompletionRequest {
            model: self.text_model.clone(),
            system_instruction: Some(self.system_instruction.clone()),
            contents,
            tools,
            ..Default::default()
        };
        self.send(request, "chat").await
    }

    fn request(&self, prompt: &str, history: &[ChatMessage]) -> CompletionRequest {
        let mut contents = history_to_turns(history);
        contents.push(Turn::user_text(prompt));
        CompletionRequest {
            model: self.text_model.clone(),
            contents,
            ..Default::default()
        }
    }

    async fn send(
        &self,
        request: CompletionRequest,
        mode: &'static str,
    ) -> Result<CompletionResponse, PicoError> {
        let turns = request.contents.len();
        match self.completions.complete(request).await {
            Ok(response) => {
                info!(
                    mode,
                    turns,
                    function_calls = response.function_calls.len(),
                    citations = response.citations.len(),
                    "completion received"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(mode, error = %e, "completion failed");
                Err(e)
            }
        }
    }
}

/// Parses a structured reply, keeping the raw text on failure.
pub fn parse_structured<T: DeserializeOwned>(raw: String) -> Result<T, PicoError> {
    match serde_json::from_str(raw.trim()) {
        Ok(value) => Ok(value),
        Err(e) => Err(PicoError::MalformedResponse {
            message: e.to_string(),
            raw,
        }),
    }
}

/// Converts a visible transcript into service turns.
///
/// The first message (the greeting) is dropped, as is any message with a
/// blank part.
pub fn history_to_turns(history: &[ChatMessage]) -> Vec<Turn> {
    history
        .iter()
        .skip(1)
        .filter(|m| !m.has_empty_part())
        .map(|m| Turn {
            role: match m.role {
                ChatRole::Assistant => TurnRole::Model,
                ChatRole::User => TurnRole::User,
            },
            parts: m.parts.iter().cloned().map(TurnPart::Text).collect(),
        })
        .collect()
}

/// Loads the chat system instruction: file > inline > built-in default.
pub async fn load_system_instruction(inline: &str, file: &Option<String>) -> String {
    if let Some(path) = file {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    info!(path = %path, "loaded system instruction from file");
                    return trimmed.to_string();
                }
            }
            Err(e) => {
                warn!(path = %path, error = %e, "failed to read system instruction file, falling back");
            }
        }
    }

    if !inline.trim().is_empty() {
        return inline.to_string();
    }

    pico_config::PicoConfig::default().agent.system_instruction
}

#[cfg(test)]
mod tests {
    use super::*;
    use pico_core::forms::MedicationGuidance;
    use pico_test_utils::MockProvider;

    fn gateway(mock: &Arc<MockProvider>) -> ContentGateway {
        ContentGateway::new(mock.clone(), mock.clone(), "You are Pico.")
    }

    fn transcript() -> Vec<ChatMessage> {
        vec![
            ChatMessage::assistant("안녕하세요, 약사님!"),
            ChatMessage::user("재고 현황 알려줘"),
            ChatMessage::assistant("  "),
            ChatMessage::assistant("타이레놀이 부족합니다."),
        ]
    }

    #[test]
    fn history_skips_greeting_and_blank_messages() {
        let turns = history_to_turns(&transcript());
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, TurnRole::User);
        assert_eq!(turns[0].text(), "재고 현황 알려줘");
        assert_eq!(turns[1].role, TurnRole::Model);
    }

    #[test]
    fn empty_history_converts_to_nothing() {
        assert!(history_to_turns(&[]).is_empty());
        assert!(history_to_turns(&[ChatMessage::assistant("hi")]).is_empty());
    }

    #[tokio::test]
    async fn plain_mode_appends_prompt_to_history() {
        let mock = Arc::new(MockProvider::with_responses(vec!["답변".into()]));
        let text = gateway(&mock).generate_text("질문", &transcript()).await.unwrap();
        assert_eq!(text, "답변");

        let request = mock.last_request().await.unwrap();
        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[2].text(), "질문");
        assert!(request.system_instruction.is_none());
        assert!(request.tools.is_empty());
        assert!(!request.use_search);
    }

    #[tokio::test]
    async fn plain_mode_propagates_failure() {
        let mock = Arc::new(MockProvider::new());
        mock.add_error("HTTP 500").await;
        let err = gateway(&mock).generate_text("x", &[]).await.unwrap_err();
        assert!(matches!(err, PicoError::Provider { .. }));
    }

    #[tokio::test]
    async fn structured_mode_parses_json() {
        let mock = Arc::new(MockProvider::with_responses(vec![
            r#"{"greeting":"안녕하세요","medications":[],"generalAdvice":["물"],"closing":"끝"}"#
                .into(),
        ]));
        let schema = serde_json::json!({"type": "OBJECT"});
        let guidance: MedicationGuidance = gateway(&mock)
            .generate_structured("복약지도", &schema, &[])
            .await
            .unwrap();
        assert_eq!(guidance.general_advice, vec!["물".to_string()]);
        assert_eq!(mock.last_request().await.unwrap().response_schema, Some(schema));
    }

    #[tokio::test]
    async fn structured_mode_keeps_raw_text_on_parse_failure() {
        let mock = Arc::new(MockProvider::with_responses(vec!["not json".into()]));
        let err = gateway(&mock)
            .generate_structured::<MedicationGuidance>("x", &serde_json::json!({}), &[])
            .await
            .unwrap_err();
        match err {
            PicoError::MalformedResponse { raw, .. } => assert_eq!(raw, "not json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn grounded_mode_sends_no_history() {
        let mock = Arc::new(MockProvider::new());
        mock.add_completion(CompletionResponse {
            text: "검색 결과".into(),
            function_calls: vec![],
            citations: vec![Citation {
                uri: "https://example.com".into(),
                title: None,
            }],
        })
        .await;
        let answer = gateway(&mock).generate_grounded("최신 정보").await.unwrap();
        assert_eq!(answer.text, "검색 결과");
        assert_eq!(answer.sources.len(), 1);

        let request = mock.last_request().await.unwrap();
        assert!(request.use_search);
        assert_eq!(request.contents.len(), 1);
    }

    #[tokio::test]
    async fn converse_sends_system_instruction_and_tools() {
        let mock = Arc::new(MockProvider::new());
        let tools = vec![FunctionDeclaration {
            name: "placeOrder".into(),
            description: String::new(),
            parameters: serde_json::json!({}),
        }];
        gateway(&mock)
            .with_text_model("gemini-2.5-flash")
            .converse(vec![Turn::user_text("hi")], tools)
            .await
            .unwrap();

        let request = mock.last_request().await.unwrap();
        assert_eq!(request.system_instruction.as_deref(), Some("You are Pico."));
        assert_eq!(request.tools.len(), 1);
        assert_eq!(request.model.as_deref(), Some("gemini-2.5-flash"));
    }

    #[tokio::test]
    async fn image_mode_returns_reference() {
        let mock = Arc::new(MockProvider::new());
        let image = gateway(&mock).generate_image("일러스트").await.unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(mock.image_prompts().await, vec!["일러스트".to_string()]);
    }

    #[tokio::test]
    async fn system_instruction_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instruction.md");
        std::fs::write(&path, "  File instruction.\n").unwrap();

        let loaded = load_system_instruction(
            "Inline instruction.",
            &Some(path.to_string_lossy().into_owned()),
        )
        .await;
        assert_eq!(loaded, "File instruction.");
    }

    #[tokio::test]
    async fn missing_instruction_file_falls_back_to_inline() {
        let loaded = load_system_instruction(
            "Inline instruction.",
            &Some("/nonexistent/instruction.md".into()),
        )
        .await;
        assert_eq!(loaded, "Inline instruction.");
    }

    #[tokio::test]
    async fn blank_inline_falls_back_to_default() {
        let loaded = load_system_instruction("", &None).await;
        assert!(loaded.starts_with("You are Pico"));
    }
}
