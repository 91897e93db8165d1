// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini provider adapter for the Pico pharmacy assistant.
//!
//! This crate implements [`CompletionProvider`] against the Gemini
//! `generateContent` endpoint and [`ImageProvider`] against Imagen `predict`.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use pico_config::PicoConfig;
use pico_core::error::PicoError;
use pico_core::traits::{CompletionProvider, ImageProvider, PluginAdapter};
use pico_core::types::{
    AdapterType, Citation, CompletionRequest, CompletionResponse, FunctionCall, HealthStatus,
    ImageRef, Turn, TurnPart, TurnRole,
};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::{
    ApiFunctionCall, ApiFunctionResponse, Content, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, GoogleSearch, Part, PredictRequest, Tool,
};

/// Gemini provider implementing [`CompletionProvider`] and [`ImageProvider`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` -> `API_KEY` -> error.
pub struct GeminiProvider {
    client: GeminiClient,
    text_model: String,
    image_model: String,
}

impl GeminiProvider {
    /// Creates a provider from the `[gemini]` config section.
    pub fn new(config: &PicoConfig) -> Result<Self, PicoError> {
        let api_key = resolve_api_key(&config.gemini.api_key)?;
        let client = GeminiClient::new(
            &api_key,
            &config.gemini.base_url,
            Duration::from_secs(config.gemini.timeout_secs),
            config.gemini.max_retries,
        )?;

        info!(
            text_model = config.gemini.text_model,
            image_model = config.gemini.image_model,
            "Gemini provider initialized"
        );

        Ok(Self::with_client(
            client,
            config.gemini.text_model.clone(),
            config.gemini.image_model.clone(),
        ))
    }

    /// Creates a provider around an existing client.
    pub fn with_client(client: GeminiClient, text_model: String, image_model: String) -> Self {
        Self {
            client,
            text_model,
            image_model,
        }
    }

    /// Converts a [`CompletionRequest`] to a Gemini [`GenerateContentRequest`].
    ///
    /// No system instruction is injected when the request carries none:
    /// grounded and panel prompts go out bare.
    fn to_api_request(&self, request: &CompletionRequest) -> GenerateContentRequest {
        let contents = request.contents.iter().map(to_api_content).collect();

        let system_instruction = request
            .system_instruction
            .as_ref()
            .filter(|s| !s.is_empty())
            .map(|s| Content {
                role: None,
                parts: vec![Part::text(s.clone())],
            });

        let mut tools = Vec::new();
        if !request.tools.is_empty() {
            tools.push(Tool {
                function_declarations: request.tools.clone(),
                google_search: None,
            });
        }
        if request.use_search {
            tools.push(Tool {
                function_declarations: Vec::new(),
                google_search: Some(GoogleSearch {}),
            });
        }

        let generation_config = request.response_schema.as_ref().map(|schema| GenerationConfig {
            response_mime_type: "application/json".into(),
            response_schema: schema.clone(),
        });

        GenerateContentRequest {
            contents,
            system_instruction,
            tools,
            generation_config,
        }
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, PicoError> {
        // Avoid spending quota on health checks.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PicoError> {
        debug!("Gemini provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, PicoError> {
        let model = request.model.as_deref().unwrap_or(&self.text_model).to_string();
        let api_request = self.to_api_request(&request);
        debug!(
            model = %model,
            turns = api_request.contents.len(),
            structured = api_request.generation_config.is_some(),
            search = request.use_search,
            "sending completion request"
        );
        let response = self.client.generate_content(&model, &api_request).await?;
        Ok(from_api_response(response))
    }
}

#[async_trait]
impl ImageProvider for GeminiProvider {
    async fn generate_image(&self, prompt: &str) -> Result<ImageRef, PicoError> {
        debug!(model = %self.image_model, "sending image request");
        let response = self
            .client
            .predict(&self.image_model, &PredictRequest::single(prompt))
            .await?;

        response
            .predictions
            .into_iter()
            .next()
            .map(|p| ImageRef {
                mime_type: p.mime_type,
                data_base64: p.bytes_base64_encoded,
            })
            .ok_or_else(|| PicoError::provider("image service returned no predictions"))
    }
}

fn to_api_content(turn: &Turn) -> Content {
    let role = match turn.role {
        TurnRole::User => "user",
        TurnRole::Model => "model",
    };
    let parts = turn
        .parts
        .iter()
        .map(|part| match part {
            TurnPart::Text(text) => Part::text(text.clone()),
            TurnPart::FunctionCall(call) => Part {
                function_call: Some(ApiFunctionCall {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    args: call.args.clone(),
                }),
                ..Part::default()
            },
            TurnPart::FunctionResponse(resp) => Part {
                function_response: Some(ApiFunctionResponse {
                    id: resp.id.clone(),
                    name: resp.name.clone(),
                    response: resp.response.clone(),
                }),
                ..Part::default()
            },
        })
        .collect();

    Content {
        role: Some(role.to_string()),
        parts,
    }
}

/// Normalizes the first candidate into a [`CompletionResponse`].
///
/// Text parts are concatenated. Grounding chunks without a URI are dropped.
fn from_api_response(response: GenerateContentResponse) -> CompletionResponse {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return CompletionResponse::default();
    };

    let mut text = String::new();
    let mut function_calls = Vec::new();
    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        if let Some(t) = part.text {
            text.push_str(&t);
        }
        if let Some(call) = part.function_call {
            function_calls.push(FunctionCall {
                id: call.id,
                name: call.name,
                args: call.args,
            });
        }
    }

    let citations = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .filter_map(|web| {
            let uri = web.uri.filter(|u| !u.is_empty())?;
            Some(Citation {
                uri,
                title: web.title,
            })
        })
        .collect();

    CompletionResponse {
        text,
        function_calls,
        citations,
    }
}

/// Resolves the API key from config or environment.
pub fn resolve_api_key(config_key: &Option<String>) -> Result<String, PicoError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    ["GEMINI_API_KEY", "API_KEY"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .ok_or_else(|| {
            PicoError::Config(
                "Gemini API key not found. Set gemini.api_key in config or the GEMINI_API_KEY environment variable.".into(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pico_core::types::{FunctionDeclaration, FunctionResponse};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_provider(base_url: &str) -> GeminiProvider {
        let client = GeminiClient::new("test-key", base_url, Duration::from_secs(5), 0).unwrap();
        GeminiProvider::with_client(
            client,
            "gemini-2.5-flash".into(),
            "imagen-3.0-generate-002".into(),
        )
    }

    #[test]
    fn resolve_api_key_from_config() {
        let result = resolve_api_key(&Some("g-test-123".into()));
        assert_eq!(result.unwrap(), "g-test-123");
    }

    #[test]
    fn resolve_api_key_none_falls_back_to_env() {
        let result = resolve_api_key(&None);
        // Will succeed if either env var is set, fail otherwise.
        match result {
            Ok(key) => assert!(!key.is_empty()),
            Err(e) => assert!(e.to_string().contains("API key not found"), "got: {e}"),
        }
    }

    #[test]
    fn plain_request_has_no_tools_or_system_instruction() {
        let provider = test_provider("http://localhost");
        let req = CompletionRequest {
            contents: vec![Turn::user_text("hi")],
            ..Default::default()
        };
        let json = serde_json::to_value(provider.to_api_request(&req)).unwrap();
        assert_eq!(json, serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": "hi"}]}]
        }));
    }

    #[test]
    fn structured_request_sets_json_mime_type() {
        let provider = test_provider("http://localhost");
        let schema = serde_json::json!({"type": "OBJECT"});
        let req = CompletionRequest {
            contents: vec![Turn::user_text("analyze")],
            response_schema: Some(schema.clone()),
            ..Default::default()
        };
        let json = serde_json::to_value(provider.to_api_request(&req)).unwrap();
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(json["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn tool_turns_convert_to_function_parts() {
        let provider = test_provider("http://localhost");
        let req = CompletionRequest {
            system_instruction: Some("You are Pico.".into()),
            contents: vec![
                Turn::user_text("재고 주문해줘"),
                Turn {
                    role: TurnRole::Model,
                    parts: vec![TurnPart::FunctionCall(FunctionCall {
                        id: None,
                        name: "placeOrder".into(),
                        args: serde_json::json!({"items": []}),
                    })],
                },
                Turn {
                    role: TurnRole::User,
                    parts: vec![TurnPart::FunctionResponse(FunctionResponse {
                        id: None,
                        name: "placeOrder".into(),
                        response: serde_json::json!({"result": "ok"}),
                    })],
                },
            ],
            tools: vec![FunctionDeclaration {
                name: "placeOrder".into(),
                description: "order".into(),
                parameters: serde_json::json!({"type": "OBJECT"}),
            }],
            ..Default::default()
        };
        let json = serde_json::to_value(provider.to_api_request(&req)).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "You are Pico.");
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["contents"][1]["parts"][0]["functionCall"]["name"], "placeOrder");
        assert_eq!(
            json["contents"][2]["parts"][0]["functionResponse"]["response"]["result"],
            "ok"
        );
        assert_eq!(json["tools"][0]["functionDeclarations"][0]["name"], "placeOrder");
    }

    #[test]
    fn response_without_candidates_is_empty() {
        let resp = from_api_response(GenerateContentResponse::default());
        assert_eq!(resp, CompletionResponse::default());
    }

    #[tokio::test]
    async fn grounded_completion_returns_citations() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/gemini-2.5-flash:generateContent"))
            .and(body_partial_json(serde_json::json!({"tools": [{"googleSearch": {}}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "최신 "}, {"text": "정보"}]},
                    "groundingMetadata": {"groundingChunks": [
                        {"web": {"uri": "https://a.example", "title": "A"}},
                        {"web": {"title": "no uri"}},
                        {"web": {"uri": "https://b.example"}}
                    ]}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = test_provider(&server.uri());
        let resp = provider
            .complete(CompletionRequest {
                contents: vec![Turn::user_text("아목시실린 최신 정보")],
                use_search: true,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(resp.text, "최신 정보");
        assert_eq!(
            resp.citations,
            vec![
                Citation {
                    uri: "https://a.example".into(),
                    title: Some("A".into())
                },
                Citation {
                    uri: "https://b.example".into(),
                    title: None
                },
            ]
        );
    }

    #[tokio::test]
    async fn function_calls_are_surfaced() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"functionCall": {
                        "name": "placeOrder",
                        "args": {"items": [{"name": "타이레놀", "quantityToOrder": 50}]}
                    }}]}
                }]
            })))
            .mount(&server)
            .await;

        let provider = test_provider(&server.uri());
        let resp = provider
            .complete(CompletionRequest {
                contents: vec![Turn::user_text("주문")],
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(resp.text.is_empty());
        assert_eq!(resp.function_calls.len(), 1);
        assert_eq!(resp.function_calls[0].args["items"][0]["name"], "타이레놀");
    }

    #[tokio::test]
    async fn request_model_overrides_default() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/gemini-2.5-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "pro"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = test_provider(&server.uri());
        let resp = provider
            .complete(CompletionRequest {
                model: Some("gemini-2.5-pro".into()),
                contents: vec![Turn::user_text("x")],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(resp.text, "pro");
    }

    #[tokio::test]
    async fn image_generation_returns_first_prediction() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/imagen-3.0-generate-002:predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [{"bytesBase64Encoded": "iVBORw0KGgo=", "mimeType": "image/png"}]
            })))
            .mount(&server)
            .await;

        let provider = test_provider(&server.uri());
        let image = provider.generate_image("약국 일러스트").await.unwrap();
        assert_eq!(image.to_data_url(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[tokio::test]
    async fn image_generation_without_predictions_fails() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"predictions": []})),
            )
            .mount(&server)
            .await;

        let provider = test_provider(&server.uri());
        let err = provider.generate_image("x").await.unwrap_err();
        assert!(matches!(err, PicoError::Provider { .. }), "got: {err:?}");
    }

    #[test]
    fn plugin_adapter_metadata() {
        let provider = test_provider("http://localhost");
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.version(), semver::Version::new(0, 1, 0));
        assert_eq!(provider.adapter_type(), AdapterType::Provider);
    }
}
