// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted completion and image provider for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pico_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, FunctionCall, HealthStatus, ImageRef,
};
use pico_core::{CompletionProvider, ImageProvider, PicoError, PluginAdapter};

/// Image returned when no image reply is queued.
pub const MOCK_IMAGE_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

enum Scripted<T> {
    Reply(T),
    Fail(String),
}

/// A provider that replays queued replies in FIFO order.
///
/// Every completion request is recorded. When the completion queue is
/// empty the reply is the text "mock response"; when the image queue is
/// empty a 1x1 PNG is returned.
pub struct MockProvider {
    completions: Arc<Mutex<VecDeque<Scripted<CompletionResponse>>>>,
    images: Arc<Mutex<VecDeque<Scripted<ImageRef>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    image_prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            completions: Arc::new(Mutex::new(VecDeque::new())),
            images: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            image_prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a provider pre-loaded with plain text replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        let queue = responses
            .into_iter()
            .map(|text| Scripted::Reply(text_response(text)))
            .collect();
        Self {
            completions: Arc::new(Mutex::new(queue)),
            ..Self::new()
        }
    }

    /// Queue a plain text reply.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.add_completion(text_response(text.into())).await;
    }

    /// Queue a full completion response.
    pub async fn add_completion(&self, response: CompletionResponse) {
        self.completions
            .lock()
            .await
            .push_back(Scripted::Reply(response));
    }

    /// Queue a reply that asks for one tool call.
    pub async fn add_function_call(&self, name: &str, args: serde_json::Value) {
        self.add_completion(CompletionResponse {
            function_calls: vec![FunctionCall {
                id: None,
                name: name.to_string(),
                args,
            }],
            ..CompletionResponse::default()
        })
        .await;
    }

    /// Queue a provider failure.
    pub async fn add_error(&self, message: impl Into<String>) {
        self.completions
            .lock()
            .await
            .push_back(Scripted::Fail(message.into()));
    }

    /// Queue an image reply.
    pub async fn add_image(&self, image: ImageRef) {
        self.images.lock().await.push_back(Scripted::Reply(image));
    }

    /// Queue an image generation failure.
    pub async fn add_image_error(&self, message: impl Into<String>) {
        self.images
            .lock()
            .await
            .push_back(Scripted::Fail(message.into()));
    }

    /// Every completion request received so far.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    /// The most recent completion request.
    pub async fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().await.last().cloned()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Prompts passed to image generation.
    pub async fn image_prompts(&self) -> Vec<String> {
        self.image_prompts.lock().await.clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn text_response(text: String) -> CompletionResponse {
    CompletionResponse {
        text,
        ..CompletionResponse::default()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, PicoError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PicoError> {
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, PicoError> {
        self.requests.lock().await.push(request);
        match self.completions.lock().await.pop_front() {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(PicoError::provider(message)),
            None => Ok(text_response("mock response".to_string())),
        }
    }
}

#[async_trait]
impl ImageProvider for MockProvider {
    async fn generate_image(&self, prompt: &str) -> Result<ImageRef, PicoError> {
        self.image_prompts.lock().await.push(prompt.to_string());
        match self.images.lock().await.pop_front() {
            Some(Scripted::Reply(image)) => Ok(image),
            Some(Scripted::Fail(message)) => Err(PicoError::provider(message)),
            None => Ok(ImageRef {
                mime_type: "image/png".to_string(),
                data_base64: MOCK_IMAGE_BASE64.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order_then_defaults() {
        let provider = MockProvider::with_responses(vec!["first".into(), "second".into()]);
        let request = CompletionRequest::default();
        assert_eq!(provider.complete(request.clone()).await.unwrap().text, "first");
        assert_eq!(provider.complete(request.clone()).await.unwrap().text, "second");
        assert_eq!(provider.complete(request).await.unwrap().text, "mock response");
        assert_eq!(provider.call_count().await, 3);
    }

    #[tokio::test]
    async fn scripted_errors_surface_as_provider_errors() {
        let provider = MockProvider::new();
        provider.add_error("quota exceeded").await;
        let err = provider.complete(CompletionRequest::default()).await.unwrap_err();
        assert!(matches!(err, PicoError::Provider { .. }));
    }

    #[tokio::test]
    async fn records_image_prompts() {
        let provider = MockProvider::new();
        let image = provider.generate_image("a pill").await.unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(provider.image_prompts().await, vec!["a pill"]);
    }
}
