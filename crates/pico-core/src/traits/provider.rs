// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider traits for the external completion and image services.

use async_trait::async_trait;

use crate::error::PicoError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse, ImageRef};

/// Adapter for a text completion service.
///
/// One call maps to exactly one request to the service. Implementations
/// report transport and API failures as [`PicoError::Provider`].
#[async_trait]
pub trait CompletionProvider: PluginAdapter {
    /// Sends a completion request and returns the normalized response.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, PicoError>;
}

/// Adapter for an image generation service.
#[async_trait]
pub trait ImageProvider: PluginAdapter {
    /// Generates one image for the prompt.
    async fn generate_image(&self, prompt: &str) -> Result<ImageRef, PicoError>;
}
