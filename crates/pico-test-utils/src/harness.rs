// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end tests.
//!
//! `TestHarness` pairs a scripted [`MockProvider`] with a SQLite database
//! in a temporary directory and a configuration pointing at it, so a test
//! can assemble the full application without network or shared state.

use std::sync::Arc;

use pico_config::PicoConfig;
use pico_core::{PicoError, StorageAdapter};
use pico_storage::SqliteStorage;

use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    system_instruction: Option<String>,
    max_tool_iterations: Option<usize>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            system_instruction: None,
            max_tool_iterations: None,
        }
    }

    /// Set mock provider responses.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_max_tool_iterations(mut self, max: usize) -> Self {
        self.max_tool_iterations = Some(max);
        self
    }

    /// Build the harness, creating and migrating the temp database.
    pub async fn build(self) -> Result<TestHarness, PicoError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| PicoError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = PicoConfig::default();
        config.storage.database_path = db_path.to_string_lossy().to_string();
        config.gemini.api_key = Some("test-key".to_string());
        config.supplier.latency_ms = 0;
        if let Some(instruction) = self.system_instruction {
            config.agent.system_instruction = instruction;
        }
        if let Some(max) = self.max_tool_iterations {
            config.chat.max_tool_iterations = max;
        }

        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;

        let mock_provider = Arc::new(if self.responses.is_empty() {
            MockProvider::new()
        } else {
            MockProvider::with_responses(self.responses)
        });

        Ok(TestHarness {
            mock_provider,
            storage: Arc::new(storage),
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A test environment with a mock provider and temp storage.
pub struct TestHarness {
    /// The scripted completion and image provider.
    pub mock_provider: Arc<MockProvider>,
    /// SQLite storage adapter (temp DB, cleaned up on drop).
    pub storage: Arc<SqliteStorage>,
    /// Configuration whose storage path points at the temp DB.
    pub config: PicoConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// The storage as a trait object.
    pub fn storage_adapter(&self) -> Arc<dyn StorageAdapter> {
        self.storage.clone()
    }

    /// Flushes the database. Call before inspecting the file directly.
    pub async fn shutdown(&self) -> Result<(), PicoError> {
        self.storage.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn harness_storage_round_trips() {
        let harness = TestHarness::builder().build().await.unwrap();
        let storage = harness.storage_adapter();
        storage.put("memos", "[]").await.unwrap();
        assert_eq!(storage.get("memos").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.get("customers").await.unwrap(), None);
    }

    #[tokio::test]
    async fn builder_options_reach_config() {
        let harness = TestHarness::builder()
            .with_system_instruction("You are a test assistant.")
            .with_max_tool_iterations(2)
            .with_mock_responses(vec!["hello".into()])
            .build()
            .await
            .unwrap();
        assert_eq!(harness.config.agent.system_instruction, "You are a test assistant.");
        assert_eq!(harness.config.chat.max_tool_iterations, 2);
        assert_eq!(harness.config.supplier.latency_ms, 0);
        assert!(harness.config.storage.database_path.ends_with("test.db"));
    }
}
