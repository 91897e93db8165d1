// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for key-value persistence backends.

use async_trait::async_trait;

use crate::error::PicoError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for string key-value persistence.
///
/// Values are serialized entity lists. A missing key is `Ok(None)`, not an
/// error; writes replace the whole value.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), PicoError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), PicoError>;

    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, PicoError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<(), PicoError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), PicoError>;

    /// Lists stored keys starting with `prefix`, sorted.
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, PicoError>;
}
