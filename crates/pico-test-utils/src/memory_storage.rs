// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory key-value storage with failure injection.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use pico_core::types::{AdapterType, HealthStatus};
use pico_core::{PicoError, PluginAdapter, StorageAdapter};

/// A `StorageAdapter` backed by a `BTreeMap`.
///
/// Writes can be made to fail to exercise quota-exceeded handling.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
    fail_reads: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put`/`remove` fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `get` fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Store a raw value, bypassing failure injection.
    pub async fn set_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }

    /// Read a raw value.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }

    fn check_write(&self) -> Result<(), PicoError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PicoError::Storage {
                source: "quota exceeded".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, PicoError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PicoError> {
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for MemoryStorage {
    async fn initialize(&self) -> Result<(), PicoError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), PicoError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, PicoError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PicoError::Storage {
                source: "read failed".into(),
            });
        }
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), PicoError> {
        self.check_write()?;
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PicoError> {
        self.check_write()?;
        self.entries.lock().await.remove(key);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, PicoError> {
        Ok(self
            .entries
            .lock()
            .await
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn injected_write_failure_leaves_state_untouched() {
        let storage = MemoryStorage::new();
        storage.put("memos", "[]").await.unwrap();
        storage.fail_writes(true);
        assert!(storage.put("memos", "[1]").await.is_err());
        assert_eq!(storage.get("memos").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.write_count(), 1);
    }
}
