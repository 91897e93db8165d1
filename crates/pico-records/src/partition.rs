// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading and persisting one serialized list under one storage key.

use pico_core::{PicoError, StorageAdapter};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Result of reading a partition.
#[derive(Debug)]
pub(crate) enum Loaded<T> {
    Present(Vec<T>),
    Missing,
    Corrupt,
    /// The backend failed; the stored value is unknown and must not be
    /// overwritten.
    Unavailable,
}

impl<T> Loaded<T> {
    /// Stored items, an empty list for a missing or malformed value, or
    /// `None` when storage could not be read.
    pub(crate) fn usable(self) -> Option<Vec<T>> {
        match self {
            Loaded::Present(items) => Some(items),
            Loaded::Missing | Loaded::Corrupt => Some(Vec::new()),
            Loaded::Unavailable => None,
        }
    }
}

/// Error for a write attempted against a partition that could not be read.
pub(crate) fn unavailable(key: &str) -> PicoError {
    PicoError::Storage {
        source: format!("partition `{key}` could not be read").into(),
    }
}

pub(crate) async fn load<T: DeserializeOwned>(storage: &dyn StorageAdapter, key: &str) -> Loaded<T> {
    let raw = match storage.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Loaded::Missing,
        Err(e) => {
            warn!(key, error = %e, "failed to read partition; will retry on next access");
            return Loaded::Unavailable;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Loaded::Present(items),
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable partition");
            Loaded::Corrupt
        }
    }
}

/// Write the whole list; failures are logged and reported as `false`.
pub(crate) async fn persist<T: Serialize>(
    storage: &dyn StorageAdapter,
    key: &str,
    items: &[T],
) -> bool {
    let json = match serde_json::to_string(items) {
        Ok(json) => json,
        Err(e) => {
            warn!(key, error = %e, "failed to serialize partition");
            return false;
        }
    };
    match storage.put(key, &json).await {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "failed to persist partition; keeping in-memory state");
            false
        }
    }
}
