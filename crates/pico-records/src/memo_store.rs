// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Short free-text notes kept on the dashboard.

use std::sync::Arc;

use chrono::Utc;
use pico_core::types::Memo;
use pico_core::{PicoError, StorageAdapter};
use tokio::sync::OnceCell;
use tokio::sync::Mutex;

use crate::ids::IdClock;
use crate::partition;

/// Storage key of the memo partition.
pub const MEMOS_KEY: &str = "memos";

/// Create/delete memo list persisted under [`MEMOS_KEY`].
pub struct MemoStore {
    storage: Arc<dyn StorageAdapter>,
    memos: OnceCell<Mutex<Vec<Memo>>>,
    ids: IdClock,
}

impl MemoStore {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            storage,
            memos: OnceCell::new(),
            ids: IdClock::new("memo"),
        }
    }

    /// The cached memo list, loading it on first use. `None` while storage
    /// cannot be read; the next call tries again.
    async fn memos(&self) -> Option<&Mutex<Vec<Memo>>> {
        self.memos
            .get_or_try_init(|| async {
                let loaded = partition::load::<Memo>(self.storage.as_ref(), MEMOS_KEY)
                    .await
                    .usable()
                    .ok_or_else(|| partition::unavailable(MEMOS_KEY))?;
                for memo in &loaded {
                    self.ids.observe(&memo.id);
                }
                Ok::<_, PicoError>(Mutex::new(loaded))
            })
            .await
            .ok()
    }

    /// Memos in insertion order.
    pub async fn list(&self) -> Vec<Memo> {
        match self.memos().await {
            Some(memos) => memos.lock().await.clone(),
            None => Vec::new(),
        }
    }

    /// Memos, newest first.
    pub async fn list_recent(&self) -> Vec<Memo> {
        let mut memos = self.list().await;
        memos.reverse();
        memos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        memos
    }

    /// Add a memo. Blank or whitespace-only content is ignored, as is any
    /// add while the stored list cannot be read.
    pub async fn add(&self, content: &str) -> Option<Memo> {
        if content.trim().is_empty() {
            return None;
        }
        let mut memos = self.memos().await?.lock().await;
        let memo = Memo {
            id: self.ids.next(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        memos.push(memo.clone());
        partition::persist(self.storage.as_ref(), MEMOS_KEY, &memos).await;
        Some(memo)
    }

    /// Delete the memo with `id`. Returns `false` when absent.
    pub async fn delete(&self, id: &str) -> bool {
        let Some(memos) = self.memos().await else {
            return false;
        };
        let mut memos = memos.lock().await;
        let before = memos.len();
        memos.retain(|m| m.id != id);
        if memos.len() == before {
            return false;
        }
        partition::persist(self.storage.as_ref(), MEMOS_KEY, &memos).await;
        true
    }
}
