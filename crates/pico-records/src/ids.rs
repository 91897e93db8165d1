// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timestamp-based record ids that never repeat within a store.

use std::sync::atomic::{AtomicI64, Ordering};

/// Issues `<prefix>-<unix-millis>` ids, strictly increasing.
///
/// Two ids requested in the same millisecond get consecutive values.
#[derive(Debug)]
pub struct IdClock {
    prefix: &'static str,
    last: AtomicI64,
}

impl IdClock {
    pub const fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            last: AtomicI64::new(0),
        }
    }

    /// Next id for wall-clock time `now_millis`.
    pub fn next_at(&self, now_millis: i64) -> String {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_millis.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        format!("{}-{}", self.prefix, now_millis.max(previous + 1))
    }

    /// Next id for the current time.
    pub fn next(&self) -> String {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    /// Account for an id loaded from storage so new ids sort after it.
    pub fn observe(&self, id: &str) {
        if let Some(millis) = id
            .strip_prefix(self.prefix)
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|n| n.parse::<i64>().ok())
        {
            self.last.fetch_max(millis, Ordering::SeqCst);
        }
    }
}
