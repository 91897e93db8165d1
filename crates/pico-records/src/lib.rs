// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent record stores for the Pico pharmacy assistant.
//!
//! Reports (partitioned by type), memos, and customers are each kept as
//! serialized lists behind a [`pico_core::StorageAdapter`]. Storage
//! failures never surface to callers: they are logged and the in-memory
//! state stays authoritative.

pub mod customers;
pub mod ids;
mod partition;
pub mod memo_store;
pub mod report_store;

pub use customers::{CustomerRegistry, search};
pub use memo_store::MemoStore;
pub use report_store::ReportStore;
