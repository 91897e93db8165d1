// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod provider;
pub mod storage;
pub mod supplier;

pub use adapter::PluginAdapter;
pub use provider::{CompletionProvider, ImageProvider};
pub use storage::StorageAdapter;
pub use supplier::SupplierAdapter;
