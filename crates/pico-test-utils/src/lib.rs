// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Pico tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - scripted completion and image provider that records requests
//! - [`MemoryStorage`] - in-memory key-value storage with failure injection
//! - [`TestHarness`] - mock provider plus a temp SQLite database

pub mod harness;
pub mod memory_storage;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use memory_storage::MemoryStorage;
pub use mock_provider::{MOCK_IMAGE_BASE64, MockProvider};
