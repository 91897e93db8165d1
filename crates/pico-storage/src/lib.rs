// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Pico pharmacy assistant.
//!
//! A single `kv_store` table holds every persisted record partition as a
//! JSON text value under a string key. All access goes through
//! `tokio-rusqlite`'s background thread.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
