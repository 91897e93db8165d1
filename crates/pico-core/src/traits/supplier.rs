// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Supplier adapter trait for placing supply orders.

use async_trait::async_trait;

use crate::error::PicoError;
use crate::traits::adapter::PluginAdapter;
use crate::types::OrderItem;

/// Adapter for an upstream supplier.
#[async_trait]
pub trait SupplierAdapter: PluginAdapter {
    /// Places an order and returns a human-readable confirmation.
    async fn place_order(&self, items: &[OrderItem]) -> Result<String, PicoError>;
}
