// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Simulated supplier that confirms every order after a fixed delay.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pico_config::model::SupplierConfig;
use pico_core::types::OrderItem;
use pico_core::{AdapterType, HealthStatus, PicoError, PluginAdapter, SupplierAdapter};
use tokio::sync::Mutex;
use tracing::info;

/// Confirmation returned for an order with no items.
pub const EMPTY_ORDER_MESSAGE: &str = "주문할 상품이 없습니다.";

/// An order accepted by the simulated supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub items: Vec<OrderItem>,
    pub placed_at: DateTime<Utc>,
}

/// Supplier stand-in: sleeps for the configured latency, always succeeds.
pub struct SimulatedSupplier {
    latency: Duration,
    orders: Mutex<Vec<PlacedOrder>>,
}

impl SimulatedSupplier {
    pub fn new(config: &SupplierConfig) -> Self {
        Self {
            latency: Duration::from_millis(config.latency_ms),
            orders: Mutex::new(Vec::new()),
        }
    }

    /// Orders accepted so far, oldest first.
    pub async fn placed_orders(&self) -> Vec<PlacedOrder> {
        self.orders.lock().await.clone()
    }
}

fn confirmation(items: &[OrderItem]) -> String {
    let list = items
        .iter()
        .map(|item| format!("{} {}개", item.name, item.quantity_to_order))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "다음 품목에 대한 주문이 성공적으로 접수되었습니다: {list}. 2-3일 내로 도착 예정입니다."
    )
}

#[async_trait]
impl PluginAdapter for SimulatedSupplier {
    fn name(&self) -> &str {
        "simulated-supplier"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Supplier
    }

    async fn health_check(&self) -> Result<HealthStatus, PicoError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PicoError> {
        Ok(())
    }
}

#[async_trait]
impl SupplierAdapter for SimulatedSupplier {
    async fn place_order(&self, items: &[OrderItem]) -> Result<String, PicoError> {
        tokio::time::sleep(self.latency).await;

        if items.is_empty() {
            return Ok(EMPTY_ORDER_MESSAGE.to_string());
        }

        self.orders.lock().await.push(PlacedOrder {
            items: items.to_vec(),
            placed_at: Utc::now(),
        });
        info!(items = items.len(), "supplier order placed");
        Ok(confirmation(items))
    }
}
