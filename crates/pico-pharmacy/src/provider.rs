// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only inventory and sales data with derived alerts.

use chrono::{Days, Local, NaiveDate, NaiveDateTime};
use pico_config::model::PharmacyConfig;
use pico_core::types::{Alert, AlertKind, InventoryItem, SalesHistoryItem};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::{fixtures, sales};

/// Aggregates derived from inventory and sales for a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PharmacySnapshot {
    pub total_sales_today: usize,
    pub expiring_soon_count: usize,
    pub alerts: Vec<Alert>,
}

/// Fixture inventory plus a synthetic sales history, generated once.
pub struct PharmacyDataProvider {
    config: PharmacyConfig,
    inventory: Vec<InventoryItem>,
    sales_history: Vec<SalesHistoryItem>,
}

impl PharmacyDataProvider {
    /// Build the baseline data set relative to the local clock.
    pub fn new(config: PharmacyConfig) -> Self {
        let now = Local::now().naive_local();
        let mut rng = StdRng::from_entropy();
        Self::generate(config, &mut rng, now)
    }

    /// Deterministic variant for tests and reproducible demos.
    pub fn with_seed(config: PharmacyConfig, seed: u64, now: NaiveDateTime) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(config, &mut rng, now)
    }

    /// Wrap explicit data without generating anything.
    pub fn from_parts(
        config: PharmacyConfig,
        inventory: Vec<InventoryItem>,
        sales_history: Vec<SalesHistoryItem>,
    ) -> Self {
        Self {
            config,
            inventory,
            sales_history,
        }
    }

    fn generate(config: PharmacyConfig, rng: &mut StdRng, now: NaiveDateTime) -> Self {
        let inventory = fixtures::inventory(now.date());
        let sales_history = sales::generate_sales(
            rng,
            &inventory,
            now,
            config.sales_events,
            config.sales_window_days,
        );
        debug!(
            items = inventory.len(),
            sales = sales_history.len(),
            "generated pharmacy baseline"
        );
        Self {
            config,
            inventory,
            sales_history,
        }
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn sales_history(&self) -> &[SalesHistoryItem] {
        &self.sales_history
    }

    pub fn config(&self) -> &PharmacyConfig {
        &self.config
    }

    /// Items below the low-stock threshold, in inventory order.
    pub fn low_stock_items(&self) -> Vec<&InventoryItem> {
        self.inventory
            .iter()
            .filter(|item| item.quantity < self.config.low_stock_threshold)
            .collect()
    }

    /// Sales whose timestamp falls on `today`.
    pub fn sales_on(&self, today: NaiveDate) -> Vec<&SalesHistoryItem> {
        self.sales_history
            .iter()
            .filter(|sale| sale.sold_at.date() == today)
            .collect()
    }

    /// Items expiring on or before `today + expiring_window_days`.
    ///
    /// Already-expired items are included.
    pub fn expiring_soon_count(&self, today: NaiveDate) -> usize {
        let horizon = today
            .checked_add_days(Days::new(u64::from(self.config.expiring_window_days)))
            .unwrap_or(NaiveDate::MAX);
        self.inventory
            .iter()
            .filter(|item| item.expiration_date <= horizon)
            .count()
    }

    /// Low-stock alert first, then expiring-soon, each at most once.
    pub fn alerts(&self, today: NaiveDate) -> Vec<Alert> {
        let mut alerts = Vec::new();

        let low_stock = self.low_stock_items();
        if let Some(first) = low_stock.first() {
            alerts.push(Alert {
                id: "alert_low_stock".to_string(),
                kind: AlertKind::LowStock,
                title: format!("{} 외 {}개 품목 재고 부족", first.name, low_stock.len() - 1),
                message: format!(
                    "재고가 {}개 미만입니다. 주문이 필요합니다.",
                    self.config.low_stock_threshold
                ),
            });
        }

        let expiring = self.expiring_soon_count(today);
        if expiring > 0 {
            alerts.push(Alert {
                id: "alert_expiring".to_string(),
                kind: AlertKind::ExpiringSoon,
                title: format!("유통기한 임박 품목 {expiring}개"),
                message: format!(
                    "{}일 내 유통기한이 만료되는 품목이 있습니다.",
                    self.config.expiring_window_days
                ),
            });
        }

        alerts
    }

    /// All derived aggregates for `today`.
    pub fn snapshot_at(&self, today: NaiveDate) -> PharmacySnapshot {
        PharmacySnapshot {
            total_sales_today: self.sales_on(today).len(),
            expiring_soon_count: self.expiring_soon_count(today),
            alerts: self.alerts(today),
        }
    }

    /// Aggregates for the current local day.
    pub fn snapshot(&self) -> PharmacySnapshot {
        self.snapshot_at(Local::now().date_naive())
    }
}
