// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synthetic sales history generation.

use chrono::{Days, NaiveDateTime, NaiveTime};
use pico_core::types::{InventoryItem, SalesHistoryItem};
use rand::Rng;

/// First and last hour (inclusive) a sale can be stamped with.
pub const OPENING_HOUR: u32 = 9;
pub const CLOSING_HOUR: u32 = 19;

const MIN_PRICE: u32 = 1_000;
const MAX_PRICE: u32 = 10_999;

/// Generate `count` single-unit sales spread over the last `window_days` days.
///
/// Each sale references a random inventory item, lands on a whole hour
/// between [`OPENING_HOUR`] and [`CLOSING_HOUR`], and carries a random unit
/// price. Ids are `sale_<index>`.
pub fn generate_sales<R: Rng + ?Sized>(
    rng: &mut R,
    inventory: &[InventoryItem],
    now: NaiveDateTime,
    count: usize,
    window_days: u32,
) -> Vec<SalesHistoryItem> {
    if inventory.is_empty() || window_days == 0 {
        return Vec::new();
    }

    (0..count)
        .filter_map(|i| {
            let item = &inventory[rng.gen_range(0..inventory.len())];
            let days_back = rng.gen_range(0..window_days);
            let hour = rng.gen_range(OPENING_HOUR..=CLOSING_HOUR);
            let day = now.date().checked_sub_days(Days::new(u64::from(days_back)))?;
            let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
            Some(SalesHistoryItem {
                id: format!("sale_{i}"),
                item_id: item.id.clone(),
                name: item.name.clone(),
                category: item.category.clone(),
                sold_at: day.and_time(time),
                quantity: 1,
                unit_price: rng.gen_range(MIN_PRICE..=MAX_PRICE),
            })
        })
        .collect()
}
