// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard aggregates over the sales history.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike};
use pico_core::types::SalesHistoryItem;
use serde::Serialize;

use crate::sales::{CLOSING_HOUR, OPENING_HOUR};

/// Number of hour columns in the peak-hours grid.
pub const HOUR_SLOTS: usize = (CLOSING_HOUR - OPENING_HOUR + 1) as usize;

/// Sales count per weekday (Sunday first) and opening hour.
pub type PeakGrid = [[u32; HOUR_SLOTS]; 7];

/// Sales count for one inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemCount {
    pub item_id: String,
    pub name: String,
    pub count: u32,
}

/// Fast and slow moving items over the whole history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movers {
    pub fast: Vec<ItemCount>,
    pub slow: Vec<ItemCount>,
}

/// Units sold per category since midnight `days` days before `now`.
///
/// Sorted by count descending, then category name.
pub fn sales_by_category(
    sales: &[SalesHistoryItem],
    now: NaiveDateTime,
    days: u64,
) -> Vec<(String, u32)> {
    let since = now
        .date()
        .checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN);

    let mut totals: HashMap<&str, u32> = HashMap::new();
    for sale in sales.iter().filter(|s| s.sold_at.date() >= since) {
        *totals.entry(sale.category.as_str()).or_default() += sale.quantity;
    }

    let mut rows: Vec<(String, u32)> = totals
        .into_iter()
        .map(|(category, count)| (category.to_string(), count))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

/// Weekday x hour histogram; sales outside opening hours are ignored.
pub fn peak_hours(sales: &[SalesHistoryItem]) -> PeakGrid {
    let mut grid = [[0u32; HOUR_SLOTS]; 7];
    for sale in sales {
        let hour = sale.sold_at.hour();
        if (OPENING_HOUR..=CLOSING_HOUR).contains(&hour) {
            let day = sale.sold_at.weekday().num_days_from_sunday() as usize;
            grid[day][(hour - OPENING_HOUR) as usize] += 1;
        }
    }
    grid
}

fn count_by_item<'a>(sales: impl Iterator<Item = &'a SalesHistoryItem>) -> Vec<ItemCount> {
    let mut counts: HashMap<&str, ItemCount> = HashMap::new();
    for sale in sales {
        counts
            .entry(sale.item_id.as_str())
            .or_insert_with(|| ItemCount {
                item_id: sale.item_id.clone(),
                name: sale.name.clone(),
                count: 0,
            })
            .count += sale.quantity;
    }
    let mut rows: Vec<ItemCount> = counts.into_values().collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.item_id.cmp(&b.item_id)));
    rows
}

/// Top five sellers, and the bottom five with the slowest first.
pub fn movers(sales: &[SalesHistoryItem]) -> Movers {
    let ranked = count_by_item(sales.iter());
    let fast = ranked.iter().take(5).cloned().collect();
    let slow = ranked
        .iter()
        .rev()
        .filter(|item| item.count > 0)
        .take(5)
        .cloned()
        .collect();
    Movers { fast, slow }
}

/// Best-selling items on `day`, at most `n`.
pub fn top_items_on(sales: &[SalesHistoryItem], day: NaiveDate, n: usize) -> Vec<ItemCount> {
    let mut ranked = count_by_item(sales.iter().filter(|s| s.sold_at.date() == day));
    ranked.truncate(n);
    ranked
}
