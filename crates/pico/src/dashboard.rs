// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pico dashboard` command implementation.

use chrono::Local;
use colored::Colorize;
use pico_pharmacy::dashboard::ItemCount;
use pico_panels::{DashboardSummary, greeting};

use crate::app::AppContext;

const WEEKDAYS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Prints the greeting, today's figures, alerts, and recent memos.
pub async fn run_dashboard(ctx: &AppContext) {
    let message = greeting(&ctx.gateway).await;
    println!("{}\n", message.bold());

    let summary = DashboardSummary::collect(&ctx.pharmacy, Local::now().naive_local());
    print!("{}", render_summary(&summary));

    let memos = ctx.memos.list_recent().await;
    if !memos.is_empty() {
        println!("\n{}", "메모".bold());
        for memo in memos.iter().take(5) {
            println!("  {} {}", memo.id.dimmed(), memo.content);
        }
    }
}

/// Plain-text rendering of the dashboard figures.
pub fn render_summary(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let snapshot = &summary.snapshot;
    out.push_str(&format!(
        "오늘 판매 {}건 | 재고 부족 {}개 | 유통기한 임박 {}개\n",
        snapshot.total_sales_today, summary.low_stock_count, snapshot.expiring_soon_count
    ));

    if !snapshot.alerts.is_empty() {
        out.push_str("\n알림\n");
        for alert in &snapshot.alerts {
            out.push_str(&format!("  ! {} - {}\n", alert.title, alert.message));
        }
    }

    if !summary.sales_by_category.is_empty() {
        out.push_str("\n최근 7일 카테고리별 판매\n");
        for (category, count) in &summary.sales_by_category {
            out.push_str(&format!("  {category:<10} {count}\n"));
        }
    }

    if !summary.top_today.is_empty() {
        out.push_str("\n오늘의 인기 품목\n");
        for (i, item) in summary.top_today.iter().enumerate() {
            out.push_str(&format!("  {}. {} ({}건)\n", i + 1, item.name, item.count));
        }
    }

    out.push_str("\n잘 팔리는 품목: ");
    out.push_str(&names(&summary.movers.fast));
    out.push_str("\n안 팔리는 품목: ");
    out.push_str(&names(&summary.movers.slow));
    out.push('\n');

    out.push_str("\n요일/시간대별 판매 (9시-19시)\n");
    for (day, row) in summary.peak_hours.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|n| format!("{n:>2}")).collect();
        out.push_str(&format!("  {} {}\n", WEEKDAYS[day], cells.join(" ")));
    }
    out
}

fn names(items: &[ItemCount]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
