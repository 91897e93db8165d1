// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard greeting and the figures shown beside it.

use chrono::NaiveDateTime;
use pico_agent::ContentGateway;
use pico_pharmacy::dashboard::{self, ItemCount, Movers, PeakGrid};
use pico_pharmacy::{PharmacyDataProvider, PharmacySnapshot};
use tracing::warn;

use crate::prompts::GREETING_PROMPT;

/// Shown when the greeting cannot be generated.
pub const GREETING_FALLBACK: &str = "오늘도 약사님의 하루를 응원합니다! 힘찬 하루 보내세요.";

/// Days covered by the sales-by-category chart.
pub const CATEGORY_WINDOW_DAYS: u64 = 7;

/// A short morning greeting. Never fails.
pub async fn greeting(gateway: &ContentGateway) -> String {
    match gateway.generate_text(GREETING_PROMPT, &[]).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => GREETING_FALLBACK.to_string(),
        Err(e) => {
            warn!(error = %e, "greeting generation failed");
            GREETING_FALLBACK.to_string()
        }
    }
}

/// Everything the dashboard renders for one moment.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub snapshot: PharmacySnapshot,
    pub low_stock_count: usize,
    pub sales_by_category: Vec<(String, u32)>,
    pub peak_hours: PeakGrid,
    pub movers: Movers,
    pub top_today: Vec<ItemCount>,
}

impl DashboardSummary {
    pub fn collect(data: &PharmacyDataProvider, now: NaiveDateTime) -> Self {
        let today = now.date();
        let sales = data.sales_history();
        Self {
            snapshot: data.snapshot_at(today),
            low_stock_count: data.low_stock_items().len(),
            sales_by_category: dashboard::sales_by_category(sales, now, CATEGORY_WINDOW_DAYS),
            peak_hours: dashboard::peak_hours(sales),
            movers: dashboard::movers(sales),
            top_today: dashboard::top_items_on(sales, today, 5),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use pico_config::model::PharmacyConfig;
    use pico_test_utils::MockProvider;

    use super::*;

    fn gateway(mock: &Arc<MockProvider>) -> ContentGateway {
        ContentGateway::new(mock.clone(), mock.clone(), "system")
    }

    #[tokio::test]
    async fn greeting_is_trimmed_model_text() {
        let mock = Arc::new(MockProvider::with_responses(vec!["  좋은 아침이에요!\n".into()]));
        assert_eq!(greeting(&gateway(&mock)).await, "좋은 아침이에요!");
        let request = mock.last_request().await.unwrap();
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].text(), GREETING_PROMPT);
    }

    #[tokio::test]
    async fn greeting_falls_back_on_failure() {
        let mock = Arc::new(MockProvider::new());
        mock.add_error("offline").await;
        assert_eq!(greeting(&gateway(&mock)).await, GREETING_FALLBACK);
    }

    #[tokio::test]
    async fn greeting_falls_back_on_blank_reply() {
        let mock = Arc::new(MockProvider::with_responses(vec!["   ".into()]));
        assert_eq!(greeting(&gateway(&mock)).await, GREETING_FALLBACK);
    }

    #[test]
    fn summary_matches_provider_aggregates() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        let data = PharmacyDataProvider::with_seed(PharmacyConfig::default(), 7, now);
        let summary = DashboardSummary::collect(&data, now);

        assert_eq!(summary.snapshot, data.snapshot_at(now.date()));
        assert_eq!(summary.low_stock_count, data.low_stock_items().len());
        assert!(summary.top_today.len() <= 5);
        let today_total: u32 = summary.top_today.iter().map(|i| i.count).sum();
        assert!(today_total as usize <= summary.snapshot.total_sales_today);
    }
}
