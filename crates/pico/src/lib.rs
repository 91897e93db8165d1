// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal front end for the Pico pharmacy assistant.
//!
//! Each subcommand of the `pico` binary lives in its own module and runs
//! against one [`app::AppContext`].

pub mod app;
pub mod customers;
pub mod dashboard;
pub mod generate;
pub mod memo;
pub mod reports;
pub mod shell;

use chrono::{DateTime, Local, Utc};

/// Renders a stored timestamp in the operator's local time.
pub fn render_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn render_time_uses_minute_precision() {
        let at = Utc.with_ymd_and_hms(2026, 3, 9, 12, 30, 45).unwrap();
        let rendered = render_time(at);
        assert_eq!(rendered.len(), "2026-03-09 12:30".len());
        assert!(rendered.ends_with(":30"));
    }
}
