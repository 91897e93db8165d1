// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pico reports` command implementation.

use colored::Colorize;
use pico_core::PicoError;
use pico_core::types::{Report, ReportType};
use rustyline::DefaultEditor;

use crate::app::AppContext;
use crate::generate::print_report;
use crate::render_time;

/// Lists saved reports, newest first, optionally for one type.
pub async fn run_list(ctx: &AppContext, report_type: Option<ReportType>) {
    let reports = match report_type {
        Some(report_type) => ctx.reports.list_recent(report_type).await,
        None => ctx.reports.list_all_recent().await,
    };
    if reports.is_empty() {
        println!("{}", "저장된 보고서가 없습니다.".dimmed());
        return;
    }
    for report in &reports {
        println!("{}", list_line(report));
    }
}

fn list_line(report: &Report) -> String {
    format!(
        "{}  {}  {}  {}",
        report.id.dimmed(),
        render_time(report.created_at),
        report.report_type.label(),
        report.title
    )
}

pub async fn run_show(ctx: &AppContext, id: &str) -> Result<(), PicoError> {
    let report = ctx.reports.find(id).await.ok_or_else(|| PicoError::NotFound {
        kind: "report",
        id: id.to_string(),
    })?;
    print_report(&report);
    Ok(())
}

/// Deletes a report after confirmation, or immediately with `--yes`.
pub async fn run_delete(ctx: &AppContext, id: &str, yes: bool) -> Result<(), PicoError> {
    let report = ctx.reports.find(id).await.ok_or_else(|| PicoError::NotFound {
        kind: "report",
        id: id.to_string(),
    })?;

    let confirmed = yes || confirm(&format!("{} ({})", pico_panels::DELETE_CONFIRMATION, report.title))?;
    let mut panel = ctx.panel(report.report_type);
    if panel.delete(&report.id, confirmed).await {
        println!("{} {}", "삭제됨:".green(), report.title);
    } else {
        println!("{}", "삭제를 취소했습니다.".dimmed());
    }
    Ok(())
}

/// Asks a yes/no question on the terminal. Anything but `y` is no.
pub fn confirm(question: &str) -> Result<bool, PicoError> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| PicoError::Internal(format!("failed to initialize readline: {e}")))?;
    match rl.readline(&format!("{question} [y/N] ")) {
        Ok(answer) => Ok(matches!(answer.trim(), "y" | "Y" | "yes")),
        Err(_) => Ok(false),
    }
}
