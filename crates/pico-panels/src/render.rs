// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text renderings of structured answers and report titles.

use std::fmt::Write;

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use pico_core::forms::{LaborAnalysis, MedicationGuidance};

/// Korean short date, e.g. `2026. 10. 18.`
pub fn display_date(date: NaiveDate) -> String {
    format!("{}. {}. {}.", date.year(), date.month(), date.day())
}

/// Local calendar day of a stored timestamp.
pub fn local_day(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

pub fn labor_title(date: NaiveDate) -> String {
    format!("노무 분석 ({})", display_date(date))
}

/// Shareable summary of a labor analysis.
pub fn labor_share_text(analysis: &LaborAnalysis) -> String {
    let mut text = format!(
        "노무 분석 요약 보고서\n\n■ 종합 분석\n{}\n\n■ AI 제안사항\n",
        analysis.analysis_summary
    );
    for (i, s) in analysis.suggestions.iter().enumerate() {
        let _ = write!(
            text,
            "{}. {}\n   - 내용: {}\n   - 기대 효과: {}\n",
            i + 1,
            s.title,
            s.description,
            s.expected_effect
        );
    }
    text
}

/// Guidance text handed to the patient or guardian.
pub fn medication_text(guidance: &MedicationGuidance) -> String {
    let mut text = format!("{}\n\n", guidance.greeting);
    for med in &guidance.medications {
        let _ = write!(
            text,
            "■ {}\n- 복용법: {}\n- 주의사항: {}\n\n",
            med.name, med.instructions, med.precautions
        );
    }
    text.push_str("■ 생활 가이드\n");
    for advice in &guidance.general_advice {
        let _ = writeln!(text, "- {advice}");
    }
    let _ = write!(text, "\n{}", guidance.closing);
    text
}

/// Video titles keep the first 20 characters of the concept.
pub fn video_title(prompt: &str) -> String {
    let head: String = prompt.chars().take(20).collect();
    format!("영상 스크립트: {head}...")
}
