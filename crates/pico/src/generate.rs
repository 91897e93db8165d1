// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pico generate` command implementation.
//!
//! Reads an optional TOML form, runs the panel, and prints the saved
//! report. Without `--form` the panel's default inputs are used.

use std::path::Path;

use chrono::Local;
use clap::ValueEnum;
use colored::Colorize;
use pico_core::forms::{HiringForm, LaborForm, MedicationForm, ProductForm, WorkReportForm};
use pico_core::types::Report;
use pico_core::{ContentForm, ContentKind, PicoError};
use pico_panels::{PanelRequest, SubmitOutcome, WorkReportFacts};
use serde::de::DeserializeOwned;

use crate::app::AppContext;

/// Panels reachable from `pico generate`.
///
/// Customer messages go through `pico customers message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PanelKind {
    Hiring,
    Product,
    Labor,
    Content,
    Medication,
    WorkReport,
}

/// Content sub-type selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContentArg {
    CardNews,
    Blog,
    Video,
}

impl From<ContentArg> for ContentKind {
    fn from(arg: ContentArg) -> Self {
        match arg {
            ContentArg::CardNews => ContentKind::CardNews,
            ContentArg::Blog => ContentKind::Blog,
            ContentArg::Video => ContentKind::Video,
        }
    }
}

pub async fn run_generate(
    ctx: &AppContext,
    panel: PanelKind,
    form: Option<&Path>,
    search: bool,
    sub_type: ContentArg,
) -> Result<(), PicoError> {
    let request = build_request(ctx, panel, form, search, sub_type.into()).await?;
    let mut controller = ctx.panel(request.report_type());
    let today = Local::now().date_naive();

    match controller.submit(&request, &[], today).await? {
        SubmitOutcome::Saved(report) => {
            print_report(&report);
            Ok(())
        }
        SubmitOutcome::Failed { error, content } => {
            eprintln!("{}", content.red());
            Err(error)
        }
        SubmitOutcome::Discarded => Ok(()),
    }
}

/// Builds the panel request from defaults or the form file.
pub async fn build_request(
    ctx: &AppContext,
    panel: PanelKind,
    form: Option<&Path>,
    realtime_search: bool,
    kind: ContentKind,
) -> Result<PanelRequest, PicoError> {
    Ok(match panel {
        PanelKind::Hiring => PanelRequest::Hiring(load_form::<HiringForm>(form).await?),
        PanelKind::Product => PanelRequest::Product {
            form: load_form::<ProductForm>(form).await?,
            realtime_search,
        },
        PanelKind::Labor => PanelRequest::Labor(load_form::<LaborForm>(form).await?),
        PanelKind::Content => PanelRequest::Content(load_content_form(form, kind).await?),
        PanelKind::Medication => PanelRequest::Medication {
            form: load_form::<MedicationForm>(form).await?,
            realtime_search,
        },
        PanelKind::WorkReport => PanelRequest::WorkReport {
            form: load_form::<WorkReportForm>(form).await?,
            facts: WorkReportFacts::collect(&ctx.pharmacy, Local::now().date_naive()),
        },
    })
}

async fn read_form_file(path: &Path) -> Result<String, PicoError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PicoError::Validation(format!("cannot read form {}: {e}", path.display())))
}

fn parse_form<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, PicoError> {
    toml::from_str(content)
        .map_err(|e| PicoError::Validation(format!("invalid form {}: {e}", path.display())))
}

async fn load_form<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T, PicoError> {
    match path {
        Some(path) => parse_form(path, &read_form_file(path).await?),
        None => Ok(T::default()),
    }
}

async fn load_content_form(path: Option<&Path>, kind: ContentKind) -> Result<ContentForm, PicoError> {
    let Some(path) = path else {
        return Ok(ContentForm::default_for(kind));
    };
    let content = read_form_file(path).await?;
    Ok(match kind {
        ContentKind::CardNews => ContentForm::CardNews(parse_form(path, &content)?),
        ContentKind::Blog => ContentForm::Blog(parse_form(path, &content)?),
        ContentKind::Video => ContentForm::Video(parse_form(path, &content)?),
    })
}

/// Prints a report with its sources and image note.
pub fn print_report(report: &Report) {
    println!("{} {}", report.title.bold(), format!("[{}]", report.id).dimmed());
    println!("{}", report.report_type.label().dimmed());
    println!();
    println!("{}", report.content);
    if report.image.is_some() {
        println!("\n{}", "(이미지 포함)".dimmed());
    }
    if !report.sources.is_empty() {
        println!("\n{}", "참고 자료".bold());
        for source in &report.sources {
            match &source.title {
                Some(title) => println!("  - {title} <{}>", source.uri),
                None => println!("  - {}", source.uri),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hiring_form_parses_from_camel_case_toml() {
        let toml = r#"
pharmacyName = "행복약국"
location = "부산"
mainDepartment = "내과"
prescriptionsPerDay = "120"
workEnvironment = "조용함"
otherPerks = "주차 지원"
targetPosition = "경력 약사"
requiredSkills = "복약지도"
expectedRole = "조제"
"#;
        let form: HiringForm = parse_form(Path::new("hiring.toml"), toml).unwrap();
        assert_eq!(form.pharmacy_name, "행복약국");
    }

    #[test]
    fn unknown_form_keys_are_rejected() {
        let err = parse_form::<LaborForm>(Path::new("labor.toml"), "pharmacist = \"2\"").unwrap_err();
        assert!(matches!(err, PicoError::Validation(ref m) if m.contains("labor.toml")));
    }

    #[test]
    fn content_arg_maps_to_kind() {
        assert_eq!(ContentKind::from(ContentArg::Video), ContentKind::Video);
    }
}
