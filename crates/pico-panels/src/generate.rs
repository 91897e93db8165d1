// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One generation request per panel submit.
//!
//! [`generate`] picks the gateway mode for the panel, builds the prompt,
//! and shapes the answer into a [`ReportDraft`]. Nothing is persisted here.

use chrono::NaiveDate;
use pico_agent::ContentGateway;
use pico_core::error::PicoError;
use pico_core::forms::{
    ContentForm, CustomerMessageForm, HiringForm, LaborAnalysis, LaborForm, LaborSnapshot,
    MedicationForm, MedicationGuidance, ProductForm, WorkReportForm,
};
use pico_core::types::{ChatMessage, Customer, ReportDraft, ReportType};
use pico_core::ReportForm;
use pico_pharmacy::PharmacyDataProvider;
use pico_pharmacy::dashboard::top_items_on;
use tracing::{debug, warn};

use crate::prompts::{self, WorkReportFacts};
use crate::render::{display_date, labor_share_text, labor_title, medication_text, video_title};

/// Greeting used for guidance synthesized from a search-grounded answer.
pub const GROUNDED_GUIDANCE_GREETING: &str = "실시간 검색 기반 복약지도입니다.";

pub const GROUNDED_GUIDANCE_CLOSING: &str = "자세한 내용은 참고 자료를 확인해주세요.";

/// Form inputs of one panel submit.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelRequest {
    Hiring(HiringForm),
    Product {
        form: ProductForm,
        realtime_search: bool,
    },
    Labor(LaborForm),
    Content(ContentForm),
    Medication {
        form: MedicationForm,
        realtime_search: bool,
    },
    Customer {
        customer: Customer,
        message_type: String,
    },
    WorkReport {
        form: WorkReportForm,
        facts: WorkReportFacts,
    },
}

impl PanelRequest {
    pub fn report_type(&self) -> ReportType {
        match self {
            PanelRequest::Hiring(_) => ReportType::Hiring,
            PanelRequest::Product { .. } => ReportType::Product,
            PanelRequest::Labor(_) => ReportType::Labor,
            PanelRequest::Content(_) => ReportType::Content,
            PanelRequest::Medication { .. } => ReportType::Medication,
            PanelRequest::Customer { .. } => ReportType::Customer,
            PanelRequest::WorkReport { .. } => ReportType::WorkReport,
        }
    }

    /// Whether the request goes through live web search.
    pub fn is_grounded(&self) -> bool {
        matches!(
            self,
            PanelRequest::Product {
                realtime_search: true,
                ..
            } | PanelRequest::Medication {
                realtime_search: true,
                ..
            }
        )
    }
}

impl WorkReportFacts {
    /// Sales count, top three sellers, and alert titles for `today`.
    pub fn collect(data: &PharmacyDataProvider, today: NaiveDate) -> Self {
        Self {
            date: today,
            sales_count: data.sales_on(today).len(),
            top_items: top_items_on(data.sales_history(), today, 3)
                .into_iter()
                .map(|item| item.name)
                .collect(),
            alert_titles: data.alerts(today).into_iter().map(|a| a.title).collect(),
        }
    }
}

/// Runs one generation and returns the report it would save.
///
/// `history` is the visible chat transcript; panels that continue the
/// conversation send it along. `today` dates the titles.
pub async fn generate(
    gateway: &ContentGateway,
    request: &PanelRequest,
    history: &[ChatMessage],
    today: NaiveDate,
) -> Result<ReportDraft, PicoError> {
    debug!(report_type = %request.report_type(), grounded = request.is_grounded(), "generating report");
    match request {
        PanelRequest::Hiring(form) => {
            let text = gateway
                .generate_text(&prompts::hiring_prompt(form), history)
                .await?;
            Ok(ReportDraft::new(
                format!("{} {} 채용 공고", form.pharmacy_name, form.target_position),
                text,
                ReportForm::Hiring(form.clone()),
            ))
        }
        PanelRequest::Product {
            form,
            realtime_search,
        } => {
            let prompt = prompts::product_prompt(form, *realtime_search);
            let title = format!("{} 맞춤 제품 추천", form.pharmacy_name);
            let report_form = ReportForm::Product(form.clone());
            if *realtime_search {
                let answer = gateway.generate_grounded(&prompt).await?;
                Ok(ReportDraft::new(title, answer.text, report_form).with_sources(answer.sources))
            } else {
                let text = gateway.generate_text(&prompt, history).await?;
                Ok(ReportDraft::new(title, text, report_form))
            }
        }
        PanelRequest::Labor(form) => {
            let analysis: LaborAnalysis = gateway
                .generate_structured(&prompts::labor_prompt(form), &prompts::labor_schema(), history)
                .await?;
            Ok(ReportDraft::new(
                labor_title(today),
                labor_share_text(&analysis),
                ReportForm::Labor(LaborSnapshot {
                    user_input: form.clone(),
                    analysis_data: Some(analysis),
                }),
            ))
        }
        PanelRequest::Content(form) => generate_content(gateway, form, history).await,
        PanelRequest::Medication {
            form,
            realtime_search,
        } => {
            let prompt = prompts::medication_prompt(form, *realtime_search);
            let title = format!(
                "{} 복약지도 ({})",
                form.patient_info.condition,
                display_date(today)
            );
            let report_form = ReportForm::Medication(form.clone());
            if *realtime_search {
                let answer = gateway.generate_grounded(&prompt).await?;
                let guidance = MedicationGuidance {
                    greeting: GROUNDED_GUIDANCE_GREETING.to_string(),
                    medications: Vec::new(),
                    general_advice: vec![answer.text],
                    closing: GROUNDED_GUIDANCE_CLOSING.to_string(),
                };
                Ok(ReportDraft::new(title, medication_text(&guidance), report_form)
                    .with_sources(answer.sources))
            } else {
                let guidance: MedicationGuidance = gateway
                    .generate_structured(&prompt, &prompts::medication_schema(), history)
                    .await?;
                Ok(ReportDraft::new(title, medication_text(&guidance), report_form))
            }
        }
        PanelRequest::Customer {
            customer,
            message_type,
        } => {
            // Customer messages are written without the chat context.
            let text = gateway
                .generate_text(&prompts::customer_message_prompt(customer, message_type), &[])
                .await?;
            let mut form = CustomerMessageForm::new(&customer.id, &customer.name);
            form.message_type = message_type.clone();
            Ok(ReportDraft::new(
                format!("{}님을 위한 메시지", customer.name),
                text,
                ReportForm::Customer(form),
            ))
        }
        PanelRequest::WorkReport { form, facts } => {
            let text = gateway
                .generate_text(&prompts::work_report_prompt(form, facts), history)
                .await?;
            Ok(ReportDraft::new(
                format!("일일 근무 보고서 ({})", display_date(facts.date)),
                text,
                ReportForm::WorkReport(form.clone()),
            ))
        }
    }
}

async fn generate_content(
    gateway: &ContentGateway,
    form: &ContentForm,
    history: &[ChatMessage],
) -> Result<ReportDraft, PicoError> {
    let report_form = ReportForm::Content(form.clone());
    match form {
        ContentForm::CardNews(card) => {
            let text = gateway
                .generate_text(&prompts::card_news_prompt(card), history)
                .await?;
            // The card text is kept even when the illustration fails.
            let image = match gateway
                .generate_image(&prompts::card_news_image_prompt(card))
                .await
            {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!(error = %e, "card news illustration skipped");
                    None
                }
            };
            Ok(ReportDraft::new(format!("카드뉴스: {}", card.topic), text, report_form)
                .with_image(image))
        }
        ContentForm::Blog(blog) => {
            let text = gateway
                .generate_text(&prompts::blog_prompt(blog), history)
                .await?;
            Ok(ReportDraft::new(format!("블로그: {}", blog.topic), text, report_form))
        }
        ContentForm::Video(video) => {
            let text = gateway
                .generate_text(&prompts::video_prompt(video), history)
                .await?;
            Ok(ReportDraft::new(video_title(&video.prompt), text, report_form))
        }
    }
}
