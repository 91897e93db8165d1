// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Form, generate, save cycle of one panel.
//!
//! A [`PanelController`] shows at most one active report. Generation is
//! refused while a report is active; the user starts a new draft first.
//! Every generation carries a [`RequestToken`] and only the answer to the
//! latest token may touch the panel, so a late reply to an abandoned
//! request is dropped instead of overwriting newer state.

use std::sync::Arc;

use chrono::NaiveDate;
use pico_agent::ContentGateway;
use pico_core::error::{GROUNDING_APOLOGY, MALFORMED_RESPONSE_NOTICE, PicoError};
use pico_core::types::{ChatMessage, Report, ReportDraft, ReportType};
use pico_records::ReportStore;
use tracing::{debug, info, warn};

use crate::generate::{PanelRequest, generate};
use crate::render::{labor_title, local_day};

/// Asked before a report is deleted.
pub const DELETE_CONFIRMATION: &str = "정말로 이 보고서를 삭제하시겠습니까?";

/// Identifies one generation request of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// What became of a finished generation.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Persisted and now the active report.
    Saved(Report),
    /// Nothing was saved; `content` is what the panel shows instead.
    Failed { error: PicoError, content: String },
    /// The answer belonged to a request that is no longer the latest.
    Discarded,
}

pub struct PanelController {
    report_type: ReportType,
    store: Arc<ReportStore>,
    gateway: Arc<ContentGateway>,
    active: Option<Report>,
    generating: bool,
    latest: u64,
}

impl PanelController {
    pub fn new(
        report_type: ReportType,
        store: Arc<ReportStore>,
        gateway: Arc<ContentGateway>,
    ) -> Self {
        Self {
            report_type,
            store,
            gateway,
            active: None,
            generating: false,
            latest: 0,
        }
    }

    pub fn report_type(&self) -> ReportType {
        self.report_type
    }

    pub fn active(&self) -> Option<&Report> {
        self.active.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Whether a submit would be accepted right now.
    pub fn can_generate(&self) -> bool {
        self.active.is_none() && !self.generating
    }

    /// Saved reports of this panel, most recent first.
    pub async fn list(&self) -> Vec<Report> {
        self.store.list_recent(self.report_type).await
    }

    /// Starts a generation and returns its token.
    pub fn begin(&mut self) -> Result<RequestToken, PicoError> {
        if self.active.is_some() {
            return Err(PicoError::Validation(
                "a report is open; start a new draft before generating again".into(),
            ));
        }
        if self.generating {
            return Err(PicoError::Validation(
                "a generation is already running for this panel".into(),
            ));
        }
        self.latest += 1;
        self.generating = true;
        debug!(report_type = %self.report_type, token = self.latest, "generation started");
        Ok(RequestToken(self.latest))
    }

    /// Applies the result of the generation identified by `token`.
    ///
    /// Only the latest token is honored. A successful draft is persisted
    /// and becomes the active report; a failure leaves the panel empty.
    pub async fn apply(
        &mut self,
        token: RequestToken,
        result: Result<ReportDraft, PicoError>,
        grounded: bool,
    ) -> SubmitOutcome {
        if token.0 != self.latest || !self.generating {
            info!(
                report_type = %self.report_type,
                token = token.0,
                latest = self.latest,
                "discarding stale generation result"
            );
            return SubmitOutcome::Discarded;
        }
        self.generating = false;

        let draft = match result {
            Ok(draft) => draft,
            Err(error) => {
                let content = failure_content(&error, self.report_type, grounded);
                return SubmitOutcome::Failed { error, content };
            }
        };

        match self.store.add(self.report_type, draft).await {
            Ok(report) => {
                info!(report_type = %self.report_type, id = %report.id, "report saved");
                self.active = Some(report.clone());
                SubmitOutcome::Saved(report)
            }
            Err(error) => {
                warn!(report_type = %self.report_type, error = %error, "generated report rejected");
                let content = error.user_message().to_string();
                SubmitOutcome::Failed { error, content }
            }
        }
    }

    /// Generates and saves a report in one step.
    pub async fn submit(
        &mut self,
        request: &PanelRequest,
        history: &[ChatMessage],
        today: NaiveDate,
    ) -> Result<SubmitOutcome, PicoError> {
        if request.report_type() != self.report_type {
            return Err(PicoError::Validation(format!(
                "a {} request cannot be submitted to the {} panel",
                request.report_type(),
                self.report_type
            )));
        }
        let token = self.begin()?;
        let result = generate(&self.gateway, request, history, today).await;
        Ok(self.apply(token, result, request.is_grounded()).await)
    }

    /// Clears the active report and invalidates any pending generation.
    pub fn new_draft(&mut self) {
        self.latest += 1;
        self.generating = false;
        self.active = None;
    }

    /// Makes a saved report active. Pending generations are invalidated.
    pub async fn select(&mut self, id: &str) -> Result<&Report, PicoError> {
        let report = self
            .store
            .get(self.report_type, id)
            .await
            .ok_or_else(|| PicoError::NotFound {
                kind: "report",
                id: id.to_string(),
            })?;
        self.latest += 1;
        self.generating = false;
        Ok(&*self.active.insert(report))
    }

    /// Saves hand-edited content of the active report.
    pub async fn save_edit(&mut self, content: impl Into<String>) -> Result<Report, PicoError> {
        let Some(active) = self.active.as_ref() else {
            return Err(PicoError::Validation("no report is open".into()));
        };
        let mut report = active.clone();
        report.content = content.into();
        if report.report_type == ReportType::Labor {
            report.title = labor_title(local_day(report.created_at));
        }

        if !self.store.update(report.clone()).await {
            self.active = None;
            return Err(PicoError::NotFound {
                kind: "report",
                id: report.id,
            });
        }
        debug!(id = %report.id, "report edited");
        self.active = Some(report.clone());
        Ok(report)
    }

    /// Deletes a saved report once the user confirmed it.
    ///
    /// Returns `false` when unconfirmed or when nothing matched. Deleting
    /// the active report returns the panel to the new-draft state.
    pub async fn delete(&mut self, id: &str, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        let removed = self.store.delete(self.report_type, id).await;
        if removed && self.active.as_ref().is_some_and(|r| r.id == id) {
            self.new_draft();
        }
        removed
    }
}

/// Text shown in place of a report when generation fails.
pub fn failure_content(error: &PicoError, report_type: ReportType, grounded: bool) -> String {
    match error {
        PicoError::MalformedResponse { raw, .. } if report_type == ReportType::Medication => {
            format!("오류: AI 응답을 처리하는 데 실패했습니다.\n\n{raw}")
        }
        PicoError::MalformedResponse { .. } => MALFORMED_RESPONSE_NOTICE.to_string(),
        PicoError::Provider { .. } | PicoError::Timeout { .. } if grounded => {
            GROUNDING_APOLOGY.to_string()
        }
        other => other.user_message().to_string(),
    }
}
