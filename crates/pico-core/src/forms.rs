// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Form shapes for each panel, unified as the [`ReportForm`] tagged union.
//!
//! A saved report keeps a snapshot of the inputs that produced it. The
//! snapshot is one variant per panel so the store can hold every report
//! category while callers still get static field access.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::ReportType;

/// Hiring post inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HiringForm {
    pub pharmacy_name: String,
    pub location: String,
    pub main_department: String,
    pub prescriptions_per_day: String,
    pub work_environment: String,
    pub other_perks: String,
    pub target_position: String,
    pub required_skills: String,
    pub expected_role: String,
}

impl Default for HiringForm {
    fn default() -> Self {
        Self {
            pharmacy_name: "튼튼약국".into(),
            location: "서울시 강남구, 소아과 건물 1층".into(),
            main_department: "소아과, 내과".into(),
            prescriptions_per_day: "250".into(),
            work_environment: "가족같은 분위기, 스탭 간 협업 중시".into(),
            other_perks: "점심 식사 제공, 명절 상여금, 퇴직금 별도".into(),
            target_position: "신입/경력 약사".into(),
            required_skills: "꼼꼼함, 소아과 처방 조제 유경험자 우대".into(),
            expected_role: "처방 조제 및 복약 지도, 재고 관리".into(),
        }
    }
}

/// Product recommendation inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductForm {
    pub pharmacy_name: String,
    pub location: String,
    pub nearby_hospitals: String,
    pub main_customers: String,
    pub current_products: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            pharmacy_name: "튼튼약국".into(),
            location: "서울시 강남구, 소아과 건물 1층".into(),
            nearby_hospitals: "강남튼튼소아과".into(),
            main_customers: "영유아 및 부모, 30-40대 직장인".into(),
            current_products: "어린이 영양제, 감기약, 소화제 위주".into(),
        }
    }
}

/// Staffing figures for labor analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LaborForm {
    pub pharmacists: String,
    pub staff: String,
    pub total_hours: String,
    pub total_wages: String,
    pub peak_times: String,
}

impl Default for LaborForm {
    fn default() -> Self {
        Self {
            pharmacists: "2".into(),
            staff: "1".into(),
            total_hours: "45".into(),
            total_wages: "15000000".into(),
            peak_times: "평일 오전 9-11시, 오후 4-6시".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub user: f64,
    pub average: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborComparison {
    pub pharmacists: Comparison,
    pub staff: Comparison,
    pub total_wages: Comparison,
    pub wages_per_pharmacist: Comparison,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborSuggestion {
    pub title: String,
    pub description: String,
    pub expected_effect: String,
}

/// Structured answer of the labor analysis panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborAnalysis {
    pub comparison: LaborComparison,
    pub analysis_summary: String,
    pub suggestions: Vec<LaborSuggestion>,
}

/// Labor inputs plus the analysis they produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborSnapshot {
    pub user_input: LaborForm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_data: Option<LaborAnalysis>,
}

/// Content creator sub-types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    CardNews,
    Blog,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardNewsForm {
    pub topic: String,
    pub target_audience: String,
    pub required_info: String,
}

impl Default for CardNewsForm {
    fn default() -> Self {
        Self {
            topic: "환절기 어린이 면역력 강화법".into(),
            target_audience: "3-7세 자녀를 둔 부모".into(),
            required_info: "비타민D, 아연의 중요성 포함".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogForm {
    pub topic: String,
    pub keywords: String,
    pub target_audience: String,
    pub tone: String,
}

impl Default for BlogForm {
    fn default() -> Self {
        Self {
            topic: "오메가3, 왜 꼭 챙겨 먹어야 할까?".into(),
            keywords: "오메가3, 혈행개선, EPA, DHA, 영양제 추천".into(),
            target_audience: "건강에 관심 많은 40-50대".into(),
            tone: "전문적이면서도 이해하기 쉬운".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoForm {
    pub prompt: String,
}

impl Default for VideoForm {
    fn default() -> Self {
        Self {
            prompt: "약사가 직접 알려주는 올바른 인공눈물 사용법, 유튜브 숏폼 영상".into(),
        }
    }
}

/// Content creator inputs, one variant per sub-type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ContentForm {
    CardNews(CardNewsForm),
    Blog(BlogForm),
    Video(VideoForm),
}

impl ContentForm {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentForm::CardNews(_) => ContentKind::CardNews,
            ContentForm::Blog(_) => ContentKind::Blog,
            ContentForm::Video(_) => ContentKind::Video,
        }
    }

    /// Default inputs for the given sub-type.
    pub fn default_for(kind: ContentKind) -> Self {
        match kind {
            ContentKind::CardNews => ContentForm::CardNews(CardNewsForm::default()),
            ContentKind::Blog => ContentForm::Blog(BlogForm::default()),
            ContentKind::Video => ContentForm::Video(VideoForm::default()),
        }
    }
}

impl Default for ContentForm {
    fn default() -> Self {
        ContentForm::CardNews(CardNewsForm::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatientInfo {
    pub age: String,
    pub condition: String,
    pub other_meds: String,
    pub precautions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MedicationInfo {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

/// Patient and prescription inputs for medication guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MedicationForm {
    pub patient_info: PatientInfo,
    pub medications: Vec<MedicationInfo>,
}

impl Default for MedicationForm {
    fn default() -> Self {
        Self {
            patient_info: PatientInfo {
                age: "7".into(),
                condition: "급성 중이염".into(),
                other_meds: "없음".into(),
                precautions: "항생제 알러지 없음".into(),
            },
            medications: vec![
                MedicationInfo {
                    name: "아목시실린 시럽".into(),
                    dosage: "5ml".into(),
                    frequency: "1일 3회".into(),
                    duration: "7일".into(),
                },
                MedicationInfo {
                    name: "부루펜 시럽".into(),
                    dosage: "4ml".into(),
                    frequency: "필요시 4-6시간 간격".into(),
                    duration: "5일".into(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationInstruction {
    pub name: String,
    pub instructions: String,
    pub precautions: String,
}

/// Structured answer of the medication guidance panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationGuidance {
    pub greeting: String,
    pub medications: Vec<MedicationInstruction>,
    pub general_advice: Vec<String>,
    pub closing: String,
}

/// Message types offered by the customer panel.
pub const CUSTOMER_MESSAGE_TYPES: [&str; 4] = [
    "복약지도 리마인더",
    "건강 팁 제공",
    "안부 인사",
    "영양제 재구매 제안",
];

/// Inputs for an outbound customer message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CustomerMessageForm {
    pub customer_id: String,
    pub customer_name: String,
    pub message_type: String,
}

impl CustomerMessageForm {
    pub fn new(customer_id: impl Into<String>, customer_name: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            customer_name: customer_name.into(),
            message_type: CUSTOMER_MESSAGE_TYPES[0].to_string(),
        }
    }
}

/// Daily work report inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkReportForm {
    pub pharmacist_name: String,
    pub notes: String,
}

impl Default for WorkReportForm {
    fn default() -> Self {
        Self {
            pharmacist_name: "김약사".into(),
            notes: "오후에 단골 손님 박도윤 님 방문, 혈압약 관련 장시간 상담 진행. 특별한 재고 문제는 없었음."
                .into(),
        }
    }
}

/// The inputs that produced a report, keyed by report category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ReportForm {
    Hiring(HiringForm),
    Product(ProductForm),
    Labor(LaborSnapshot),
    Content(ContentForm),
    Medication(MedicationForm),
    Customer(CustomerMessageForm),
    WorkReport(WorkReportForm),
}

impl ReportForm {
    pub fn report_type(&self) -> ReportType {
        match self {
            ReportForm::Hiring(_) => ReportType::Hiring,
            ReportForm::Product(_) => ReportType::Product,
            ReportForm::Labor(_) => ReportType::Labor,
            ReportForm::Content(_) => ReportType::Content,
            ReportForm::Medication(_) => ReportType::Medication,
            ReportForm::Customer(_) => ReportType::Customer,
            ReportForm::WorkReport(_) => ReportType::WorkReport,
        }
    }

    /// Sub-type for content reports, `None` for everything else.
    pub fn content_kind(&self) -> Option<ContentKind> {
        match self {
            ReportForm::Content(form) => Some(form.kind()),
            _ => None,
        }
    }
}
