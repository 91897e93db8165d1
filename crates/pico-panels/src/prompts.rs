// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt templates for each panel.
//!
//! Every builder is a pure function of its form so the same inputs always
//! produce the same prompt text.

use chrono::NaiveDate;
use pico_core::forms::{
    BlogForm, CardNewsForm, HiringForm, LaborForm, MedicationForm, ProductForm, VideoForm,
    WorkReportForm,
};
use pico_core::types::Customer;
use serde_json::{Value, json};

use crate::render::display_date;

/// Asks for the one- or two-sentence morning greeting on the dashboard.
pub const GREETING_PROMPT: &str = "당신은 약사님의 AI 비서 '피코'입니다. 약사님에게 아침 인사를 건네며 오늘 하루를 응원하는 친근한 메시지를 생성해주세요. 실제 사람이 말을 건네는 것처럼 자연스럽고 따뜻한 말투를 사용하고, 절대로 마크다운 문법(**, # 등)을 사용하지 마세요. 메시지는 한두 문장으로 간결하게 작성해주세요.";

pub fn hiring_prompt(form: &HiringForm) -> String {
    format!(
        "# AI 약사 채용 공고 작성 요청
## 약국 정보
- 약국명: {}
- 위치: {}
- 주요 진료과: {}
- 일 평균 처방 건수: {}건
- 근무 환경: {}
- 복리후생: {}
## 채용 정보
- 모집 직무: {}
- 필요 역량: {}
- 기대 역할: {}
## 요청 사항
위 정보를 바탕으로, 구직 사이트에 바로 게시할 수 있는 약사 채용 공고를 작성해주세요. 약국 소개, 담당 업무, 자격 요건, 근무 조건 및 복리후생, 지원 방법 순서로 구성하고, 지원자가 우리 약국에서 일하고 싶어지도록 따뜻하고 전문적인 말투를 사용해주세요. 마크다운 문법(**, # 등)을 사용하지 말고, 자연스러운 단락과 제목으로만 구성해주세요.",
        form.pharmacy_name,
        form.location,
        form.main_department,
        form.prescriptions_per_day,
        form.work_environment,
        form.other_perks,
        form.target_position,
        form.required_skills,
        form.expected_role,
    )
}

pub fn product_prompt(form: &ProductForm, realtime_search: bool) -> String {
    let search = if realtime_search {
        "\n## 추가 요청\n최신 건강 트렌드와 신제품 정보를 실시간으로 검색하여 추천에 반영해주세요."
    } else {
        ""
    };
    format!(
        "# AI 약국 제품 추천 요청
## 약국 정보
- 약국명: {}
- 위치 특성: {}
- 주변 병원: {}
- 주요 고객층: {}
- 현재 주력 제품군: {}
## 요청 사항
위 정보를 바탕으로, 우리 약국에 도입하면 좋을 신규 제품 3가지를 추천해주세요. 각 제품별로 아래 내용을 포함하여 구체적으로 제안해주세요. 마크다운 문법(**, # 등)을 사용하지 말고, 실제 보고서처럼 자연스러운 단락과 제목으로 구성해주세요.
- 제품명
- 추천 이유 (우리 약국의 특성과 연관 지어 설명)
- 예상 타겟 고객
- 마케팅 및 진열 전략
{search}",
        form.pharmacy_name,
        form.location,
        form.nearby_hospitals,
        form.main_customers,
        form.current_products,
    )
    .trim()
    .to_string()
}

pub fn labor_prompt(form: &LaborForm) -> String {
    format!(
        "# AI 노무 분석 전문가
## 약국 인력 현황
- 근무 약사 수: {}
- 근무 직원 수: {}
- 주당 총 근무 시간: {}
- 월 총 인건비: {}
- 주요 피크 타임: {}
## 요청 사항
위 데이터를 바탕으로 전국 유사 규모 약국의 평균 데이터와 비교 분석해주세요. 인력 구조의 효율성, 인건비의 적정성을 평가하고, 개선을 위한 구체적인 제안 2-3가지를 제시해주세요. 모든 텍스트 필드(analysisSummary, description 등)에는 마크다운 문법을 절대 사용하지 말고, 완결된 문장으로 서술해주세요.
## 전국 평균 데이터 (가상)
- 약사 수: 1.5명
- 직원 수: 1명
- 월 총 인건비: 1,300만 원
- 약사 1인당 인건비: 867만 원
## 응답 형식
반드시 아래 JSON 스키마에 맞춰 응답해주세요.",
        form.pharmacists, form.staff, form.total_hours, form.total_wages, form.peak_times,
    )
}

fn comparison_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "user": { "type": "NUMBER" },
            "average": { "type": "NUMBER" }
        }
    })
}

/// Response schema of the labor analysis.
pub fn labor_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "comparison": {
                "type": "OBJECT",
                "properties": {
                    "pharmacists": comparison_schema(),
                    "staff": comparison_schema(),
                    "totalWages": comparison_schema(),
                    "wagesPerPharmacist": comparison_schema()
                }
            },
            "analysisSummary": {
                "type": "STRING",
                "description": "마크다운 문법 없이, 완결된 문장으로 요약해주세요."
            },
            "suggestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": {
                            "type": "STRING",
                            "description": "마크다운 문법 없이, 완결된 문장으로 설명해주세요."
                        },
                        "expectedEffect": { "type": "STRING" }
                    }
                }
            }
        }
    })
}

pub fn card_news_prompt(form: &CardNewsForm) -> String {
    format!(
        "# AI 카드뉴스 제작 요청\n## 주제: {}\n## 핵심 타겟: {}\n## 필수 포함 정보: {}\n## 요청 사항: 위 정보를 바탕으로, 인스타그램에 바로 올릴 수 있는 카드뉴스 콘텐츠를 10장 이내로 제작해주세요. 각 장의 내용을 명확히 구분하고, 이모지를 활용하여 가독성을 높여주세요. 결과물에 마크다운 문법(예: **, #, - 등)을 **절대** 사용하지 마세요. 각 카드 내용은 완결된 문장으로 작성해주세요.\n\n[1번 카드]\n제목...\n\n[2번 카드]\n내용...",
        form.topic, form.target_audience, form.required_info,
    )
}

/// Illustration request sent alongside a card-news generation.
pub fn card_news_image_prompt(form: &CardNewsForm) -> String {
    format!(
        "'{}' 주제를 상징하는 심플한 일러스트. 밝고 깨끗한 스타일. 배경에 글자나 텍스트가 전혀 없는 이미지를 생성해주세요.",
        form.topic
    )
}

pub fn blog_prompt(form: &BlogForm) -> String {
    format!(
        "# AI 블로그 포스팅 작성 요청\n## 주제: {}\n## 핵심 키워드: {}\n## 핵심 타겟: {}\n## 글의 톤앤매너: {}\n## 요청 사항: 위 정보를 바탕으로, 약국 블로그에 게시할 전문적인 정보성 포스팅을 **완성된 문서 형태**로 작성해주세요. SEO(검색엔진 최적화)를 고려하여 키워드를 자연스럽게 본문에 녹여내고, 독자의 흥미를 유발할 수 있는 도입부와 명확한 결론을 포함해주세요. 결과물에 마크다운 문법(예: **, #, - 등)을 **절대** 사용하지 마세요. 바로 블로그에 게시할 수 있는 **완성된 글**의 형태로, 자연스러운 단락과 소제목으로만 구성해주세요.",
        form.topic, form.keywords, form.target_audience, form.tone,
    )
}

pub fn video_prompt(form: &VideoForm) -> String {
    format!(
        "# AI 영상 스크립트 작성 요청\n## 영상 주제 및 컨셉: {}\n## 요청 사항: 위 컨셉에 맞춰 1분 내외의 유튜브 숏폼(Shorts) 영상 스크립트를 작성해주세요. 약사가 시청자에게 직접 말하는 형태로, 각 장면(Scene)별로 행동 지침(Action)과 대사(Dialogue)를 구분하여 작성해주세요. 시청자의 흥미를 끌 수 있는 도입부와 간결하고 명확한 정보 전달에 초점을 맞춰주세요. 결과물에는 마크다운 문법을 사용하지 마세요.",
        form.prompt
    )
}

pub fn medication_prompt(form: &MedicationForm, realtime_search: bool) -> String {
    let patient = &form.patient_info;
    let med_list = form
        .medications
        .iter()
        .map(|m| format!("- {} ({}, {}, {})", m.name, m.dosage, m.frequency, m.duration))
        .collect::<Vec<_>>()
        .join("\n");
    let search = if realtime_search {
        "\n## 추가 요청\n입력된 약물과 환자 상태에 대한 최신 의학 정보(상호작용, 부작용, 가이드라인 등)를 실시간으로 검색하여 복약 지도에 반영해주세요."
    } else {
        ""
    };
    format!(
        "# AI 복약 지도 생성 요청
## 환자 정보
- 나이/특성: {}
- 주요 증상: {}
- 병용 약물: {}
- 기타 주의사항: {}
## 처방 약물 정보
{med_list}
## 요청 사항
위 정보를 바탕으로, 보호자가 이해하기 쉽고 친절한 말투로 복약 지도문을 생성해주세요. 각 약물별 복용법과 주의사항을 명확히 구분하고, 일반적인 생활 수칙과 당부사항을 포함하여 안심할 수 있는 메시지를 전달해주세요. 반드시 아래 JSON 스키마에 맞춰 응답해주세요. 모든 텍스트 필드에는 마크다운 문법(예: **, #, - 등)을 **절대** 사용하지 말고, 보호자가 이해하기 쉬운 완결된 문장으로 작성해주세요.
{search}",
        patient.age, patient.condition, patient.other_meds, patient.precautions,
    )
    .trim()
    .to_string()
}

/// Response schema of the medication guidance.
pub fn medication_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "greeting": { "type": "STRING" },
            "medications": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "instructions": { "type": "STRING" },
                        "precautions": { "type": "STRING" }
                    }
                }
            },
            "generalAdvice": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "closing": { "type": "STRING" }
        },
        "required": ["greeting", "medications", "generalAdvice", "closing"]
    })
}

pub fn customer_message_prompt(customer: &Customer, message_type: &str) -> String {
    let purchases = if customer.purchase_history.is_empty() {
        "최근 구매 이력 없음".to_string()
    } else {
        customer
            .purchase_history
            .iter()
            .map(|p| format!("- {}: {} ({}개)", p.date, p.item, p.quantity))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let communications = if customer.communication_history.is_empty() {
        "과거 소통 기록 없음".to_string()
    } else {
        customer
            .communication_history
            .iter()
            .map(|c| {
                format!(
                    "- {}: [{}] {}",
                    display_date(c.date.date_naive()),
                    c.kind,
                    c.message
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "# AI 고객 메시지 생성 요청
당신은 친절하고 전문적인 약사입니다. 아래 고객 정보를 바탕으로 요청된 유형의 메시지를 작성해주세요. 고객의 상황과 구매 이력, 그리고 과거 소통 내용을 자연스럽게 반영하여, 따뜻하고 개인화된 느낌을 주는 것이 중요합니다.

## 고객 정보
- 이름: {}
- 나이: {}세
- 성별: {}
- 특징: {}
- 약사 메모: {}
- 최근 구매 이력:
{purchases}
- 과거 소통 기록:
{communications}

## 요청 사항
- 메시지 유형: {message_type}
- 작성 지침: 고객에게 보내는 문자 메시지 형식이므로, 이모지를 적절히 사용하여 친근하게 작성해주세요. 과거 소통 기록을 참고하여 메시지가 자연스럽게 이어지도록 해주세요. 마크다운은 사용하지 마세요.",
        customer.name,
        customer.age,
        customer.gender,
        customer.tags.join(", "),
        customer.notes,
    )
}

/// Today's figures the work report is written from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkReportFacts {
    pub date: NaiveDate,
    pub sales_count: usize,
    /// Names of the best sellers of the day, best first.
    pub top_items: Vec<String>,
    pub alert_titles: Vec<String>,
}

pub fn work_report_prompt(form: &WorkReportForm, facts: &WorkReportFacts) -> String {
    let top_items = if facts.top_items.is_empty() {
        "판매 기록 없음".to_string()
    } else {
        facts.top_items.join(", ")
    };
    let alerts = if facts.alert_titles.is_empty() {
        "특이사항 없음".to_string()
    } else {
        facts.alert_titles.join(", ")
    };

    format!(
        "# AI 근무 보고서 작성 요청
당신은 약국 관리 AI 비서 '피코'입니다. 아래 오늘 약국 현황 데이터와 약사님의 메모를 바탕으로, 간결하고 전문적인 스타일의 일일 근무 보고서를 **완성된 문서 형태**로 작성해주세요. 보고서는 마크다운 형식 없이, 자연스러운 문장과 단락으로 구성되어야 합니다.

## 오늘 약국 현황 ({})
- 총 판매 건수: {}건
- 주요 판매 제품: {top_items}
- 시스템 알림: {alerts}

## 약사 메모
- 작성자: {}
- 내용: {}

## 보고서 작성 항목
1.  **금일 주요 업무 내용**: 판매 현황과 약사 메모를 종합하여 오늘 있었던 핵심 업무들을 요약해주세요.
2.  **특이사항**: 시스템 알림이나 약사 메모 내용 중 특별히 기록해둘 만한 사항을 간략히 정리해주세요.
3.  **내일 예정된 주요 업무**: 재고 부족 알림 등을 바탕으로 내일 해야 할 일(예: 부족 품목 주문)을 제안해주세요.
4.  **약사 피드백**: 약사 메모 내용을 보고서 형식으로 자연스럽게 포함시켜주세요.

## 최종 결과물 형식
- 마크다운 문법(예: **, #, - 등)을 **절대** 사용하지 마세요.
- 실제 보고서처럼 제목, 각 항목, 그리고 내용으로 구성된 완벽한 문서 형식으로만 생성해야 합니다.",
        display_date(facts.date),
        facts.sales_count,
        form.pharmacist_name,
        form.notes,
    )
}
