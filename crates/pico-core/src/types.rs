// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits, stores, and panels.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::forms::{ContentKind, ReportForm};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
    Supplier,
}

// --- Reports and memos ---

/// Report categories. Each category is stored in its own partition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Hiring,
    Product,
    Labor,
    Content,
    Medication,
    Customer,
    WorkReport,
}

impl ReportType {
    /// Storage key of the partition holding this category.
    pub fn storage_key(&self) -> String {
        format!("reports:{self}")
    }

    /// Korean tab label.
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Hiring => "AI 채용 비서",
            ReportType::Product => "AI 제품 추천",
            ReportType::Labor => "AI 노무 분석",
            ReportType::Content => "AI 콘텐츠 제작",
            ReportType::Medication => "AI 복약지도",
            ReportType::Customer => "AI 고객 관리",
            ReportType::WorkReport => "AI 근무 보고서",
        }
    }
}

/// A web source returned by a search-grounded completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A generated image, kept inline as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub mime_type: String,
    pub data_base64: String,
}

impl ImageRef {
    /// Renders the image as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data_base64)
    }
}

/// A saved, user-editable artifact produced by one generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub title: String,
    pub content: String,
    pub form: ReportForm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<ContentKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub sources: Vec<Citation>,
    pub created_at: DateTime<Utc>,
}

/// A report before the store has assigned its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub title: String,
    pub content: String,
    pub form: ReportForm,
    pub sub_type: Option<ContentKind>,
    pub image: Option<ImageRef>,
    pub sources: Vec<Citation>,
}

impl ReportDraft {
    /// Creates a draft with no sub-type, image, or sources.
    pub fn new(title: impl Into<String>, content: impl Into<String>, form: ReportForm) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            sub_type: form.content_kind(),
            form,
            image: None,
            sources: Vec::new(),
        }
    }

    /// The category implied by the form snapshot.
    pub fn report_type(&self) -> ReportType {
        self.form.report_type()
    }

    pub fn with_sources(mut self, sources: Vec<Citation>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_image(mut self, image: Option<ImageRef>) -> Self {
        self.image = image;
        self
    }
}

/// A free-text sticky note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// --- Customers ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "남")]
    #[strum(serialize = "남")]
    Male,
    #[serde(rename = "여")]
    #[strum(serialize = "여")]
    Female,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub date: NaiveDate,
    pub item: String,
    pub quantity: u32,
}

/// One outbound message saved to a customer's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationRecord {
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// Display order is insertion order; matching ignores order.
    pub tags: Vec<String>,
    pub notes: String,
    pub last_visit: NaiveDate,
    pub total_spent: u64,
    pub purchase_history: Vec<PurchaseRecord>,
    /// Most recent first.
    pub communication_history: Vec<CommunicationRecord>,
}

impl Customer {
    /// Case-insensitive substring match against the name or any tag.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// Input for registering a new customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub tags: Vec<String>,
    pub notes: String,
}

// --- Pharmacy data ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub expiration_date: NaiveDate,
}

/// One synthetic sale of an inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesHistoryItem {
    pub id: String,
    pub item_id: String,
    pub name: String,
    pub category: String,
    pub sold_at: NaiveDateTime,
    pub quantity: u32,
    pub unit_price: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowStock,
    ExpiringSoon,
}

/// Derived from inventory on every read; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

/// One line of a supply order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    #[serde(
        rename = "quantityToOrder",
        default = "default_order_quantity",
        deserialize_with = "deserialize_quantity"
    )]
    pub quantity_to_order: u32,
}

fn default_order_quantity() -> u32 {
    50
}

/// Services declare quantities as JSON numbers, which may arrive as floats.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "quantity must be a non-negative number, got {value}"
        )));
    }
    Ok(value.round() as u32)
}

// --- Chat transcript ---

/// Unique identifier for a transcript message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A message in the visible chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: ChatRole,
    pub parts: Vec<String>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: ChatRole::User,
            parts: vec![text.into()],
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: ChatRole::Assistant,
            parts: vec![text.into()],
        }
    }

    /// All parts joined with newlines.
    pub fn text(&self) -> String {
        self.parts.join("\n")
    }

    /// True when any part is blank.
    pub fn has_empty_part(&self) -> bool {
        self.parts.is_empty() || self.parts.iter().any(|p| p.trim().is_empty())
    }
}

// --- Completion service ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

/// A structured request from the model to run a named action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// The application's answer to a [`FunctionCall`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub response: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnPart {
    Text(String),
    FunctionCall(FunctionCall),
    FunctionResponse(FunctionResponse),
}

/// One turn of the conversation sent to the completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub parts: Vec<TurnPart>,
}

impl Turn {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            parts: vec![TurnPart::Text(text.into())],
        }
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            parts: vec![TurnPart::Text(text.into())],
        }
    }

    /// Concatenated text parts, ignoring function calls and responses.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                TurnPart::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// A function the model may call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A request to the completion service.
///
/// The gateway fills only the fields its mode needs: `response_schema` for
/// structured output, `tools` for the chat assistant, `use_search` for
/// grounded answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Overrides the provider's default model.
    pub model: Option<String>,
    pub system_instruction: Option<String>,
    pub contents: Vec<Turn>,
    pub response_schema: Option<serde_json::Value>,
    pub tools: Vec<FunctionDeclaration>,
    pub use_search: bool,
}

/// A normalized answer from the completion service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub text: String,
    pub function_calls: Vec<FunctionCall>,
    pub citations: Vec<Citation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn report_type_storage_keys() {
        assert_eq!(ReportType::Hiring.storage_key(), "reports:hiring");
        assert_eq!(ReportType::WorkReport.storage_key(), "reports:work_report");
    }

    #[test]
    fn report_type_round_trips_through_strings() {
        use strum::IntoEnumIterator;
        for ty in ReportType::iter() {
            let parsed = ReportType::from_str(&ty.to_string()).expect("should parse back");
            assert_eq!(ty, parsed);
        }
        assert_eq!(ReportType::iter().count(), 7);
    }

    #[test]
    fn order_item_accepts_float_quantities() {
        let item: OrderItem =
            serde_json::from_str(r#"{"name":"타이레놀","quantityToOrder":50.0}"#).unwrap();
        assert_eq!(item.quantity_to_order, 50);

        let defaulted: OrderItem = serde_json::from_str(r#"{"name":"훼스탈"}"#).unwrap();
        assert_eq!(defaulted.quantity_to_order, 50);

        let negative = serde_json::from_str::<OrderItem>(r#"{"name":"x","quantityToOrder":-1}"#);
        assert!(negative.is_err());
    }

    #[test]
    fn gender_serializes_as_korean() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"남\"");
        assert_eq!(Gender::from_str("여").unwrap(), Gender::Female);
    }

    #[test]
    fn customer_matching_is_case_insensitive() {
        let customer = Customer {
            id: "c".into(),
            name: "Kim".into(),
            age: 30,
            gender: Gender::Male,
            tags: vec!["Omega3".into()],
            notes: String::new(),
            last_visit: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            total_spent: 0,
            purchase_history: vec![],
            communication_history: vec![],
        };
        assert!(customer.matches("kim"));
        assert!(customer.matches("OMEGA"));
        assert!(!customer.matches("lee"));
    }

    #[test]
    fn chat_message_empty_part_detection() {
        assert!(!ChatMessage::user("hi").has_empty_part());
        assert!(ChatMessage::user("   ").has_empty_part());
    }

    #[test]
    fn image_ref_data_url() {
        let img = ImageRef {
            mime_type: "image/png".into(),
            data_base64: "AAAA".into(),
        };
        assert_eq!(img.to_data_url(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn turn_text_skips_function_parts() {
        let turn = Turn {
            role: TurnRole::Model,
            parts: vec![
                TurnPart::Text("a".into()),
                TurnPart::FunctionCall(FunctionCall {
                    id: None,
                    name: "placeOrder".into(),
                    args: serde_json::json!({}),
                }),
                TurnPart::Text("b".into()),
            ],
        };
        assert_eq!(turn.text(), "ab");
    }
}
