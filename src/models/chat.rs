use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{CollectionFilter, EnergyType, FilterRarity, Stage};
use super::summary::{BoosterSummary, CollectionSummary};

// ---------------------------------------------------------------------------
// Role / ApiMessage — conversation turns as sent to the model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: Role,
    pub content: String,
}

// ---------------------------------------------------------------------------
// FilterAction — structured suggestion recovered from assistant text
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    #[default]
    Filter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<FilterRarity>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub energy_type: Option<EnergyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_filter: Option<CollectionFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterAction {
    #[serde(rename = "type", default)]
    pub kind: ActionKind,
    pub label: String,
    pub filters: ActionFilters,
}

// ---------------------------------------------------------------------------
// ChatMessage — one displayed turn
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_action: Option<FilterAction>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into(), None)
    }

    pub fn assistant(content: impl Into<String>, filter_action: Option<FilterAction>) -> Self {
        Self::new(Role::Assistant, content.into(), filter_action)
    }

    fn new(role: Role, content: String, filter_action: Option<FilterAction>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            filter_action,
            timestamp: Utc::now(),
        }
    }

    /// The wire form of this turn (drops id, timestamp and action).
    pub fn to_api(&self) -> ApiMessage {
        ApiMessage {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// ChatContextData / ChatResponse
// ---------------------------------------------------------------------------

/// Everything the prompt builder needs to describe the user's collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContextData {
    pub collection_summary: CollectionSummary,
    pub booster_summaries: Vec<BoosterSummary>,
}

/// Assistant reply with any embedded action already stripped from `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_action: Option<FilterAction>,
}
