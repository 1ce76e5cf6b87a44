//! CLI response types returned as JSON by `revq` commands.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Article, Reviewer};
use crate::enums::{EvaluationAction, Tier};

/// An aspect as rendered to the reviewer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AspectPrompt {
    /// 1-based position, used by `--answer N=...`.
    pub index: usize,
    pub label: String,
    pub prompt: String,
    pub options: Vec<String>,
    /// The reviewer's stored answer, verbatim (may be the skip marker).
    pub stored: Option<String>,
    /// Option to pre-select. `None` when nothing is stored or the stored
    /// answer is no longer one of `options`.
    pub preselected: Option<String>,
}

/// Response from `revq next`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NextResponse {
    pub reviewer: Reviewer,
    pub tier: Option<Tier>,
    pub article: Option<Article>,
    pub aspects: Vec<AspectPrompt>,
    pub message: Option<String>,
}

/// One written answer cell.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnswerView {
    pub label: String,
    pub value: String,
}

/// Response from `revq submit` and `revq skip`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SubmitResponse {
    pub reviewer_id: String,
    pub title: String,
    pub action: EvaluationAction,
    /// First-answer timestamp (unchanged by later edits).
    pub evaluated_at: Option<String>,
    pub answers: Vec<AnswerView>,
}

/// Response from `revq edit list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EditableListResponse {
    pub reviewer_id: String,
    pub skipped_only: bool,
    pub day: Option<NaiveDate>,
    pub titles: Vec<String>,
}

/// Response from `revq edit show`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EditShowResponse {
    pub article: Article,
    pub evaluated_at: Option<String>,
    pub aspects: Vec<AspectPrompt>,
}

/// Inclusive extent of one ordering attribute.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttributeBounds {
    pub attribute: String,
    pub min: u64,
    pub max: u64,
}

/// Response from `revq catalog`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CatalogResponse {
    pub total: usize,
    pub filtered: usize,
    /// Full extent of each attribute over the unfiltered catalog.
    pub bounds: Vec<AttributeBounds>,
    /// Ranges applied to produce `filtered`.
    pub ranges: Vec<AttributeBounds>,
}
