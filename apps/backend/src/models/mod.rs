//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Re-export shared types from revision-core
pub use revision_core::analytics::{
    DifficultyCount, GroupConfidence, PatternSummary, TrendPoint, TrendStatus, VolumePoint,
};
pub use revision_core::types::{Difficulty, Platform, RecallCategory};

// === Database Entity Types ===

/// Practice problem stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: i64,
    pub title: String,
    pub platform: String,
    pub data_structure: String,
    pub pattern: String,
    pub difficulty: String,
    pub description: String,
    pub brute_force: String,
    pub better_approach: String,
    pub optimal_approach: String,
    pub code: String,
    pub next_revision_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Problem annotated with the confidence of its most recent recall log
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProblemWithConfidence {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub problem: Problem,
    pub latest_confidence: Option<i32>,
}

/// Recall attempt stored in PostgreSQL. Logs are immutable: inserted
/// once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecallLog {
    pub id: i64,
    pub problem_id: i64,
    pub confidence: i32,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Recall log joined with its problem's pattern, the snapshot row the
/// pattern aggregations run over
#[derive(Debug, Clone, FromRow)]
pub struct RecallLogWithPattern {
    pub confidence: i32,
    pub pattern: String,
    pub created_at: DateTime<Utc>,
}

/// Validated and trimmed problem fields ready for storage
#[derive(Debug, Clone)]
pub struct ProblemDraft {
    pub title: String,
    pub platform: String,
    pub data_structure: String,
    pub pattern: String,
    pub difficulty: String,
    pub description: String,
    pub brute_force: String,
    pub better_approach: String,
    pub optimal_approach: String,
    pub code: String,
}

// === API Request/Response Types ===

/// Create/update payload for a problem. Every field is optional so the
/// same shape serves partial updates; create validates the required ones.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemPayload {
    pub title: Option<String>,
    pub platform: Option<String>,
    pub data_structure: Option<String>,
    pub pattern: Option<String>,
    pub difficulty: Option<String>,
    pub description: Option<String>,
    pub brute_force: Option<String>,
    pub better_approach: Option<String>,
    pub optimal_approach: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

// Recall types

/// Raw recall submission. Both fields deserialize as optional JSON
/// numbers so the handler can reject missing or fractional values with
/// a domain message instead of a serde rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogRecallRequest {
    pub problem_id: Option<f64>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecallResponse {
    pub category: RecallCategory,
    pub next_revision_at: DateTime<Utc>,
}

// Revision types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternAnalyticsResponse {
    pub weak_patterns: Vec<PatternSummary>,
    pub strong_patterns: Vec<PatternSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub by_difficulty: Vec<GroupConfidence>,
    pub by_data_structure: Vec<GroupConfidence>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionHubResponse {
    pub today: Vec<ProblemWithConfidence>,
    pub upcoming: Vec<ProblemWithConfidence>,
    pub pattern: PatternAnalyticsResponse,
    pub overview: OverviewResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub total_problems_solved: i64,
    pub total_revisions: i64,
    pub problems_by_difficulty: Vec<DifficultyCount>,
    pub weak_patterns: Vec<PatternSummary>,
    pub strong_patterns: Vec<PatternSummary>,
    pub pattern_distribution: Vec<PatternSummary>,
    pub data_structure_strength: Vec<GroupConfidence>,
    pub weakest_data_structures: Vec<GroupConfidence>,
    pub revisions_over_time: Vec<VolumePoint>,
    pub confidence_trend: Vec<TrendPoint>,
    pub trend_status: TrendStatus,
}
