//! Core revision library shared by the AlgoRecall backend.
//!
//! Provides:
//! - Recall scheduling policy (confidence -> category and next revision date)
//! - Analytics aggregations over problem and recall-log snapshots
//! - Shared types (Platform, Difficulty, RecallCategory)

pub mod analytics;
pub mod schedule;
pub mod types;

pub use analytics::{
    confidence_trend, difficulty_breakdown, grouped_confidence_overview, pattern_distribution,
    revisions_over_time, sort_weakest_first, strong_patterns, trend_status, weak_patterns,
    DifficultyCount, GroupConfidence, PatternSummary, TrendDirection, TrendPoint, TrendStatus,
    VolumePoint,
};
pub use schedule::{compute_next_revision_at, derive_recall_category, is_valid_confidence};
pub use types::{Difficulty, Platform, RecallCategory};
