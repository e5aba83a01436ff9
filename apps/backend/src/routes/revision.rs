//! Revision schedule and analytics endpoints

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::*;
use crate::AppState;
use revision_core::analytics::{
    confidence_trend, difficulty_breakdown, grouped_confidence_overview, pattern_distribution,
    revisions_over_time, sort_weakest_first, strong_patterns, trend_status, weak_patterns,
};

/// GET /api/revision/today
pub async fn today(State(state): State<AppState>) -> Result<Json<Vec<ProblemWithConfidence>>> {
    let problems = due_today(&state, Utc::now()).await?;
    Ok(Json(problems))
}

/// GET /api/revision/session/queue
pub async fn session_queue(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProblemWithConfidence>>> {
    let problems = due_today(&state, Utc::now()).await?;
    Ok(Json(problems))
}

/// GET /api/revision/upcoming
pub async fn upcoming(State(state): State<AppState>) -> Result<Json<Vec<ProblemWithConfidence>>> {
    let problems = state.db.problems_upcoming(Utc::now()).await?;
    Ok(Json(problems))
}

/// GET /api/revision/analytics
pub async fn analytics(State(state): State<AppState>) -> Result<Json<PatternAnalyticsResponse>> {
    let response = pattern_analytics(&state).await?;
    Ok(Json(response))
}

/// GET /api/revision/overview
pub async fn overview(State(state): State<AppState>) -> Result<Json<OverviewResponse>> {
    let response = confidence_overview(&state).await?;
    Ok(Json(response))
}

/// GET /api/revision/hub
pub async fn hub(State(state): State<AppState>) -> Result<Json<RevisionHubResponse>> {
    let now = Utc::now();
    let today = due_today(&state, now).await?;
    let upcoming = state.db.problems_upcoming(now).await?;
    let pattern = pattern_analytics(&state).await?;
    let overview = confidence_overview(&state).await?;

    Ok(Json(RevisionHubResponse {
        today,
        upcoming,
        pattern,
        overview,
    }))
}

/// GET /api/revision/insights
pub async fn insights(State(state): State<AppState>) -> Result<Json<InsightsResponse>> {
    let total_problems_solved = state.db.count_problems().await?;
    let total_revisions = state.db.count_recall_logs().await?;
    let problems = state.db.problems_with_latest_confidence().await?;
    let logs = state.db.recall_logs_with_patterns().await?;

    let problems_by_difficulty =
        difficulty_breakdown(problems.iter().map(|p| p.problem.difficulty.as_str()));
    let distribution =
        pattern_distribution(logs.iter().map(|log| (log.pattern.as_str(), log.confidence)));
    let data_structure_strength = grouped_confidence_overview(
        problems
            .iter()
            .map(|p| (p.problem.data_structure.as_str(), p.latest_confidence)),
    );
    // Intentionally the first four by name, not re-sorted by weakness
    let weakest_data_structures: Vec<GroupConfidence> =
        data_structure_strength.iter().take(4).cloned().collect();
    let revisions = revisions_over_time(logs.iter().map(|log| log.created_at));
    let trend = confidence_trend(logs.iter().map(|log| (log.created_at, log.confidence)));
    let status = trend_status(&trend);

    Ok(Json(InsightsResponse {
        total_problems_solved,
        total_revisions,
        problems_by_difficulty,
        weak_patterns: weak_patterns(&distribution),
        strong_patterns: strong_patterns(&distribution),
        pattern_distribution: distribution,
        data_structure_strength,
        weakest_data_structures,
        revisions_over_time: revisions,
        confidence_trend: trend,
        trend_status: status,
    }))
}

/// Due list shared by today, session queue and the hub: everything
/// scheduled at or before `now`, weakest latest-confidence first.
async fn due_today(state: &AppState, now: DateTime<Utc>) -> Result<Vec<ProblemWithConfidence>> {
    let mut problems = state.db.problems_due(now).await?;
    sort_weakest_first(&mut problems, |problem| problem.latest_confidence);
    Ok(problems)
}

async fn pattern_analytics(state: &AppState) -> Result<PatternAnalyticsResponse> {
    let logs = state.db.recall_logs_with_patterns().await?;
    let distribution =
        pattern_distribution(logs.iter().map(|log| (log.pattern.as_str(), log.confidence)));

    Ok(PatternAnalyticsResponse {
        weak_patterns: weak_patterns(&distribution),
        strong_patterns: strong_patterns(&distribution),
    })
}

async fn confidence_overview(state: &AppState) -> Result<OverviewResponse> {
    let problems = state.db.problems_with_latest_confidence().await?;

    Ok(OverviewResponse {
        by_difficulty: grouped_confidence_overview(
            problems
                .iter()
                .map(|p| (p.problem.difficulty.as_str(), p.latest_confidence)),
        ),
        by_data_structure: grouped_confidence_overview(
            problems
                .iter()
                .map(|p| (p.problem.data_structure.as_str(), p.latest_confidence)),
        ),
    })
}
