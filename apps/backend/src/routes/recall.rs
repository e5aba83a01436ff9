//! Recall logging endpoint

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;
use revision_core::schedule::{
    compute_next_revision_at, derive_recall_category, is_valid_confidence,
};

/// POST /api/recall
pub async fn log_recall(
    State(state): State<AppState>,
    Json(payload): Json<LogRecallRequest>,
) -> Result<(StatusCode, Json<LogRecallResponse>)> {
    let problem_id = parse_problem_id(payload.problem_id).ok_or_else(|| {
        ApiError::BadRequest("problemId must be a valid positive integer".to_string())
    })?;
    let confidence = match payload.confidence {
        Some(value) if is_valid_confidence(value) => value as i32,
        _ => {
            return Err(ApiError::BadRequest(
                "confidence must be an integer between 1 and 5".to_string(),
            ))
        }
    };

    // One timestamp drives the log row, the reschedule, and the response
    let now = Utc::now();
    let category = derive_recall_category(confidence);
    let next_revision_at = compute_next_revision_at(confidence, now);

    state
        .db
        .log_recall(
            problem_id,
            confidence,
            category.as_str(),
            next_revision_at,
            now,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Problem not found".to_string()))?;

    tracing::info!(
        "Logged recall for problem {}: {} (next revision {})",
        problem_id,
        category.as_str(),
        next_revision_at
    );

    Ok((
        StatusCode::CREATED,
        Json(LogRecallResponse {
            category,
            next_revision_at,
        }),
    ))
}

/// Accept only whole, positive JSON numbers as problem ids.
fn parse_problem_id(raw: Option<f64>) -> Option<i64> {
    match raw {
        Some(id) if id.fract() == 0.0 && id >= 1.0 => Some(id as i64),
        _ => None,
    }
}
