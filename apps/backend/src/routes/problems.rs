//! Problem CRUD endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/problems
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProblemPayload>,
) -> Result<(StatusCode, Json<Problem>)> {
    let errors = validate_payload(&payload, false);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let problem = state.db.create_problem(&draft_for_create(payload)).await?;
    tracing::info!("Created problem: {}", problem.id);

    Ok((StatusCode::CREATED, Json(problem)))
}

/// GET /api/problems
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Problem>>> {
    let problems = state.db.get_all_problems().await?;
    Ok(Json(problems))
}

/// GET /api/problems/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Problem>> {
    let problem_id = validate_id(id)?;
    let problem = state
        .db
        .get_problem(problem_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Problem not found".to_string()))?;

    Ok(Json(problem))
}

/// PUT /api/problems/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProblemPayload>,
) -> Result<Json<Problem>> {
    let problem_id = validate_id(id)?;
    let errors = validate_payload(&payload, true);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    // Merge provided fields over the stored row
    let existing = state
        .db
        .get_problem(problem_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Problem not found".to_string()))?;
    let draft = draft_for_update(&existing, payload);

    let problem = state
        .db
        .update_problem(problem_id, &draft)
        .await?
        .ok_or_else(|| ApiError::NotFound("Problem not found".to_string()))?;

    Ok(Json(problem))
}

/// DELETE /api/problems/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let problem_id = validate_id(id)?;
    let deleted = state.db.delete_problem(problem_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Problem not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Problem deleted successfully".to_string(),
    }))
}

fn validate_id(id: i64) -> Result<i64> {
    if id < 1 {
        return Err(ApiError::BadRequest("Invalid problem ID".to_string()));
    }
    Ok(id)
}

/// Check required fields and the platform whitelist. On a partial
/// update only the provided fields are checked.
fn validate_payload(payload: &ProblemPayload, partial: bool) -> Vec<String> {
    let required = [
        ("title", &payload.title),
        ("platform", &payload.platform),
        ("dataStructure", &payload.data_structure),
        ("pattern", &payload.pattern),
        ("difficulty", &payload.difficulty),
    ];

    let mut errors = Vec::new();
    for (name, value) in required {
        match value {
            Some(value) if !value.trim().is_empty() => {}
            Some(_) => errors.push(format!("{name} is required")),
            None if !partial => errors.push(format!("{name} is required")),
            None => {}
        }
    }

    if let Some(platform) = payload.platform.as_deref() {
        let platform = platform.trim();
        if !platform.is_empty() && Platform::from_str(platform).is_none() {
            errors.push("platform must be either LeetCode or GFG".to_string());
        }
    }

    errors
}

fn draft_for_create(payload: ProblemPayload) -> ProblemDraft {
    ProblemDraft {
        title: trimmed(payload.title),
        platform: trimmed(payload.platform),
        data_structure: trimmed(payload.data_structure),
        pattern: trimmed(payload.pattern),
        difficulty: trimmed(payload.difficulty),
        description: trimmed(payload.description),
        brute_force: trimmed(payload.brute_force),
        better_approach: trimmed(payload.better_approach),
        optimal_approach: trimmed(payload.optimal_approach),
        code: trimmed(payload.code),
    }
}

fn draft_for_update(existing: &Problem, payload: ProblemPayload) -> ProblemDraft {
    ProblemDraft {
        title: merged(payload.title, &existing.title),
        platform: merged(payload.platform, &existing.platform),
        data_structure: merged(payload.data_structure, &existing.data_structure),
        pattern: merged(payload.pattern, &existing.pattern),
        difficulty: merged(payload.difficulty, &existing.difficulty),
        description: merged(payload.description, &existing.description),
        brute_force: merged(payload.brute_force, &existing.brute_force),
        better_approach: merged(payload.better_approach, &existing.better_approach),
        optimal_approach: merged(payload.optimal_approach, &existing.optimal_approach),
        code: merged(payload.code, &existing.code),
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn merged(provided: Option<String>, existing: &str) -> String {
    provided
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| existing.to_string())
}
