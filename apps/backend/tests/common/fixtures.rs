//! Test fixtures for creating request payloads.

use serde_json::{json, Value};
use uuid::Uuid;

/// Generate a unique title to avoid collisions between test runs.
pub fn unique_title(prefix: &str) -> String {
    format!("{} {}", prefix, &Uuid::new_v4().to_string()[..8])
}

/// Generate a unique group name for data structures or patterns.
pub fn unique_group(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().to_string()[..8])
}

/// Create a valid problem creation request payload.
pub fn problem_request(title: &str) -> Value {
    json!({
        "title": title,
        "platform": "LeetCode",
        "dataStructure": "Array",
        "pattern": "Two Pointers",
        "difficulty": "Easy",
        "description": "Given an array, find the pair summing to a target.",
        "bruteForce": "Check every pair.",
        "optimalApproach": "Walk both ends inward.",
        "code": "fn solve() {}"
    })
}

/// Create a problem request payload with explicit grouping fields.
pub fn problem_request_with(
    title: &str,
    difficulty: &str,
    data_structure: &str,
    pattern: &str,
) -> Value {
    json!({
        "title": title,
        "platform": "GFG",
        "dataStructure": data_structure,
        "pattern": pattern,
        "difficulty": difficulty
    })
}

/// Create a recall logging request payload.
pub fn recall_request(problem_id: i64, confidence: f64) -> Value {
    json!({
        "problemId": problem_id,
        "confidence": confidence
    })
}
