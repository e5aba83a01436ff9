//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Helper functions for creating and inspecting test data
//!
//! # Requirements
//! Integration tests require a running PostgreSQL database
//! (set DATABASE_URL env var).

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};

use algorecall_backend::db::Database;
use algorecall_backend::models::{Problem, ProblemDraft};
use algorecall_backend::{router, AppState};

/// Test context containing database connection and the API router.
///
/// Use this to set up integration tests with a real database connection.
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let db = Arc::new(db);
        let app = router(AppState { db: db.clone() });

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a test problem directly in the database.
    pub async fn create_test_problem(
        &self,
        title: &str,
        difficulty: &str,
        data_structure: &str,
        pattern: &str,
    ) -> Problem {
        let draft = ProblemDraft {
            title: title.to_string(),
            platform: "LeetCode".to_string(),
            data_structure: data_structure.to_string(),
            pattern: pattern.to_string(),
            difficulty: difficulty.to_string(),
            description: String::new(),
            brute_force: String::new(),
            better_approach: String::new(),
            optimal_approach: String::new(),
            code: String::new(),
        };
        self.db
            .create_problem(&draft)
            .await
            .expect("Failed to create test problem")
    }

    /// Fetch a problem straight from the database.
    pub async fn get_problem(&self, problem_id: i64) -> Option<Problem> {
        self.db.get_problem(problem_id).await.ok().flatten()
    }

    /// Force a problem's next revision time, bypassing the scheduler.
    pub async fn set_next_revision(&self, problem_id: i64, at: DateTime<Utc>) {
        sqlx::query("UPDATE problems SET next_revision_at = $2 WHERE id = $1")
            .bind(problem_id)
            .bind(at)
            .execute(self.db.pool())
            .await
            .expect("Failed to set next revision time");
    }

    /// Count the recall logs recorded for one problem.
    pub async fn count_logs_for(&self, problem_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM recall_logs WHERE problem_id = $1")
            .bind(problem_id)
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to count recall logs")
    }

    /// Clean up a test problem. Its recall logs cascade with it.
    pub async fn cleanup_problem(&self, problem_id: i64) {
        let _ = sqlx::query("DELETE FROM problems WHERE id = $1")
            .bind(problem_id)
            .execute(self.db.pool())
            .await;
    }
}

/// Position of the entry with the given title in a JSON array, if any.
/// The shared database may hold rows from other tests, so assertions
/// compare relative positions instead of whole arrays.
pub fn index_of_title(items: &serde_json::Value, title: &str) -> Option<usize> {
    items
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .position(|item| item["title"] == title)
}

/// Find the entry with the given name in a JSON array of summaries.
pub fn entry_by_name(items: &serde_json::Value, name: &str) -> Option<serde_json::Value> {
    items
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .find(|item| item["name"] == name)
        .cloned()
}
