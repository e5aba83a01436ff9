//! PostgreSQL database operations

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Database(e.into()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Problem Repository ===

    /// Insert a new problem
    pub async fn create_problem(&self, draft: &ProblemDraft) -> Result<Problem> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            INSERT INTO problems (title, platform, data_structure, pattern, difficulty,
                                  description, brute_force, better_approach, optimal_approach, code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, title, platform, data_structure, pattern, difficulty,
                      description, brute_force, better_approach, optimal_approach, code,
                      next_revision_at, created_at, updated_at
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.platform)
        .bind(&draft.data_structure)
        .bind(&draft.pattern)
        .bind(&draft.difficulty)
        .bind(&draft.description)
        .bind(&draft.brute_force)
        .bind(&draft.better_approach)
        .bind(&draft.optimal_approach)
        .bind(&draft.code)
        .fetch_one(&self.pool)
        .await?;

        Ok(problem)
    }

    /// Get all problems, newest first
    pub async fn get_all_problems(&self) -> Result<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(
            r#"
            SELECT id, title, platform, data_structure, pattern, difficulty,
                   description, brute_force, better_approach, optimal_approach, code,
                   next_revision_at, created_at, updated_at
            FROM problems
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(problems)
    }

    /// Get problem by ID
    pub async fn get_problem(&self, problem_id: i64) -> Result<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            SELECT id, title, platform, data_structure, pattern, difficulty,
                   description, brute_force, better_approach, optimal_approach, code,
                   next_revision_at, created_at, updated_at
            FROM problems
            WHERE id = $1
            "#,
        )
        .bind(problem_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(problem)
    }

    /// Overwrite every editable field of a problem
    pub async fn update_problem(
        &self,
        problem_id: i64,
        draft: &ProblemDraft,
    ) -> Result<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            UPDATE problems
            SET title = $2, platform = $3, data_structure = $4, pattern = $5,
                difficulty = $6, description = $7, brute_force = $8,
                better_approach = $9, optimal_approach = $10, code = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, platform, data_structure, pattern, difficulty,
                      description, brute_force, better_approach, optimal_approach, code,
                      next_revision_at, created_at, updated_at
            "#,
        )
        .bind(problem_id)
        .bind(&draft.title)
        .bind(&draft.platform)
        .bind(&draft.data_structure)
        .bind(&draft.pattern)
        .bind(&draft.difficulty)
        .bind(&draft.description)
        .bind(&draft.brute_force)
        .bind(&draft.better_approach)
        .bind(&draft.optimal_approach)
        .bind(&draft.code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(problem)
    }

    /// Delete a problem; its recall logs cascade with it
    pub async fn delete_problem(&self, problem_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM problems WHERE id = $1")
            .bind(problem_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all problems
    pub async fn count_problems(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM problems")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // === Recall Log Repository ===

    /// Insert a recall log and reschedule its problem in one transaction.
    ///
    /// Returns `None` without writing anything when the problem does not
    /// exist. The row lock serializes concurrent recalls of the same
    /// problem; the last commit wins.
    pub async fn log_recall(
        &self,
        problem_id: i64,
        confidence: i32,
        category: &str,
        next_revision_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Option<RecallLog>> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT id
            FROM problems
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(problem_id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_none() {
            return Ok(None);
        }

        let log = sqlx::query_as::<_, RecallLog>(
            r#"
            INSERT INTO recall_logs (problem_id, confidence, category, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, problem_id, confidence, category, created_at
            "#,
        )
        .bind(problem_id)
        .bind(confidence)
        .bind(category)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE problems
            SET next_revision_at = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(problem_id)
        .bind(next_revision_at)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(log))
    }

    /// Count all recall logs
    pub async fn count_recall_logs(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recall_logs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Every recall log joined with its problem's pattern, oldest first
    pub async fn recall_logs_with_patterns(&self) -> Result<Vec<RecallLogWithPattern>> {
        let logs = sqlx::query_as::<_, RecallLogWithPattern>(
            r#"
            SELECT r.confidence, p.pattern, r.created_at
            FROM recall_logs r
            JOIN problems p ON p.id = r.problem_id
            ORDER BY r.created_at, r.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    // === Revision Queries ===

    /// Problems due for revision at `now`, annotated with the confidence
    /// of their most recent recall log
    pub async fn problems_due(&self, now: DateTime<Utc>) -> Result<Vec<ProblemWithConfidence>> {
        let problems = sqlx::query_as::<_, ProblemWithConfidence>(
            r#"
            SELECT p.id, p.title, p.platform, p.data_structure, p.pattern, p.difficulty,
                   p.description, p.brute_force, p.better_approach, p.optimal_approach, p.code,
                   p.next_revision_at, p.created_at, p.updated_at,
                   (SELECT r.confidence
                    FROM recall_logs r
                    WHERE r.problem_id = p.id
                    ORDER BY r.created_at DESC, r.id DESC
                    LIMIT 1) AS latest_confidence
            FROM problems p
            WHERE p.next_revision_at <= $1
            ORDER BY p.id
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(problems)
    }

    /// Problems scheduled after `now`, soonest first
    pub async fn problems_upcoming(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProblemWithConfidence>> {
        let problems = sqlx::query_as::<_, ProblemWithConfidence>(
            r#"
            SELECT p.id, p.title, p.platform, p.data_structure, p.pattern, p.difficulty,
                   p.description, p.brute_force, p.better_approach, p.optimal_approach, p.code,
                   p.next_revision_at, p.created_at, p.updated_at,
                   (SELECT r.confidence
                    FROM recall_logs r
                    WHERE r.problem_id = p.id
                    ORDER BY r.created_at DESC, r.id DESC
                    LIMIT 1) AS latest_confidence
            FROM problems p
            WHERE p.next_revision_at > $1
            ORDER BY p.next_revision_at ASC, p.id
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(problems)
    }

    /// Every problem annotated with its latest recall confidence
    pub async fn problems_with_latest_confidence(&self) -> Result<Vec<ProblemWithConfidence>> {
        let problems = sqlx::query_as::<_, ProblemWithConfidence>(
            r#"
            SELECT p.id, p.title, p.platform, p.data_structure, p.pattern, p.difficulty,
                   p.description, p.brute_force, p.better_approach, p.optimal_approach, p.code,
                   p.next_revision_at, p.created_at, p.updated_at,
                   (SELECT r.confidence
                    FROM recall_logs r
                    WHERE r.problem_id = p.id
                    ORDER BY r.created_at DESC, r.id DESC
                    LIMIT 1) AS latest_confidence
            FROM problems p
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(problems)
    }
}
