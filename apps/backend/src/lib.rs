pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use crate::error::ApiError;
use crate::models::HealthResponse;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

/// Build the API router over the shared state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        // Problem routes
        .route("/api/problems", post(routes::problems::create))
        .route("/api/problems", get(routes::problems::list))
        .route("/api/problems/{id}", get(routes::problems::get))
        .route("/api/problems/{id}", put(routes::problems::update))
        .route("/api/problems/{id}", delete(routes::problems::delete))
        // Recall routes
        .route("/api/recall", post(routes::recall::log_recall))
        // Revision routes
        .route("/api/revision/today", get(routes::revision::today))
        .route("/api/revision/upcoming", get(routes::revision::upcoming))
        .route("/api/revision/analytics", get(routes::revision::analytics))
        .route("/api/revision/overview", get(routes::revision::overview))
        .route("/api/revision/hub", get(routes::revision::hub))
        .route(
            "/api/revision/session/queue",
            get(routes::revision::session_queue),
        )
        .route("/api/revision/insights", get(routes::revision::insights))
        .fallback(fallback)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect to database
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState { db: Arc::new(db) };
    let app = router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn fallback() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
