//! API routes for the advice server

pub mod advice;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/health-advice",
            post(advice::health_advice).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let processor = state.processor();
    Json(serde_json::json!({
        "name": "health-advisor",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Health advice assistant with medical report ingestion",
        "endpoints": {
            "POST /api/health-advice": "Ask a health question, optionally with a PDF report (multipart: query, file)",
            "GET /api/info": "Service information",
            "GET /health": "Liveness check",
            "GET /ready": "Readiness check (model credential present)"
        },
        "model": {
            "provider": processor.llm().name(),
            "name": processor.llm().model(),
            "available": processor.llm().is_available()
        },
        "archive": {
            "provider": processor.archive().name(),
            "folder": state.config().archive.folder,
            "available": processor.archive().is_available()
        },
        "max_upload_size": state.config().server.max_upload_size
    }))
}
