use axum::{
    routing::get,
    Router,
    extract::{State, Query},
    response::{Html, IntoResponse},
    Json
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::models::Report;
use crate::render::render_html;
use crate::services::{AppError, ReportService};
use super::models::{ApiResponse, ReportQueryParams};

// Summary page, rebuilt on every request
pub async fn report_page(
    Query(params): Query<ReportQueryParams>,
    State(service): State<Arc<ReportService>>,
) -> Result<Html<String>, AppError> {
    let report = service.generate(params.channel_type.as_deref()).await?;
    Ok(Html(render_html(&report, Utc::now())))
}

pub async fn report_json(
    Query(params): Query<ReportQueryParams>,
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Report>>, AppError> {
    let report = service.generate(params.channel_type.as_deref()).await?;
    Ok(Json(ApiResponse::success(report)))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "report"
    }))
}

// Define all API routes
pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/", get(report_page))
        .route("/api/report", get(report_json))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
