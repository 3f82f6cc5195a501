// HTTP request handlers
use crate::infrastructure::http_response::report_response;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

const DEFAULT_HOURS: i64 = 24;
const DEFAULT_TOP_SECTIONS: i64 = 4;
const DEFAULT_BUCKETS: i64 = 5;

#[derive(Deserialize)]
pub struct RangeQuery {
    pub hours: Option<i64>,
}

#[derive(Deserialize)]
pub struct HotspotQuery {
    pub hours: Option<i64>,
    pub top_sections: Option<i64>,
    pub buckets: Option<i64>,
}

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "message": format!("{} reporting service is running", state.app_name) }))
}

pub async fn kpis(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    report_response(state.report_service.kpis().await)
}

pub async fn delay_trends(
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let hours = query.hours.unwrap_or(DEFAULT_HOURS);
    report_response(state.report_service.delay_trends(hours, Utc::now()).await)
}

pub async fn throughput(
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let hours = query.hours.unwrap_or(DEFAULT_HOURS);
    report_response(state.report_service.throughput(hours, Utc::now()).await)
}

pub async fn hotspots(
    Query(query): Query<HotspotQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let hours = query.hours.unwrap_or(DEFAULT_HOURS);
    let top_sections = query.top_sections.unwrap_or(DEFAULT_TOP_SECTIONS);
    let buckets = query.buckets.unwrap_or(DEFAULT_BUCKETS);

    report_response(
        state
            .report_service
            .hotspots(hours, top_sections, buckets, Utc::now())
            .await,
    )
}
