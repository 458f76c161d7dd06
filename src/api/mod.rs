use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::ranking::filter_by_competition;
use crate::service::MatchService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MatchService>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Competition id or name slug; "all" or absent for everything
    pub competition: Option<String>,
}

/// Build the Axum router for the presentation-facing API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/competitions", get(competitions_handler))
        .route("/api/matches/live", get(live_handler))
        .route("/api/matches/upcoming", get(upcoming_handler))
        .route("/api/matches/:id", get(detail_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

async fn health_handler() -> &'static str {
    "ok"
}

/// GET /api/competitions
async fn competitions_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.service.all_competitions())
}

/// GET /api/matches/live?competition=premier-league
async fn live_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let live = state.service.live_matches(now_ms()).await;
    match query.competition.as_deref() {
        Some(selector) => Json(filter_by_competition(&live, selector)),
        None => Json(live),
    }
}

/// GET /api/matches/upcoming?competition=la-liga
async fn upcoming_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let upcoming = state.service.upcoming_matches(now_ms()).await;
    match query.competition.as_deref() {
        Some(selector) => Json(filter_by_competition(&upcoming, selector)),
        None => Json(upcoming),
    }
}

/// GET /api/matches/:id
async fn detail_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .service
        .match_detail(&id, now_ms())
        .await
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("match {} not found", id)))
}
