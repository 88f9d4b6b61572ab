pub mod render;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::aggregator::MatchAggregator;
use crate::football_data::{Competition, LeagueDataKind};

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<MatchAggregator>,
}

/// Build the Axum router for the news page and its JSON endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/news", get(news_handler))
        .route("/api/snapshot", get(snapshot_handler))
        .route("/api/competitions/:code/:kind", get(competition_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// GET /news
async fn news_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let snapshot = state.aggregator.get_football_data().await.map_err(|e| {
        error!("Refresh failed: {:#}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e))
    })?;
    Ok(Html(render::render_news_page(&snapshot)))
}

/// GET /api/snapshot
async fn snapshot_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .aggregator
        .get_football_data()
        .await
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e)))
}

/// GET /api/competitions/:code/standings | /api/competitions/:code/scorers
async fn competition_handler(
    State(state): State<Arc<AppState>>,
    Path((code, kind)): Path<(String, String)>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let competition = Competition::by_code(&code)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown competition: {}", code)))?;
    let kind: LeagueDataKind = kind.parse().map_err(|e| (StatusCode::NOT_FOUND, e))?;
    state
        .aggregator
        .competition_data(competition, kind)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))
}
