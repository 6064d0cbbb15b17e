use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Structured health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub persistent: bool,
    pub tournament: TournamentInfo,
}

#[derive(Serialize)]
pub struct TournamentInfo {
    pub competitors: usize,
    pub pairs: usize,
    pub courses: usize,
    pub cutline: Option<i32>,
}

/// GET /api/v1/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let keeper = state.scorekeeper.read().await;
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        persistent: keeper.is_persistent(),
        tournament: TournamentInfo {
            competitors: keeper.tournament.len(),
            pairs: keeper.tournament.pairs().len(),
            courses: keeper.courses.len(),
            cutline: keeper.tournament.cutline(),
        },
    })
}
