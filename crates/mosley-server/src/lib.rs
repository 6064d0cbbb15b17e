pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod health;
pub mod state;
pub mod store;

use std::time::Duration;

use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use mosley_core::ScoringError;

use config::ServerConfig;
use state::AppState;

/// Build the Axum router and application state from a config.
///
/// Fails when the data directory cannot be opened or its contents read.
pub fn build_app(config: ServerConfig) -> Result<(Router<()>, AppState), ScoringError> {
    let timeout = Duration::from_secs(config.limits.request_timeout_secs);
    let enable_cors = config.enable_cors;
    let state = AppState::new(config)?;

    // Everything except the health check sits behind bearer auth
    let api_routes = Router::new()
        .route("/courses", get(api::list_courses).post(api::add_course))
        .route("/competitors", post(api::enter_competitor))
        .route("/competitors/{name}", delete(api::withdraw_competitor))
        .route("/rounds", post(api::submit_round))
        .route("/standings/{competition}", get(api::competition_standings))
        .route("/days/{day}/standings", get(api::day_standings))
        .route("/days/{day}/complete", post(api::complete_day))
        .route("/split/candidates", get(api::split_candidates))
        .route("/split", post(api::apply_split))
        .route("/pairs", get(api::list_pairs).post(api::generate_pairs))
        .route("/pairs/score", post(api::score_pair))
        .route("/leaderboard", get(api::get_leaderboard))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ))
        .route("/health", get(health::health_check));

    let mut app = Router::new()
        .nest("/api/v1", api_routes)
        .layer(TimeoutLayer::new(timeout))
        .with_state(state.clone());

    if enable_cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    Ok((app, state))
}

/// Middleware wrapper that injects AuthConfig into request extensions for the
/// bearer auth middleware.
async fn bearer_auth_layer(
    axum::extract::State(state): axum::extract::State<AppState>,
    mut request: axum::extract::Request,
    next: middleware::Next,
) -> Result<axum::response::Response, axum::http::StatusCode> {
    request.extensions_mut().insert(state.auth.clone());
    auth::bearer_auth_middleware(request, next).await
}
