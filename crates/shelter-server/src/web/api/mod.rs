pub mod auth;
pub mod middleware;

use crate::state::AppState;
use axum::response::IntoResponse;
use axum::{routing::get, routing::post, Json, Router};
use serde_json::json;
use std::sync::Arc;

/// GET /api/v1/health
async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub fn build_api_routes(state: Arc<AppState>) -> Router {
    // Routes behind the bearer token gate
    let protected = Router::new()
        .route("/refresh-token", post(auth::refresh_token))
        .route("/logout", post(auth::logout))
        .route("/profile", get(auth::profile))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_gate,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(protected)
        .with_state(state)
}
