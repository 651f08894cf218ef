use crate::accounts;
use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Body of `/register` and `/login`.
///
/// `username` is accepted as an alias for `email`. No `Debug` derive, so the
/// password cannot end up in logs.
#[derive(Deserialize)]
pub struct CredentialsRequest {
    #[serde(alias = "username")]
    pub email: String,
    pub password: String,
}

/// POST /api/v1/register
#[tracing::instrument(skip(state, body))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid input format",
                    "details": rejection.body_text(),
                })),
            )
                .into_response()
        }
    };

    match accounts::register(state.store.as_ref(), &req.email, &req.password).await {
        Ok(uid) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "User registered successfully",
                "uid": uid,
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /api/v1/login
#[tracing::instrument(skip(state, body))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) if !req.email.trim().is_empty() && !req.password.is_empty() => req,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid login data"})),
            )
                .into_response()
        }
    };

    match accounts::login(state.store.as_ref(), &state.tokens, &req.email, &req.password).await {
        Ok(issued) => Json(issued).into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /api/v1/refresh-token
#[tracing::instrument(skip(state))]
pub async fn refresh_token(State(state): State<Arc<AppState>>, auth: AuthUser) -> Response {
    match accounts::refresh(&state.tokens, &auth.0) {
        Ok(issued) => Json(issued).into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /api/v1/logout
///
/// Tokens are stateless; the client is expected to discard its copy.
#[tracing::instrument]
pub async fn logout(auth: AuthUser) -> impl IntoResponse {
    tracing::info!(uid = auth.0.uid, "User logged out");
    Json(json!({
        "message": "Logout successful",
        "instruction": "Please remove token from Authorization header",
    }))
}

/// GET /api/v1/profile
///
/// Served from the token's identity; the store is not consulted.
#[tracing::instrument]
pub async fn profile(auth: AuthUser) -> impl IntoResponse {
    Json(json!({
        "uid": auth.0.uid,
        "email": auth.0.email,
    }))
}
