use crate::error::AuthError;
use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use shelter_common::models::auth::Identity;
use std::sync::Arc;

/// Extract the token from an `Authorization` value.
///
/// The value must be exactly two space-separated parts, the first being
/// literally `Bearer`.
pub fn parse_bearer(value: &str) -> Result<&str, AuthError> {
    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Middleware guarding protected routes.
///
/// Validates the bearer token and stores the resulting [`Identity`] in the
/// request extensions for [`AuthUser`] to pick up.
pub async fn auth_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let value = match request.headers().get(header::AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| AuthError::MalformedHeader)?,
        None => return Err(AuthError::MissingHeader),
    };
    if value.is_empty() {
        return Err(AuthError::MissingHeader);
    }

    let token = parse_bearer(value)?;
    let claims = state.tokens.validate(token)?;

    request.extensions_mut().insert(Identity::from(claims));
    Ok(next.run(request).await)
}

/// Extractor for the identity admitted by [`auth_gate`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or(AuthError::Unauthenticated)
    }
}
