//! Error taxonomy for the authentication API and its HTTP mapping.
//!
//! Internal failures are logged here and reported to the client with a
//! generic message only.

use crate::auth::{HashingError, SigningError, TokenError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shelter_common::validation::ValidationError;
use shelter_db::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("User already exists")]
    Conflict,

    /// Unknown email and wrong password are deliberately the same error.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization format")]
    MalformedHeader,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("User not authenticated")]
    Unauthenticated,

    #[error("store failure: {0}")]
    Store(StoreError),

    #[error(transparent)]
    Hashing(#[from] HashingError),

    #[error(transparent)]
    Signing(#[from] SigningError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AuthError::Conflict,
            other => AuthError::Store(other),
        }
    }
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::MissingHeader
            | AuthError::MalformedHeader
            | AuthError::Token(_)
            | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::Store(_) | AuthError::Hashing(_) | AuthError::Signing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the client.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Token(TokenError::Malformed) => "Invalid token".to_string(),
            AuthError::Token(TokenError::SignatureInvalid) => {
                "Invalid token signature".to_string()
            }
            AuthError::Token(TokenError::Expired) => "Token expired".to_string(),
            AuthError::Store(_) | AuthError::Hashing(_) | AuthError::Signing(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!(%status, "Request rejected: {}", self);
        }
        (status, Json(json!({"error": self.client_message()}))).into_response()
    }
}
