//! Registration, login and refresh flows.

use crate::auth::{spawn_hash, spawn_verify, TokenService, UNKNOWN_USER_HASH};
use crate::error::AuthError;
use serde::Serialize;
use shelter_common::models::auth::Identity;
use shelter_common::validation::{normalize_email, validate_registration};
use shelter_db::CredentialStore;

pub const TOKEN_TYPE: &str = "Bearer";

/// Token payload returned by login and refresh.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    /// Seconds until the token expires.
    pub exp_in: u64,
    pub token_type: &'static str,
}

impl IssuedToken {
    fn new(token: String, tokens: &TokenService) -> Self {
        Self {
            token,
            exp_in: tokens.ttl().as_secs(),
            token_type: TOKEN_TYPE,
        }
    }
}

/// Create a user and return its id.
///
/// The existence check only short-circuits the common case; a concurrent
/// registration that slips past it is caught by the store's unique constraint.
pub async fn register(
    store: &dyn CredentialStore,
    email: &str,
    password: &str,
) -> Result<i64, AuthError> {
    let email = normalize_email(email);
    validate_registration(&email, password)?;

    if store.email_exists(&email).await? {
        return Err(AuthError::Conflict);
    }

    let password_hash = spawn_hash(password.to_string()).await?;
    let uid = store.create(&email, &password_hash).await?;

    tracing::info!(uid, email = %email, "User registered");
    Ok(uid)
}

/// Check credentials and issue a token carrying `uid` and `email`.
///
/// Unknown emails still pay for a full argon2 verify.
pub async fn login(
    store: &dyn CredentialStore,
    tokens: &TokenService,
    email: &str,
    password: &str,
) -> Result<IssuedToken, AuthError> {
    let email = normalize_email(email);

    let Some(user) = store.get_by_email(&email).await? else {
        spawn_verify(password.to_string(), UNKNOWN_USER_HASH.to_string()).await;
        tracing::debug!(email = %email, "Login for unknown email");
        return Err(AuthError::InvalidCredentials);
    };

    if !spawn_verify(password.to_string(), user.password_hash.clone()).await {
        tracing::debug!(uid = user.id, "Login with wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    let token = tokens.issue(&Identity::with_email(user.id, user.email))?;
    Ok(IssuedToken::new(token, tokens))
}

/// Issue a fresh token for an identity the Auth Gate already admitted.
pub fn refresh(tokens: &TokenService, identity: &Identity) -> Result<IssuedToken, AuthError> {
    let token = tokens.refresh(identity)?;
    Ok(IssuedToken::new(token, tokens))
}
