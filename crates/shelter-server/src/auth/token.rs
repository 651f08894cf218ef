//! Stateless HS256 bearer tokens.
//!
//! Validation order matters: the signature is verified before any claim is
//! trusted, and expiry is checked last against an explicit clock value.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use shelter_common::models::auth::{Claims, Identity};
use std::time::Duration;
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not a three-part signed token, wrong algorithm, or undecodable claims.
    #[error("token is malformed")]
    Malformed,
    /// Well-formed, but the HMAC does not match: tampered or signed with another key.
    #[error("token signature is invalid")]
    SignatureInvalid,
    #[error("token has expired")]
    Expired,
}

#[derive(Debug, Error)]
#[error("failed to sign token: {0}")]
pub struct SigningError(#[from] jsonwebtoken::errors::Error);

fn classify(err: &jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Issues and validates tokens with one symmetric secret and one TTL.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // exp is checked in validate_at, after the signature, with no leeway
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn ttl_secs(&self) -> i64 {
        i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX)
    }

    /// Issue a token for `identity`, valid from now for the configured TTL.
    pub fn issue(&self, identity: &Identity) -> Result<String, SigningError> {
        self.issue_at(identity, now())
    }

    pub fn issue_at(&self, identity: &Identity, issued_at: i64) -> Result<String, SigningError> {
        let claims = Claims {
            uid: identity.uid,
            email: identity.email.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs()),
        };
        let token = jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Re-issue for an already authenticated identity.
    ///
    /// Only `uid` is carried over; the new token has no `email` claim.
    pub fn refresh(&self, identity: &Identity) -> Result<String, SigningError> {
        self.issue(&Identity::new(identity.uid))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, now())
    }

    /// Validate `token` as of unix time `now`.
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| classify(&e))?;
        let claims = data.claims;
        if now > claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &ALGORITHM)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
