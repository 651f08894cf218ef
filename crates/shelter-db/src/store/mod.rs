//! Persistence of user credentials.
//!
//! The store owns the uniqueness of `email`. Callers may pre-check with
//! [`CredentialStore::email_exists`], but only the [`StoreError::Conflict`]
//! returned by [`CredentialStore::create`] is authoritative.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A user with this email already exists.
    #[error("email already registered")]
    Conflict,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A persisted user, including the password hash.
#[derive(Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for UserRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRow")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fast-path existence check. Not a uniqueness guarantee.
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<UserRow>, StoreError>;

    /// Insert a new user atomically and return its id.
    /// Fails with [`StoreError::Conflict`] if the email is taken; no row is left behind
    /// on any failure.
    async fn create(&self, email: &str, password_hash: &str) -> Result<i64, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_row_debug_redacts_hash() {
        let now = Utc::now();
        let row = UserRow {
            id: 1,
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            created_at: now,
            updated_at: now,
        };
        let debug = format!("{:?}", row);
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("argon2id"));
    }
}
