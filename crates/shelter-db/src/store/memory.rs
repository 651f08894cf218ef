use super::{CredentialStore, StoreError, UserRow};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process [`CredentialStore`]. The uniqueness check and the insert happen
/// under one write lock, so concurrent registrations of the same email yield
/// exactly one row.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    users: HashMap<String, UserRow>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.users.contains_key(email))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<UserRow>, StoreError> {
        Ok(self.inner.read().await.users.get(email).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(email) {
            return Err(StoreError::Conflict);
        }

        inner.last_id += 1;
        let id = inner.last_id;
        let now = Utc::now();
        inner.users.insert(
            email.to_string(),
            UserRow {
                id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }
}
