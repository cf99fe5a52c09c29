use crate::domain::{CredentialStore, NewUser, StoreError, UserRecord};
use async_trait::async_trait;
use secrecy::Secret;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local credential store keyed by email. The uniqueness check and
/// insert happen under a single write lock, so concurrent duplicate signups
/// resolve to exactly one winner. Email comparison is byte-exact.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    #[tracing::instrument(
        name = "Inserting user record",
        skip(self, new_user, password_hash),
        fields(user_email = %new_user.email)
    )]
    async fn create(
        &self,
        new_user: &NewUser,
        password_hash: Secret<String>,
    ) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write().await;

        if users.contains_key(new_user.email.as_ref()) {
            return Err(StoreError::DuplicateEmail);
        }

        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            email: new_user.email.as_ref().to_string(),
            full_name: new_user.full_name.as_ref().to_string(),
            password_hash,
        };
        users.insert(record.email.clone(), record.clone());

        Ok(record)
    }

    #[tracing::instrument(name = "Looking up user record", skip(self, email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().await;

        Ok(users.get(email).cloned())
    }
}
