use crate::domain::new_user::NewUser;
use crate::utils::error_chain_fmt;
use async_trait::async_trait;
use secrecy::Secret;

/// A persisted user. The id is store-assigned and immutable; the password
/// hash is an opaque PHC string stored as-is.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: Secret<String>,
}

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("A record with the same email already exists")]
    DuplicateEmail,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[async_trait]
pub trait CredentialStore {
    /// Insert a new user record. Implementations must enforce email
    /// uniqueness atomically: when two concurrent inserts race on the same
    /// email, exactly one succeeds and the other gets `DuplicateEmail`.
    async fn create(
        &self,
        new_user: &NewUser,
        password_hash: Secret<String>,
    ) -> Result<UserRecord, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;
}
