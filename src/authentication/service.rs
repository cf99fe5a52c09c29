use crate::authentication::password::{
    compute_password_hash, verify_password_hash, FALLBACK_PASSWORD_HASH,
};
use crate::authentication::token::{AccessToken, TokenError, TokenIssuer};
use crate::domain::{
    CredentialStore, NewUser, StoreError, UserEmail, UserFullName, UserPassword,
};
use crate::telemetry::spawn_blocking_with_tracing;
use crate::utils::error_chain_fmt;
use anyhow::Context;
use secrecy::Secret;
use std::sync::Arc;

#[derive(serde::Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub full_name: String,
    pub password: Secret<String>,
}

#[derive(serde::Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: Secret<String>,
}

#[derive(thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Email already exists")]
    DuplicateCredential,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Access token issuance is misconfigured")]
    ConfigurationError(#[source] TokenError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Mediates between raw credentials and the store, hasher and token issuer.
/// Both operations terminate in the same token issuance step, so claim
/// construction and expiry policy live in one place.
pub struct CredentialService {
    store: Arc<dyn CredentialStore + Send + Sync>,
    token_issuer: TokenIssuer,
}

impl CredentialService {
    pub fn new(store: Arc<dyn CredentialStore + Send + Sync>, token_issuer: TokenIssuer) -> Self {
        Self {
            store,
            token_issuer,
        }
    }

    #[tracing::instrument(
        name = "Signing up a new user",
        skip(self, request),
        fields(user_email = %request.email)
    )]
    pub async fn sign_up(&self, request: SignupRequest) -> Result<AccessToken, AuthError> {
        let email = UserEmail::parse(request.email).map_err(AuthError::ValidationError)?;
        let full_name = UserFullName::parse(request.full_name).map_err(AuthError::ValidationError)?;
        let password = UserPassword::parse(request.password).map_err(AuthError::ValidationError)?;

        let password_hash =
            spawn_blocking_with_tracing(move || compute_password_hash(password.into_secret()))
                .await
                .context("Failed to join the password hashing task")?
                .context("Failed to hash password")?;

        let new_user = NewUser { email, full_name };
        let user = self
            .store
            .create(&new_user, password_hash)
            .await
            .map_err(|e| match e {
                // Do not disclose which field collided.
                StoreError::DuplicateEmail => AuthError::DuplicateCredential,
                StoreError::UnexpectedError(inner) => AuthError::UnexpectedError(inner),
            })?;

        self.issue_token(&user.id, &user.email)
    }

    #[tracing::instrument(
        name = "Signing in a user",
        skip(self, request),
        fields(user_email = %request.email)
    )]
    pub async fn sign_in(&self, request: SigninRequest) -> Result<AccessToken, AuthError> {
        // A malformed secret can never match a stored hash; it fails with the
        // same error as any other wrong password.
        let password =
            UserPassword::parse(request.password).map_err(|_| AuthError::InvalidCredentials)?;

        let mut user = None;
        let mut expected_password_hash = Secret::new(FALLBACK_PASSWORD_HASH.to_string());

        if let Some(stored) = self
            .store
            .find_by_email(&request.email)
            .await
            .map_err(|e| AuthError::UnexpectedError(e.into()))?
        {
            expected_password_hash = stored.password_hash.clone();
            user = Some(stored);
        }

        let candidate = password.into_secret();
        let is_valid = spawn_blocking_with_tracing(move || {
            verify_password_hash(&expected_password_hash, &candidate)
        })
        .await
        .context("Failed to join the password verification task")?
        .context("Failed to verify password hash")?;

        // Unknown email and wrong password collapse into one failure so the
        // error is not an enumeration oracle.
        let user = match user {
            Some(user) if is_valid => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        self.issue_token(&user.id, &user.email)
    }

    fn issue_token(&self, user_id: &str, email: &str) -> Result<AccessToken, AuthError> {
        self.token_issuer.sign(user_id, email).map_err(|e| match e {
            TokenError::MissingSecret => AuthError::ConfigurationError(TokenError::MissingSecret),
            TokenError::UnexpectedError(inner) => AuthError::UnexpectedError(inner),
            other => AuthError::UnexpectedError(anyhow::anyhow!(other)),
        })
    }
}
