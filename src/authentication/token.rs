use crate::utils::error_chain_fmt;
use anyhow::Context;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Issued access tokens are valid for exactly 15 minutes.
pub const ACCESS_TOKEN_EXPIRY_SECONDS: i64 = 900;

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// The shape handed back to callers: `{"access_token": "..."}`.
#[derive(Debug, Serialize)]
pub struct AccessToken {
    pub access_token: String,
}

#[derive(thiserror::Error)]
pub enum TokenError {
    #[error("The access token signing secret is not configured")]
    MissingSecret,
    #[error("The supplied access token is invalid or expired")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Signs and validates compact, time-bounded identity tokens with a secret
/// injected once at startup.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: Secret<String>,
}

impl TokenIssuer {
    pub fn new(secret: Secret<String>) -> Self {
        Self { secret }
    }

    /// Sign an access token asserting a user identity. Refuses to sign with
    /// an empty secret rather than producing a trivially forgeable token.
    #[tracing::instrument(name = "Issuing access token", skip(self, user_id))]
    pub fn sign(&self, user_id: &str, email: &str) -> Result<AccessToken, TokenError> {
        if self.secret.expose_secret().is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let issued_at = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at,
            exp: issued_at + ACCESS_TOKEN_EXPIRY_SECONDS,
        };

        let access_token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .context("Failed to sign access token")?;

        Ok(AccessToken { access_token })
    }

    /// Decode and validate a previously issued token. An access guard sitting
    /// in front of protected handlers relies on this exact contract: same
    /// secret, same claim shape, expiry checked.
    pub fn decode(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        if self.secret.expose_secret().is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let decoded = decode::<AccessTokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(TokenError::InvalidToken)?;

        Ok(decoded.claims)
    }
}
