mod password;
mod service;
mod token;

pub use password::{compute_password_hash, verify_password_hash};
pub use service::{AuthError, CredentialService, SigninRequest, SignupRequest};
pub use token::{
    AccessToken, AccessTokenClaims, TokenError, TokenIssuer, ACCESS_TOKEN_EXPIRY_SECONDS,
};
