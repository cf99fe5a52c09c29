use secrecy::{ExposeSecret, Secret};
use unicode_segmentation::UnicodeSegmentation;

/// A raw password accepted at the service boundary. Callers upstream may hand
/// us anything that deserialized into a string; parsing here rejects values
/// that cannot be a meaningful secret instead of silently hashing them.
#[derive(Debug)]
pub struct UserPassword(Secret<String>);

impl UserPassword {
    pub fn parse(s: Secret<String>) -> Result<UserPassword, String> {
        let is_empty_or_whitespace = s.expose_secret().trim().is_empty();

        let is_too_long = s.expose_secret().graphemes(true).count() > 1024;

        if is_empty_or_whitespace || is_too_long {
            // The rejected value is a secret, so the reason stays generic.
            Err("The supplied password is not a well-formed secret".to_string())
        } else {
            Ok(Self(s))
        }
    }

    pub fn into_secret(self) -> Secret<String> {
        self.0
    }
}
