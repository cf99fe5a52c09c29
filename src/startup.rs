use crate::authentication::{CredentialService, TokenIssuer};
use crate::configuration::Settings;
use crate::domain::CredentialStore;
use std::sync::Arc;

/// Composition root: wire configuration and a store into a ready-to-use
/// service. Collaborators are passed explicitly; nothing is looked up from
/// ambient state after this point.
pub fn build_credential_service(
    configuration: &Settings,
    store: Arc<dyn CredentialStore + Send + Sync>,
) -> CredentialService {
    let token_issuer = TokenIssuer::new(configuration.auth.access_token_secret.clone());

    CredentialService::new(store, token_issuer)
}
