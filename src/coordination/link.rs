//! Identity linking: resolve a federated identity to a local user.

use crate::oauth2::{Account, AccountStore, ProviderLogin};
use crate::storage::DataStore;
use crate::userdb::{User, UserStore};

use super::errors::CoordinationError;

/// Find or create the local user for a completed provider login, and keep
/// the account link's stored tokens current.
///
/// Resolution order:
/// 1. An existing account link for `(provider, subject)` wins; its tokens
///    are refreshed and its owning user returned. An account whose user row
///    is missing is treated as unlinked and falls through.
/// 2. Otherwise the user is matched by email, so one local user can
///    accumulate several federated identities sharing that email.
/// 3. Otherwise a new user is created with `email_verified = true` — the
///    provider has already verified the address.
///
/// In cases 2 and 3 a fresh account link is recorded with the login's
/// tokens.
pub async fn get_or_create_user(
    store: &dyn DataStore,
    provider: &str,
    login: &ProviderLogin,
) -> Result<User, CoordinationError> {
    let claims = &login.claims;

    if let Some(mut account) =
        AccountStore::get_by_provider(store, provider, &claims.subject).await?
    {
        match UserStore::get_user(store, &account.user_id).await? {
            Some(user) => {
                account.refresh_tokens(&login.tokens);
                AccountStore::upsert(store, account).await?;
                tracing::debug!("Signing in {} via existing {} link", user.email, provider);
                return Ok(user);
            }
            None => {
                // Integrity anomaly: the link outlived its user. Re-link it
                // below instead of failing the login.
                tracing::warn!(
                    "Account {}/{} references missing user {}; relinking",
                    provider,
                    claims.subject,
                    account.user_id
                );
            }
        }
    }

    let user = match UserStore::get_user_by_email(store, &claims.email).await? {
        Some(user) => user,
        None => {
            let mut user = User::new(
                claims.email.clone(),
                claims.name.clone(),
                claims.picture.clone(),
            );
            // A federated login implies the provider verified the email
            user.email_verified = true;
            let user = UserStore::upsert_user(store, user).await?;
            tracing::info!("Created user {} for {} login", user.email, provider);
            user
        }
    };

    let account = Account::from_provider_login(&user.id, provider, login);
    AccountStore::upsert(store, account).await?;

    Ok(user)
}
