use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A link between a local user and one identity-provider account.
///
/// `(provider, provider_account_id)` identifies at most one row; the stored
/// tokens are refreshed on every successful login through that identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Account {
    pub id: String,
    pub user_id: String,
    /// Provider name, e.g. "google"
    pub provider: String,
    /// Provider-assigned account id (the OIDC `sub` claim)
    pub provider_account_id: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub access_token_expires_at: Option<DateTime<Utc>>,
    pub scope: Option<String>,
    pub id_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Build a fresh account link for `user_id` from a completed provider
    /// login.
    pub fn from_provider_login(user_id: &str, provider: &str, login: &ProviderLogin) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            provider: provider.to_string(),
            provider_account_id: login.claims.subject.clone(),
            access_token: login.tokens.access_token.clone(),
            refresh_token: login.tokens.refresh_token.clone(),
            access_token_expires_at: login.tokens.expires_at,
            scope: login.tokens.scope.clone(),
            id_token: login.tokens.id_token.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored tokens with those from a new login.
    pub fn refresh_tokens(&mut self, tokens: &TokenSet) {
        self.access_token = tokens.access_token.clone();
        self.refresh_token = tokens.refresh_token.clone();
        self.access_token_expires_at = tokens.expires_at;
        self.scope = tokens.scope.clone();
        self.id_token = tokens.id_token.clone();
        self.updated_at = Utc::now();
    }
}

/// Identity claims extracted from the provider on callback.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderClaims {
    /// Provider-assigned subject id
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Tokens returned by the provider's token endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSet {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    pub scope: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Result of a completed authorization-code exchange: who the provider says
/// the user is, plus the tokens to store on the account link.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderLogin {
    pub claims: ProviderClaims,
    pub tokens: TokenSet,
}

// Wire format of the provider's token endpoint response
#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub(super) access_token: String,
    #[allow(dead_code)]
    pub(super) token_type: Option<String>,
    pub(super) expires_in: Option<i64>,
    pub(super) refresh_token: Option<String>,
    pub(super) scope: Option<String>,
    pub(super) id_token: Option<String>,
}

// Wire format of the OIDC userinfo endpoint response
#[derive(Debug, Deserialize)]
pub(super) struct UserInfoResponse {
    pub(super) sub: String,
    pub(super) email: Option<String>,
    pub(super) name: Option<String>,
    pub(super) picture: Option<String>,
}
