mod client;
mod errors;
mod storage;
mod types;

pub use client::{GoogleOAuthClient, OAuthClient};
pub use errors::OAuth2Error;
pub use storage::AccountStore;
pub use types::{Account, ProviderClaims, ProviderLogin, TokenSet};
