mod postgres;
mod sqlite;

use crate::storage::DataStore;

use super::errors::OAuth2Error;
use super::types::Account;

pub(crate) const DB_TABLE_ACCOUNTS: &str = "accounts";

fn unsupported() -> OAuth2Error {
    OAuth2Error::Storage("Unsupported database backend".to_string())
}

/// Store for [`Account`] rows linking local users to provider identities.
pub struct AccountStore;

impl AccountStore {
    pub async fn create_tables(store: &dyn DataStore) -> Result<(), OAuth2Error> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::create_tables_sqlite(pool).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::create_tables_postgres(pool).await
        } else {
            Err(unsupported())
        }
    }

    /// Look up the unique account link for a provider identity.
    pub async fn get_by_provider(
        store: &dyn DataStore,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<Account>, OAuth2Error> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::get_by_provider_sqlite(pool, provider, provider_account_id).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::get_by_provider_postgres(pool, provider, provider_account_id).await
        } else {
            Err(unsupported())
        }
    }

    pub async fn get_for_user(
        store: &dyn DataStore,
        user_id: &str,
    ) -> Result<Vec<Account>, OAuth2Error> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::get_for_user_sqlite(pool, user_id).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::get_for_user_postgres(pool, user_id).await
        } else {
            Err(unsupported())
        }
    }

    /// Insert the account link, or update its owner and tokens when the
    /// `(provider, provider_account_id)` pair already exists.
    pub async fn upsert(store: &dyn DataStore, account: Account) -> Result<Account, OAuth2Error> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::upsert_sqlite(pool, account).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::upsert_postgres(pool, account).await
        } else {
            Err(unsupported())
        }
    }

    pub async fn delete_for_user(store: &dyn DataStore, user_id: &str) -> Result<(), OAuth2Error> {
        if let Some(pool) = store.as_sqlite() {
            sqlite::delete_for_user_sqlite(pool, user_id).await
        } else if let Some(pool) = store.as_postgres() {
            postgres::delete_for_user_postgres(pool, user_id).await
        } else {
            Err(unsupported())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth2::types::{ProviderClaims, ProviderLogin, TokenSet};
    use crate::test_utils::test_store;
    use crate::userdb::{User, UserStore};

    fn login_for(subject: &str, email: &str) -> ProviderLogin {
        ProviderLogin {
            claims: ProviderClaims {
                subject: subject.to_string(),
                email: email.to_string(),
                name: None,
                picture: None,
            },
            tokens: TokenSet {
                access_token: Some("at".to_string()),
                ..TokenSet::default()
            },
        }
    }

    #[tokio::test]
    async fn test_upsert_and_lookup_by_provider() {
        let store = test_store().await;
        let user = UserStore::upsert_user(
            store.as_ref(),
            User::new("acct@example.com".to_string(), None, None),
        )
        .await
        .expect("user insert should succeed");

        let account = Account::from_provider_login(
            &user.id,
            "google",
            &login_for("sub-1", "acct@example.com"),
        );
        AccountStore::upsert(store.as_ref(), account.clone())
            .await
            .expect("upsert should succeed");

        let found = AccountStore::get_by_provider(store.as_ref(), "google", "sub-1")
            .await
            .expect("lookup should succeed")
            .expect("account should exist");
        assert_eq!(found.id, account.id);
        assert_eq!(found.user_id, user.id);

        let missing = AccountStore::get_by_provider(store.as_ref(), "google", "sub-2")
            .await
            .expect("lookup should succeed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_upsert_on_provider_conflict_updates_tokens() {
        let store = test_store().await;
        let user = UserStore::upsert_user(
            store.as_ref(),
            User::new("conflict@example.com".to_string(), None, None),
        )
        .await
        .expect("user insert should succeed");

        let first = Account::from_provider_login(
            &user.id,
            "google",
            &login_for("sub-1", "conflict@example.com"),
        );
        AccountStore::upsert(store.as_ref(), first.clone())
            .await
            .expect("first upsert should succeed");

        // Same provider identity, new row id, new tokens
        let mut second = Account::from_provider_login(
            &user.id,
            "google",
            &login_for("sub-1", "conflict@example.com"),
        );
        second.access_token = Some("at-new".to_string());
        AccountStore::upsert(store.as_ref(), second)
            .await
            .expect("second upsert should succeed");

        let accounts = AccountStore::get_for_user(store.as_ref(), &user.id)
            .await
            .expect("listing should succeed");
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, first.id);
        assert_eq!(accounts[0].access_token.as_deref(), Some("at-new"));
    }

    /// Unlinking removes every provider link of one user and leaves other
    /// users' links untouched.
    #[tokio::test]
    async fn test_delete_for_user_removes_only_that_users_links() {
        let store = test_store().await;
        let user = UserStore::upsert_user(
            store.as_ref(),
            User::new("unlink@example.com".to_string(), None, None),
        )
        .await
        .expect("user insert should succeed");
        let other = UserStore::upsert_user(
            store.as_ref(),
            User::new("keep@example.com".to_string(), None, None),
        )
        .await
        .expect("user insert should succeed");

        for (provider, subject) in [("google", "sub-1"), ("github", "gh-1")] {
            let account = Account::from_provider_login(
                &user.id,
                provider,
                &login_for(subject, "unlink@example.com"),
            );
            AccountStore::upsert(store.as_ref(), account)
                .await
                .expect("upsert should succeed");
        }
        let kept = Account::from_provider_login(
            &other.id,
            "google",
            &login_for("sub-2", "keep@example.com"),
        );
        AccountStore::upsert(store.as_ref(), kept)
            .await
            .expect("upsert should succeed");

        AccountStore::delete_for_user(store.as_ref(), &user.id)
            .await
            .expect("delete should succeed");

        let gone = AccountStore::get_for_user(store.as_ref(), &user.id)
            .await
            .expect("listing should succeed");
        assert!(gone.is_empty());

        let remaining = AccountStore::get_for_user(store.as_ref(), &other.id)
            .await
            .expect("listing should succeed");
        assert_eq!(remaining.len(), 1);
    }
}
