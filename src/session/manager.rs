//! Session lifecycle: issue, resolve, and delete opaque bearer tokens.

use chrono::Utc;

use crate::storage::DataStore;
use crate::userdb::{User, UserStore};
use crate::utils::gen_random_string;

use super::errors::SessionError;
use super::storage::SessionStore;
use super::types::Session;

// 32 bytes of entropy, base64url-encoded
const SESSION_TOKEN_BYTES: usize = 32;

/// Issue a new session for `user_id` and persist it.
///
/// The token is cryptographically random and URL-safe; expiry is 30 days
/// from now. Client IP and user agent are stored for audit only.
pub async fn create_session(
    store: &dyn DataStore,
    user_id: &str,
    ip_address: Option<String>,
    user_agent: Option<String>,
) -> Result<Session, SessionError> {
    let token = gen_random_string(SESSION_TOKEN_BYTES)?;
    let session = Session::new(user_id, token, ip_address, user_agent);
    SessionStore::insert(store, &session).await?;
    tracing::debug!("Created session {} for user {}", session.id, user_id);
    Ok(session)
}

/// Resolve a bearer token to its user and session.
///
/// Returns `None` when the token is unknown or the session has expired;
/// absence is the expected outcome for unauthenticated requests, not an
/// error. Also returns `None` when the session references a user that no
/// longer exists.
pub async fn resolve_session(
    store: &dyn DataStore,
    token: &str,
) -> Result<Option<(User, Session)>, SessionError> {
    let Some(session) = SessionStore::get_active_by_token(store, token, Utc::now()).await? else {
        return Ok(None);
    };

    let Some(user) = UserStore::get_user(store, &session.user_id).await? else {
        tracing::warn!(
            "Session {} references missing user {}",
            session.id,
            session.user_id
        );
        return Ok(None);
    };

    Ok(Some((user, session)))
}

/// Remove the session stored under `token`. Unknown tokens are a no-op.
pub async fn delete_session(store: &dyn DataStore, token: &str) -> Result<(), SessionError> {
    SessionStore::delete_by_token(store, token).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_store;
    use chrono::Duration;

    async fn seeded_user(store: &dyn DataStore, email: &str) -> User {
        let user = User::new(email.to_string(), None, None);
        UserStore::upsert_user(store, user)
            .await
            .expect("user insert should succeed")
    }

    #[tokio::test]
    async fn test_create_and_resolve_roundtrip() {
        let store = test_store().await;
        let user = seeded_user(store.as_ref(), "session@example.com").await;

        let session = create_session(
            store.as_ref(),
            &user.id,
            Some("127.0.0.1".to_string()),
            Some("test-agent".to_string()),
        )
        .await
        .expect("create should succeed");

        let (resolved_user, resolved_session) = resolve_session(store.as_ref(), &session.token)
            .await
            .expect("resolve should succeed")
            .expect("session should resolve");

        assert_eq!(resolved_user.id, user.id);
        assert_eq!(resolved_session.id, session.id);
        assert_eq!(resolved_session.ip_address.as_deref(), Some("127.0.0.1"));
        assert_eq!(resolved_session.user_agent.as_deref(), Some("test-agent"));
    }

    #[tokio::test]
    async fn test_unknown_token_resolves_to_none() {
        let store = test_store().await;

        let resolved = resolve_session(store.as_ref(), "never-issued")
            .await
            .expect("resolve should succeed");
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_resolves_to_none() {
        let store = test_store().await;
        let user = seeded_user(store.as_ref(), "expired@example.com").await;

        let session = create_session(store.as_ref(), &user.id, None, None)
            .await
            .expect("create should succeed");

        // Reinsert the same token with an expiry in the past
        let mut expired = session.clone();
        expired.expires_at = Utc::now() - Duration::seconds(1);
        SessionStore::delete_by_token(store.as_ref(), &session.token)
            .await
            .expect("delete should succeed");
        SessionStore::insert(store.as_ref(), &expired)
            .await
            .expect("insert should succeed");

        let resolved = resolve_session(store.as_ref(), &session.token)
            .await
            .expect("resolve should succeed");
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = test_store().await;
        let user = seeded_user(store.as_ref(), "delete@example.com").await;

        let session = create_session(store.as_ref(), &user.id, None, None)
            .await
            .expect("create should succeed");

        delete_session(store.as_ref(), &session.token)
            .await
            .expect("first delete should succeed");
        assert!(
            resolve_session(store.as_ref(), &session.token)
                .await
                .expect("resolve should succeed")
                .is_none()
        );

        // Deleting again, or deleting a token never issued, is a no-op
        delete_session(store.as_ref(), &session.token)
            .await
            .expect("second delete should succeed");
        delete_session(store.as_ref(), "never-issued")
            .await
            .expect("unknown token delete should succeed");
    }

    /// A session row whose user has vanished without the cascade firing
    /// (data written before the constraint, or by an external tool) resolves
    /// to `None` instead of erroring.
    #[tokio::test]
    async fn test_session_with_dangling_user_resolves_to_none() {
        let store = test_store().await;
        let user = seeded_user(store.as_ref(), "dangling@example.com").await;

        let session = create_session(store.as_ref(), &user.id, None, None)
            .await
            .expect("create should succeed");

        // With foreign keys off on the single in-memory connection, deleting
        // the user leaves the session row behind with a dangling user_id
        let pool = store.as_sqlite().expect("test store is sqlite");
        sqlx::query("PRAGMA foreign_keys = OFF")
            .execute(pool)
            .await
            .expect("pragma should apply");
        UserStore::delete_user(store.as_ref(), &user.id)
            .await
            .expect("user delete should succeed");

        let resolved = resolve_session(store.as_ref(), &session.token)
            .await
            .expect("resolve should succeed");
        assert!(resolved.is_none());
    }

    /// A stale cookie left over after the user row is gone (sessions cascade
    /// on user deletion) is treated as unauthenticated.
    #[tokio::test]
    async fn test_session_after_user_deletion_resolves_to_none() {
        let store = test_store().await;
        let user = seeded_user(store.as_ref(), "vanishing@example.com").await;

        let session = create_session(store.as_ref(), &user.id, None, None)
            .await
            .expect("create should succeed");

        UserStore::delete_user(store.as_ref(), &user.id)
            .await
            .expect("user delete should succeed");

        let resolved = resolve_session(store.as_ref(), &session.token)
            .await
            .expect("resolve should succeed");
        assert!(resolved.is_none());
    }
}
