//! OAuth client behind a narrow interface.
//!
//! Route handlers and the linking logic only ever see [`OAuthClient`]; the
//! Google implementation is the single place that talks to the network.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use url::Url;

use super::errors::OAuth2Error;
use super::types::{ProviderClaims, ProviderLogin, TokenResponse, TokenSet, UserInfoResponse};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

const OAUTH2_SCOPE: &str = "openid email profile";

/// External OAuth identity provider, reduced to the two steps the
/// application needs.
#[async_trait]
pub trait OAuthClient: Send + Sync {
    /// Provider name stored on account links, e.g. "google".
    fn provider(&self) -> &str;

    /// Build the provider authorization URL the browser is redirected to.
    fn begin_authorization(&self, callback_url: &str) -> Result<String, OAuth2Error>;

    /// Exchange the authorization code for tokens and fetch the user's
    /// identity claims. Returns `Ok(None)` when the provider does not
    /// return user info; network and protocol failures are errors.
    async fn complete_authorization(
        &self,
        code: &str,
        callback_url: &str,
    ) -> Result<Option<ProviderLogin>, OAuth2Error>;
}

/// Google authorization-code flow over the OIDC endpoints.
pub struct GoogleOAuthClient {
    client_id: String,
    client_secret: String,
    http: reqwest::Client,
    auth_url: String,
    token_url: String,
    userinfo_url: String,
}

impl GoogleOAuthClient {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            http: reqwest::Client::new(),
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
        }
    }

    /// Override the provider endpoints, for tests against a local stub.
    #[cfg(test)]
    pub(crate) fn with_endpoints(
        mut self,
        auth_url: String,
        token_url: String,
        userinfo_url: String,
    ) -> Self {
        self.auth_url = auth_url;
        self.token_url = token_url;
        self.userinfo_url = userinfo_url;
        self
    }

    async fn exchange_code(
        &self,
        code: &str,
        callback_url: &str,
    ) -> Result<TokenResponse, OAuth2Error> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", callback_url),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OAuth2Error::TokenExchange(response.status().to_string()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;
        serde_json::from_str(&body)
            .map_err(|e| OAuth2Error::Serde(format!("Failed to deserialize token response: {e}")))
    }

    async fn fetch_userinfo(
        &self,
        access_token: &str,
    ) -> Result<Option<UserInfoResponse>, OAuth2Error> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

        if !response.status().is_success() {
            tracing::warn!("Userinfo endpoint returned {}", response.status());
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;
        let userinfo: UserInfoResponse = serde_json::from_str(&body)
            .map_err(|e| OAuth2Error::Serde(format!("Failed to deserialize userinfo: {e}")))?;
        Ok(Some(userinfo))
    }
}

#[async_trait]
impl OAuthClient for GoogleOAuthClient {
    fn provider(&self) -> &str {
        "google"
    }

    fn begin_authorization(&self, callback_url: &str) -> Result<String, OAuth2Error> {
        let url = Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", callback_url),
                ("response_type", "code"),
                ("scope", OAUTH2_SCOPE),
                ("access_type", "online"),
                ("prompt", "select_account"),
            ],
        )
        .map_err(|e| OAuth2Error::Url(e.to_string()))?;
        Ok(url.into())
    }

    async fn complete_authorization(
        &self,
        code: &str,
        callback_url: &str,
    ) -> Result<Option<ProviderLogin>, OAuth2Error> {
        let token = self.exchange_code(code, callback_url).await?;

        let Some(userinfo) = self.fetch_userinfo(&token.access_token).await? else {
            return Ok(None);
        };

        // Without an email there is nothing to link a local user to
        let Some(email) = userinfo.email else {
            tracing::warn!("Provider returned userinfo without an email claim");
            return Ok(None);
        };

        let expires_at = token
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));

        Ok(Some(ProviderLogin {
            claims: ProviderClaims {
                subject: userinfo.sub,
                email,
                name: userinfo.name,
                picture: userinfo.picture,
            },
            tokens: TokenSet {
                access_token: Some(token.access_token),
                refresh_token: token.refresh_token,
                id_token: token.id_token,
                scope: token.scope,
                expires_at,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_authorization_builds_google_url() {
        let client = GoogleOAuthClient::new("client-id-1".to_string(), "secret".to_string());

        let url = client
            .begin_authorization("https://example.com/auth/callback")
            .expect("url should build");
        let parsed = Url::parse(&url).expect("url should parse");

        assert_eq!(parsed.host_str(), Some("accounts.google.com"));
        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("client_id".to_string(), "client-id-1".to_string())));
        assert!(pairs.contains(&(
            "redirect_uri".to_string(),
            "https://example.com/auth/callback".to_string()
        )));
        assert!(pairs.contains(&("response_type".to_string(), "code".to_string())));
        assert!(pairs.contains(&("scope".to_string(), "openid email profile".to_string())));
    }

    #[test]
    fn test_provider_name() {
        let client = GoogleOAuthClient::new(String::new(), String::new());
        assert_eq!(client.provider(), "google");
    }

    use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get, routing::post};
    use serde_json::{Value, json};

    // Local stand-in for Google's token and userinfo endpoints
    async fn spawn_provider_stub(userinfo: Option<Value>) -> String {
        let app = Router::new()
            .route(
                "/token",
                post(|| async {
                    Json(json!({
                        "access_token": "stub-access-token",
                        "token_type": "Bearer",
                        "expires_in": 3599,
                        "scope": "openid email profile",
                        "id_token": "stub-id-token"
                    }))
                }),
            )
            .route(
                "/userinfo",
                get(move || {
                    let userinfo = userinfo.clone();
                    async move {
                        match userinfo {
                            Some(value) => Json(value).into_response(),
                            None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                        }
                    }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("stub should bind");
        let addr = listener.local_addr().expect("stub should have an address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub should serve");
        });
        format!("http://{addr}")
    }

    fn stub_client(base: &str) -> GoogleOAuthClient {
        GoogleOAuthClient::new("client-id".to_string(), "secret".to_string()).with_endpoints(
            format!("{base}/auth"),
            format!("{base}/token"),
            format!("{base}/userinfo"),
        )
    }

    #[tokio::test]
    async fn test_complete_authorization_returns_claims_and_tokens() {
        let base = spawn_provider_stub(Some(json!({
            "sub": "abc123",
            "email": "u@example.com",
            "name": "U Example",
            "picture": "https://example.com/pic.jpg"
        })))
        .await;
        let client = stub_client(&base);

        let login = client
            .complete_authorization("auth-code", "http://localhost:8000/auth/callback")
            .await
            .expect("exchange should succeed")
            .expect("login should be present");

        assert_eq!(login.claims.subject, "abc123");
        assert_eq!(login.claims.email, "u@example.com");
        assert_eq!(login.claims.name.as_deref(), Some("U Example"));
        assert_eq!(login.tokens.access_token.as_deref(), Some("stub-access-token"));
        assert_eq!(login.tokens.id_token.as_deref(), Some("stub-id-token"));
        assert!(login.tokens.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_complete_authorization_without_userinfo_is_none() {
        let base = spawn_provider_stub(None).await;
        let client = stub_client(&base);

        let login = client
            .complete_authorization("auth-code", "http://localhost:8000/auth/callback")
            .await
            .expect("exchange should succeed");
        assert!(login.is_none());
    }

    #[tokio::test]
    async fn test_complete_authorization_without_email_is_none() {
        let base = spawn_provider_stub(Some(json!({"sub": "abc123", "name": "No Email"}))).await;
        let client = stub_client(&base);

        let login = client
            .complete_authorization("auth-code", "http://localhost:8000/auth/callback")
            .await
            .expect("exchange should succeed");
        assert!(login.is_none());
    }
}
