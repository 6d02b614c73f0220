//! Client for the remote dashboard API.
//!
//! Every failure (connect error, non-2xx status, undecodable body) is logged
//! and degraded to an empty or negative result. Nothing is retried.

use anyhow::{Context, Result};
use reqwest::{
    header::{AUTHORIZATION, COOKIE},
    Client,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// A user as listed by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RemoteUserWire")]
pub struct RemoteUser {
    /// String or numeric depending on the backing store
    pub id: serde_json::Value,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_verified: bool,
}

/// Remote user as sent; document stores may send `_id`, `id`, or both.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteUserWire {
    #[serde(default)]
    id: serde_json::Value,
    #[serde(default, rename = "_id")]
    mongo_id: serde_json::Value,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default, alias = "is_verified")]
    is_verified: bool,
}

impl From<RemoteUserWire> for RemoteUser {
    fn from(wire: RemoteUserWire) -> Self {
        let id = if wire.id.is_null() { wire.mongo_id } else { wire.id };

        Self {
            id,
            email: wire.email,
            name: wire.name,
            role: wire.role,
            is_verified: wire.is_verified,
        }
    }
}

/// The user list arrives either bare or wrapped in an envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UsersPayload {
    List(Vec<RemoteUser>),
    Users { users: Vec<RemoteUser> },
    Data { data: Vec<RemoteUser> },
}

impl UsersPayload {
    fn into_users(self) -> Vec<RemoteUser> {
        match self {
            Self::List(users) | Self::Users { users } | Self::Data { data: users } => users,
        }
    }
}

/// Caller credentials passed through to the remote API.
#[derive(Debug, Clone, Default)]
pub struct ForwardedCredentials {
    pub bearer: Option<String>,
    pub cookie: Option<String>,
}

#[derive(Clone)]
pub struct RemoteApiClient {
    client: Client,
    base_url: Url,
}

impl RemoteApiClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        // A trailing slash makes `Url::join` append instead of replace
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .with_context(|| format!("Invalid API base URL: {base_url}"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(base_url = %base_url, "Remote API client initialized");

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Option<Url> {
        match self.base_url.join(path) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, path, "Failed to build remote API URL");
                None
            }
        }
    }

    /// GET /api/users/
    pub async fn list_users(&self) -> Vec<RemoteUser> {
        let Some(url) = self.endpoint("api/users/") else {
            return Vec::new();
        };

        debug!(url = %url, "Fetching users");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Failed to fetch users");
                return Vec::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Remote API refused user list");
            return Vec::new();
        }

        match response.json::<UsersPayload>().await {
            Ok(payload) => payload.into_users(),
            Err(e) => {
                warn!(error = %e, "Failed to parse user list");
                Vec::new()
            }
        }
    }

    /// POST /api/auth/logout with the caller's credentials included.
    ///
    /// Returns whether the remote session was invalidated.
    pub async fn logout(&self, credentials: &ForwardedCredentials) -> bool {
        let Some(url) = self.endpoint("api/auth/logout") else {
            return false;
        };

        let mut req = self.client.post(url);
        if let Some(token) = &credentials.bearer {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(cookie) = &credentials.cookie {
            req = req.header(COOKIE, cookie);
        }

        match req.send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(status = %response.status(), "Remote logout rejected");
                false
            }
            Err(e) => {
                warn!(error = %e, "Remote logout failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };

    async fn spawn_remote(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// An address nothing listens on.
    async fn dead_address() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn list_users_reads_bare_array() {
        let router = Router::new().route(
            "/api/users/",
            get(|| async {
                Json(serde_json::json!([
                    {"_id": "a1", "email": "ada@example.com", "role": "admin", "isVerified": true},
                    {"id": 7, "name": "Grace"}
                ]))
            }),
        );
        let client = RemoteApiClient::new(&spawn_remote(router).await, 5).unwrap();

        let users = client.list_users().await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, serde_json::json!("a1"));
        assert_eq!(users[0].email.as_deref(), Some("ada@example.com"));
        assert!(users[0].is_verified);
        assert_eq!(users[1].id, serde_json::json!(7));
        assert_eq!(users[1].name.as_deref(), Some("Grace"));
        assert!(!users[1].is_verified);
    }

    #[tokio::test]
    async fn list_users_unwraps_envelope() {
        let router = Router::new().route(
            "/api/users/",
            get(|| async { Json(serde_json::json!({"users": [{"email": "x@example.com"}]})) }),
        );
        let base = format!("{}/", spawn_remote(router).await);
        let client = RemoteApiClient::new(&base, 5).unwrap();

        let users = client.list_users().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email.as_deref(), Some("x@example.com"));
    }

    #[tokio::test]
    async fn list_users_accepts_both_id_keys() {
        let router = Router::new().route(
            "/api/users/",
            get(|| async {
                Json(serde_json::json!([
                    {"_id": "a", "id": "a", "email": "x@y.z"},
                    {"_id": "b"}
                ]))
            }),
        );
        let client = RemoteApiClient::new(&spawn_remote(router).await, 5).unwrap();

        let users = client.list_users().await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, serde_json::json!("a"));
        assert_eq!(users[0].email.as_deref(), Some("x@y.z"));
        assert_eq!(users[1].id, serde_json::json!("b"));
    }

    #[test]
    fn id_wins_over_underscore_id() {
        let users: Vec<RemoteUser> =
            serde_json::from_str(r#"[{"_id":"mongo","id":"virtual"},{}]"#).unwrap();
        assert_eq!(users[0].id, serde_json::json!("virtual"));
        assert!(users[1].id.is_null());
    }

    #[tokio::test]
    async fn list_users_degrades_on_server_error() {
        let router = Router::new().route(
            "/api/users/",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let client = RemoteApiClient::new(&spawn_remote(router).await, 5).unwrap();
        assert!(client.list_users().await.is_empty());
    }

    #[tokio::test]
    async fn list_users_degrades_on_bad_json() {
        let router = Router::new().route("/api/users/", get(|| async { "not json" }));
        let client = RemoteApiClient::new(&spawn_remote(router).await, 5).unwrap();
        assert!(client.list_users().await.is_empty());
    }

    #[tokio::test]
    async fn list_users_degrades_when_unreachable() {
        let client = RemoteApiClient::new(&dead_address().await, 5).unwrap();
        assert!(client.list_users().await.is_empty());
    }

    #[tokio::test]
    async fn logout_forwards_credentials() {
        let router = Router::new().route(
            "/api/auth/logout",
            post(|headers: HeaderMap| async move {
                let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
                let cookie = headers.get("cookie").and_then(|v| v.to_str().ok());
                if bearer == Some("Bearer abc") && cookie == Some("sid=1") {
                    StatusCode::NO_CONTENT
                } else {
                    StatusCode::UNAUTHORIZED
                }
            }),
        );
        let client = RemoteApiClient::new(&spawn_remote(router).await, 5).unwrap();

        let with_credentials = ForwardedCredentials {
            bearer: Some("abc".to_string()),
            cookie: Some("sid=1".to_string()),
        };
        assert!(client.logout(&with_credentials).await);
        assert!(!client.logout(&ForwardedCredentials::default()).await);
    }

    #[tokio::test]
    async fn logout_degrades_when_unreachable() {
        let client = RemoteApiClient::new(&dead_address().await, 5).unwrap();
        assert!(!client.logout(&ForwardedCredentials::default()).await);
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(RemoteApiClient::new("not a url", 5).is_err());
    }
}
