//! Request and response bodies for the token endpoints.

use serde::{Deserialize, Serialize};

use crate::auth::IdentityClaims;

/// Token verification request
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyTokenRequest {
    pub token: String,
}

/// Freshly issued token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Unix timestamp
    pub expires_at: i64,
}

/// Current session with display-ready expiry fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: IdentityClaims,
    pub expires_at: i64,
    pub expires_on: String,
    pub expires_at_time: String,
    pub time_remaining: String,
}
