use chrono::{DateTime, Utc};

use super::IdentityClaims;
use crate::domain::Role;

/// Authenticated user context extracted from a verified token
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub subject_id: String,
    pub email: String,
    pub role: Role,
    pub is_verified: bool,
    pub expires_at: DateTime<Utc>,

    /// Raw token, forwarded to the remote API on logout
    token: String,

    claims: IdentityClaims,
}

impl AuthContext {
    pub fn from_claims_with_token(claims: &IdentityClaims, token: &str) -> Result<Self, &'static str> {
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or("Invalid expiry in token")?;

        Ok(Self {
            subject_id: claims.subject_id.clone(),
            email: claims.email.clone(),
            role: claims.role,
            is_verified: claims.is_verified,
            expires_at,
            token: token.to_string(),
            claims: claims.clone(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &IdentityClaims {
        &self.claims
    }
}
