use serde::{Deserialize, Serialize};

use crate::domain::{Role, UserRecord};

/// JWT payload identifying a dashboard user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityClaims {
    /// Subject (opaque user ID)
    #[serde(rename = "sub")]
    pub subject_id: String,

    pub email: String,

    pub role: Role,

    #[serde(default)]
    pub is_verified: bool,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl IdentityClaims {
    pub fn for_user(user: &UserRecord, iat: i64, exp: i64) -> Self {
        Self {
            subject_id: user.subject_id.clone(),
            email: user.email.clone(),
            role: user.role,
            is_verified: user.is_verified,
            iat,
            exp,
        }
    }
}
