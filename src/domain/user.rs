//! User records handed to the token service at sign-in.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?xi) ^[A-Z0-9._%+-]+@[A-Z0-9-]+(?:\.[A-Z0-9-]+)*\.[A-Z]{2,}$")
        .expect("email pattern compiles")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Dashboard role carried in the identity claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

/// The attributes a signed token asserts about a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub subject_id: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub is_verified: bool,
}

impl UserRecord {
    pub fn validate(&self) -> Result<(), String> {
        if self.subject_id.trim().is_empty() {
            return Err("subjectId must not be empty".to_string());
        }

        if !is_valid_email(self.email.trim()) {
            return Err(format!("Email {} is not valid", self.email));
        }

        Ok(())
    }
}
