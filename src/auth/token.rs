//! HS256 token issuance and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use super::IdentityClaims;
use crate::domain::UserRecord;

/// Tokens are valid for exactly one day after issuance.
pub const TOKEN_VALIDITY_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Signs and verifies identity tokens with a shared secret.
///
/// Holds no mutable state; clones share nothing but key material.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn validity() -> Duration {
        Duration::seconds(TOKEN_VALIDITY_SECONDS)
    }

    /// Issue a token for `user` that expires one day from now.
    pub fn issue(&self, user: &UserRecord) -> Result<String, TokenError> {
        self.issue_at(user, Utc::now())
    }

    pub fn issue_at(&self, user: &UserRecord, now: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = IdentityClaims::for_user(user, iat, iat + TOKEN_VALIDITY_SECONDS);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Check signature and expiry against the current time.
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaims, TokenError> {
        // Expiry is checked below against `now` rather than the system clock
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<IdentityClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                TokenError::InvalidOrExpiredToken
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            tracing::debug!(sub = %claims.subject_id, exp = claims.exp, "token expired");
            return Err(TokenError::InvalidOrExpiredToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use chrono::TimeZone;

    fn user() -> UserRecord {
        UserRecord {
            subject_id: "64f1c2".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::Admin,
            is_verified: true,
        }
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn verify_returns_the_issued_claims() {
        let service = TokenService::new("test-secret");
        let token = service.issue(&user()).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.subject_id, "64f1c2");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.is_verified);
    }

    #[test]
    fn round_trips_unverified_user_with_non_ascii_subject() {
        let service = TokenService::new("test-secret");
        let user = UserRecord {
            subject_id: "użytkownik-東京-ß".to_string(),
            email: "grace@example.org".to_string(),
            role: Role::User,
            is_verified: false,
        };

        let token = service.issue_at(&user, issued_at()).unwrap();
        let claims = service
            .verify_at(&token, issued_at() + Duration::hours(1))
            .unwrap();

        assert_eq!(claims.subject_id, user.subject_id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, Role::User);
        assert!(!claims.is_verified);
        assert_eq!(claims, IdentityClaims::for_user(&user, claims.iat, claims.exp));
    }

    #[test]
    fn token_has_three_segments() {
        let service = TokenService::new("test-secret");
        let token = service.issue(&user()).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn expiry_is_exactly_one_day_after_issuance() {
        let service = TokenService::new("test-secret");
        let token = service.issue_at(&user(), issued_at()).unwrap();
        let claims = service.verify_at(&token, issued_at()).unwrap();

        assert_eq!(claims.iat, issued_at().timestamp());
        assert_eq!(claims.exp - claims.iat, TOKEN_VALIDITY_SECONDS);
    }

    #[test]
    fn token_is_valid_until_the_window_closes() {
        let service = TokenService::new("test-secret");
        let token = service.issue_at(&user(), issued_at()).unwrap();

        let just_before = issued_at() + TokenService::validity() - Duration::seconds(1);
        assert!(service.verify_at(&token, just_before).is_ok());

        let at_expiry = issued_at() + TokenService::validity();
        assert!(matches!(
            service.verify_at(&token, at_expiry),
            Err(TokenError::InvalidOrExpiredToken)
        ));
    }

    #[test]
    fn token_older_than_a_day_is_rejected_by_verify() {
        let service = TokenService::new("test-secret");
        let token = service
            .issue_at(&user(), Utc::now() - Duration::days(2))
            .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(TokenError::InvalidOrExpiredToken)
        ));
    }

    #[test]
    fn different_secret_is_rejected() {
        let issuer = TokenService::new("secret-a");
        let verifier = TokenService::new("secret-b");
        let token = issuer.issue(&user()).unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(TokenError::InvalidOrExpiredToken)
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        let service = TokenService::new("test-secret");
        assert!(matches!(
            service.verify("invalid_token"),
            Err(TokenError::InvalidOrExpiredToken)
        ));
        assert!(service.verify("").is_err());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let service = TokenService::new("test-secret");
        let token = service.issue(&user()).unwrap();
        let other = service
            .issue(&UserRecord {
                role: Role::User,
                ..user()
            })
            .unwrap();

        // Splice the second token's payload onto the first token's signature
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(service.verify(&forged).is_err());
    }
}
