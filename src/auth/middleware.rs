use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use super::AuthContext;
use crate::app::AppState;
use crate::error::ErrorResponse;

/// Extractor that requires a valid identity token.
///
/// The token is read from `Authorization: Bearer <token>` first and
/// falls back to the auth cookie.
///
/// ```ignore
/// async fn protected_route(auth: RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}", auth.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthContext);

impl std::ops::Deref for RequireAuth {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidFormat,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Missing authorization token",
            AuthError::InvalidFormat => "Invalid authorization format",
            AuthError::InvalidToken => "Invalid or expired token",
        };

        let body = ErrorResponse {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
        };

        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Pull the raw token out of the request headers.
///
/// A Bearer `Authorization` header is authoritative. Any other scheme (for
/// example Basic credentials added by a proxy) falls through to the cookie and
/// only fails with `InvalidFormat` when no cookie is present either.
fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Result<String, AuthError> {
    let bearer = headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().ok().and_then(|v| v.strip_prefix("Bearer ")));

    if let Some(Some(token)) = bearer {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        return Ok(token.to_string());
    }

    let from_cookie = CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());

    match (from_cookie, bearer) {
        (Some(token), _) => Ok(token),
        (None, Some(None)) => Err(AuthError::InvalidFormat),
        (None, _) => Err(AuthError::MissingToken),
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers, &state.settings.auth_cookie_name)?;

        let claims = state.tokens.verify(&token).map_err(|e| {
            tracing::warn!(error = %e, "token verification failed");
            AuthError::InvalidToken
        })?;

        let context = AuthContext::from_claims_with_token(&claims, &token).map_err(|e| {
            tracing::warn!(error = %e, "Failed to build auth context");
            AuthError::InvalidToken
        })?;

        Ok(RequireAuth(context))
    }
}
