//! Token routes
//!
//! Issue, verify and inspect identity tokens, and log out against the remote API.

use axum::{
    extract::State,
    http::{header::COOKIE, HeaderMap},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use std::sync::Arc;

use crate::api::{DataResponse, NoContent};
use crate::app::AppState;
use crate::auth::{IdentityClaims, RequireAuth, TokenService};
use crate::domain::auth::{SessionResponse, TokenResponse, VerifyTokenRequest};
use crate::domain::UserRecord;
use crate::error::{ApiError, ApiResult};
use crate::format::{format_date, format_time, format_time_remaining};
use crate::services::ForwardedCredentials;

fn auth_cookie(name: &str, token: String) -> Cookie<'static> {
    Cookie::build((name.to_string(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// POST /auth/token
///
/// Sign a one-day token for the given user and set it as the auth cookie.
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(user): Json<UserRecord>,
) -> ApiResult<(CookieJar, DataResponse<TokenResponse>)> {
    user.validate().map_err(ApiError::BadRequest)?;

    let now = Utc::now();
    let token = state.tokens.issue_at(&user, now)?;
    let expires_at = (now + TokenService::validity()).timestamp();

    tracing::info!(sub = %user.subject_id, role = user.role.as_str(), "Issued token");

    let jar = jar.add(auth_cookie(&state.settings.auth_cookie_name, token.clone()));
    let body = TokenResponse {
        token,
        token_type: "Bearer",
        expires_at,
    };

    Ok((jar, DataResponse::new(body)))
}

/// POST /auth/verify
pub async fn verify_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyTokenRequest>,
) -> ApiResult<DataResponse<IdentityClaims>> {
    let claims = state.tokens.verify(&req.token)?;
    Ok(DataResponse::new(claims))
}

/// GET /auth/session
pub async fn get_session(auth: RequireAuth) -> DataResponse<SessionResponse> {
    let now = Utc::now();

    DataResponse::new(SessionResponse {
        user: auth.claims().clone(),
        expires_at: auth.expires_at.timestamp(),
        expires_on: format_date(auth.expires_at),
        expires_at_time: format_time(auth.expires_at),
        time_remaining: format_time_remaining(auth.expires_at, now),
    })
}

/// POST /auth/logout
///
/// Always succeeds locally; the remote call is best effort. Where to navigate
/// afterwards is left to the client.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, NoContent) {
    let credentials = ForwardedCredentials {
        bearer: Some(auth.token().to_string()),
        cookie: headers
            .get(COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };

    let remote_ok = state.api_client.logout(&credentials).await;
    tracing::info!(sub = %auth.subject_id, remote_ok, "User logged out");

    let removal = Cookie::build((state.settings.auth_cookie_name.clone(), "")).path("/");
    (jar.remove(removal), NoContent)
}
