use axum::extract::State;
use std::sync::Arc;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::services::RemoteUser;

/// GET /users
///
/// Proxies the remote user list. An unreachable or failing remote yields an empty list.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
) -> DataResponse<Vec<RemoteUser>> {
    tracing::debug!(
        sub = %auth.subject_id,
        email = %auth.email,
        role = auth.role.as_str(),
        verified = auth.is_verified,
        "Listing users"
    );

    DataResponse::new(state.api_client.list_users().await)
}
