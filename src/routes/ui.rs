use axum::extract::Path;
use serde::Serialize;

use crate::api::DataResponse;
use crate::domain::{status_color, StatusPalette};

#[derive(Serialize)]
pub struct StatusColorResponse {
    pub status: String,
    pub color: &'static str,
}

/// GET /ui/status-colors
pub async fn status_colors() -> DataResponse<StatusPalette> {
    DataResponse::new(StatusPalette::build())
}

/// GET /ui/status-colors/:status
///
/// Unknown statuses get the default color rather than a 404.
pub async fn status_color_for(Path(status): Path<String>) -> DataResponse<StatusColorResponse> {
    let color = status_color(&status);
    DataResponse::new(StatusColorResponse { status, color })
}
