//! Video title proxy endpoint
//!
//! Fronts the external oEmbed lookup so the browser never talks to the
//! video host directly. Status mapping: 400 invalid token, 404 upstream
//! miss or missing title, 502 upstream network failure.

use crate::services::title_lookup::TitleError;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    #[serde(rename = "videoId")]
    video_id: String,
}

/// GET /api/video-title?videoId= - resolve a video token to its title
pub async fn get_title(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> Response {
    match state.titles.fetch_title(&query.video_id).await {
        Ok(title) => (StatusCode::OK, Json(json!({ "title": title }))).into_response(),
        Err(TitleError::InvalidId) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid videoId" })),
        )
            .into_response(),
        Err(TitleError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Video not found or title unavailable" })),
        )
            .into_response(),
        Err(TitleError::Upstream(e)) => {
            tracing::warn!("Title lookup upstream failure: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "Title service unreachable" })),
            )
                .into_response()
        }
    }
}
