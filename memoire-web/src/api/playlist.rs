//! Playlist endpoints
//!
//! Public read of the curated playlist; mutations live under the
//! dashboard prefix behind the session gate.

use crate::db::playlist;
use crate::db::playlist::Direction;
use crate::error::{Error, Result};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use memoire_common::db::models::{Moment, NewPlaylistItem, PlaylistItem};
use memoire_common::video_link::extract_video_id;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    /// Video URL or bare 11-character token
    link: String,
    #[serde(default)]
    title: Option<String>,
    moment: Moment,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    direction: Direction,
}

/// GET /api/playlist - playlist in play order
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PlaylistItem>>> {
    let items = playlist::list(&state.db).await?;
    Ok(Json(items))
}

/// POST /api/dashboard/playlist - append a video
///
/// With no title supplied, the display title is resolved from the
/// external lookup; lookup failure falls back to a placeholder built from
/// the video reference.
pub async fn add_item(
    State(state): State<AppState>,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let video_id = extract_video_id(&req.link)
        .ok_or_else(|| Error::BadRequest("Invalid video link or id".to_string()))?;

    let title = match req.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => title.to_string(),
        None => match state.titles.fetch_title(&video_id).await {
            Ok(title) => title,
            Err(e) => {
                warn!("Title lookup failed for {}, using placeholder: {}", video_id, e);
                String::new() // builder synthesizes the placeholder
            }
        },
    };

    let item = NewPlaylistItem::new(&title, &video_id, req.moment);
    let id = playlist::add(&state.db, &item).await?;
    info!("Playlist item {} added ({})", id, video_id);

    Ok((StatusCode::CREATED, Json(json!({ "id": id, "title": item.title }))))
}

/// POST /api/dashboard/playlist/:item_id/move - adjacent swap
///
/// Boundary moves answer `moved: false` rather than an error.
pub async fn move_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<serde_json::Value>> {
    let moved = playlist::move_item(&state.db, item_id, req.direction).await?;
    Ok(Json(json!({ "moved": moved })))
}

/// DELETE /api/dashboard/playlist/:item_id - remove and re-densify
pub async fn remove_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<StatusCode> {
    playlist::remove(&state.db, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/dashboard/playlist/refresh-titles - sequential bulk refresh
pub async fn refresh_titles(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let updated = playlist::refresh_titles(&state.db, &state.titles).await?;
    Ok(Json(json!({ "updated": updated })))
}
