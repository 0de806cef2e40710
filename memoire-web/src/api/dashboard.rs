//! Couple-only moderation endpoints (behind the session gate)
//!
//! State machine per media item: pending -> approved (approve),
//! approved -> pending (unapprove), pending -> deleted (reject, hard
//! delete with its likes/comments). Direct add bypasses the pending state.

use crate::db::media;
use crate::error::{Error, Result};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use memoire_common::db::models::{Media, MediaKind, Moment, NewMedia};
use memoire_common::media_link::extract_asset_ref;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AddMediaRequest {
    /// Media CDN URL or bare asset reference
    link: String,
    kind: MediaKind,
    moment: Moment,
    #[serde(default)]
    caption: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApprovalRequest {
    approved: bool,
}

/// GET /api/dashboard/media - approved + pending, newest first
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Media>>> {
    let media = media::list_all(&state.db, &state.site.couple_id).await?;
    Ok(Json(media))
}

/// GET /api/dashboard/media/pending - moderation queue
pub async fn list_pending(State(state): State<AppState>) -> Result<Json<Vec<Media>>> {
    let media = media::list_pending(&state.db, &state.site.couple_id).await?;
    Ok(Json(media))
}

/// POST /api/dashboard/media - direct add by CDN link, approved immediately
pub async fn add_media(
    State(state): State<AppState>,
    Json(req): Json<AddMediaRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let asset_ref = extract_asset_ref(&req.link)
        .ok_or_else(|| Error::BadRequest("Invalid media link or asset reference".to_string()))?;

    let new_media = NewMedia::direct_add(
        &state.site.couple_id,
        req.kind,
        &asset_ref,
        req.moment,
        req.caption.as_deref(),
    );
    let id = media::create(&state.db, &new_media).await?;
    info!("Media {} added directly ({})", id, asset_ref);

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// POST /api/dashboard/media/:media_id/approval - approve or unapprove
pub async fn set_approval(
    State(state): State<AppState>,
    Path(media_id): Path<Uuid>,
    Json(req): Json<ApprovalRequest>,
) -> Result<Json<serde_json::Value>> {
    let found = media::set_approval(&state.db, media_id, req.approved).await?;
    if !found {
        return Err(Error::NotFound(format!("Media not found: {}", media_id)));
    }
    info!(
        "Media {} {}",
        media_id,
        if req.approved { "approved" } else { "returned to moderation" }
    );
    Ok(Json(json!({ "status": "ok" })))
}

/// DELETE /api/dashboard/media/:media_id - reject (hard delete)
///
/// Idempotent: deleting a missing id still answers 204, the caller's list
/// already dropped it.
pub async fn delete_media(
    State(state): State<AppState>,
    Path(media_id): Path<Uuid>,
) -> Result<StatusCode> {
    media::delete(&state.db, media_id).await?;
    info!("Media {} rejected", media_id);
    Ok(StatusCode::NO_CONTENT)
}
