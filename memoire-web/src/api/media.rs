//! Public media endpoints: gallery listing, comments, likes

use crate::db::{engagement, media};
use crate::db::engagement::{CommentOutcome, ToggleOutcome};
use crate::error::{Error, Result};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use memoire_common::db::models::{Comment, Media, Moment};
use memoire_common::media_url::{url_for_intent, DisplayIntent};
use memoire_common::VisitorIdentity;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct MediaListQuery {
    moment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    visitor_id: Uuid,
    #[serde(default)]
    author_name: Option<String>,
    content: String,
}

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    visitor_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct LikedQuery {
    visitor_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    liked: bool,
    likes_count: i64,
}

/// Media record plus its ready-to-fetch CDN delivery URLs
#[derive(Debug, Serialize)]
pub struct MediaResponse {
    #[serde(flatten)]
    media: Media,
    thumbnail_url: String,
    display_url: String,
}

impl MediaResponse {
    fn build(media: Media, cloud_name: &str) -> Self {
        let thumbnail_url =
            url_for_intent(cloud_name, &media.asset_ref, media.kind, DisplayIntent::Thumbnail);
        let display_url =
            url_for_intent(cloud_name, &media.asset_ref, media.kind, DisplayIntent::Fullscreen);
        Self {
            media,
            thumbnail_url,
            display_url,
        }
    }
}

/// GET /api/media?moment= - approved media, newest first, with delivery URLs
pub async fn list_media(
    State(state): State<AppState>,
    Query(query): Query<MediaListQuery>,
) -> Result<Json<Vec<MediaResponse>>> {
    let moment = match query.moment.as_deref() {
        Some(s) => Some(
            Moment::from_str(s)
                .ok_or_else(|| Error::BadRequest(format!("Unknown moment tag: {}", s)))?,
        ),
        None => None,
    };

    let media = media::list_approved(&state.db, &state.site.couple_id, moment).await?;
    let cloud_name = &state.site.media_cloud_name;
    Ok(Json(
        media
            .into_iter()
            .map(|m| MediaResponse::build(m, cloud_name))
            .collect(),
    ))
}

/// GET /api/media/:media_id/comments - approved comments, newest first
pub async fn list_comments(
    State(state): State<AppState>,
    Path(media_id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>> {
    let comments = engagement::list_comments(&state.db, media_id).await?;
    Ok(Json(comments))
}

/// POST /api/media/:media_id/comments - submit a comment
///
/// 201 with the new id; 400 for whitespace-only content; 404 for an
/// unknown media id; 429 with a distinguished body when rate-limited.
pub async fn post_comment(
    State(state): State<AppState>,
    Path(media_id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    if media::get(&state.db, media_id).await?.is_none() {
        return Err(Error::NotFound(format!("Media not found: {}", media_id)));
    }

    let visitor = VisitorIdentity::from_parts(req.visitor_id, req.author_name.as_deref());
    match engagement::add_comment(&state.db, media_id, &visitor, &req.content).await? {
        CommentOutcome::Posted { id } => {
            info!("Comment {} posted on media {}", id, media_id);
            Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
        }
        CommentOutcome::Empty => Err(Error::BadRequest("Comment content is empty".to_string())),
        CommentOutcome::RateLimited => Ok((
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "status": "rate_limited" })),
        )),
    }
}

/// POST /api/media/:media_id/like - toggle this visitor's like
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(media_id): Path<Uuid>,
    Json(req): Json<LikeRequest>,
) -> Result<Json<LikeResponse>> {
    match engagement::toggle_like(&state.db, media_id, req.visitor_id).await? {
        ToggleOutcome::Toggled { liked, likes_count } => {
            Ok(Json(LikeResponse { liked, likes_count }))
        }
        ToggleOutcome::NotFound => Err(Error::NotFound(format!("Media not found: {}", media_id))),
    }
}

/// GET /api/media/:media_id/liked?visitor_id= - current liked state
pub async fn has_liked(
    State(state): State<AppState>,
    Path(media_id): Path<Uuid>,
    Query(query): Query<LikedQuery>,
) -> Result<Json<serde_json::Value>> {
    let liked = engagement::has_liked(&state.db, media_id, query.visitor_id).await?;
    Ok(Json(json!({ "liked": liked })))
}
