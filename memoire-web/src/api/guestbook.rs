//! Guestbook endpoints

use crate::db::guestbook;
use crate::error::{Error, Result};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use memoire_common::db::models::GuestbookEntry;
use memoire_common::VisitorIdentity;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct GuestbookRequest {
    visitor_id: Uuid,
    #[serde(default)]
    author_name: Option<String>,
    content: String,
}

/// GET /api/guestbook - approved entries, newest first
pub async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<GuestbookEntry>>> {
    let entries = guestbook::list_entries(&state.db).await?;
    Ok(Json(entries))
}

/// POST /api/guestbook - submit an entry (no rate limit)
pub async fn post_entry(
    State(state): State<AppState>,
    Json(req): Json<GuestbookRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let visitor = VisitorIdentity::from_parts(req.visitor_id, req.author_name.as_deref());
    match guestbook::add_entry(&state.db, &visitor, &req.content).await? {
        Some(id) => Ok((StatusCode::CREATED, Json(json!({ "id": id })))),
        None => Err(Error::BadRequest("Guestbook content is empty".to_string())),
    }
}
