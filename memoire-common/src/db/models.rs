//! Database models and validated builders
//!
//! Records mirror the document-store collections (`media`, `comments`,
//! `playlist`, `guestbook`) plus the `likes` table whose row existence is
//! the liked state. Inserts go through the `New*` builders so every field
//! is trimmed and length-capped before it reaches the database.

use crate::identity::VisitorIdentity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum comment length after trimming
pub const MAX_COMMENT_LEN: usize = 500;
/// Minimum interval between two comments from the same visitor on one media
pub const MIN_COMMENT_INTERVAL_MS: i64 = 60_000;
/// Maximum guestbook entry length after trimming
pub const MAX_GUESTBOOK_LEN: usize = 1000;
/// Maximum author display name length
pub const MAX_AUTHOR_NAME_LEN: usize = 50;
/// Maximum media caption length
pub const MAX_CAPTION_LEN: usize = 300;
/// Maximum playlist item title length
pub const MAX_TITLE_LEN: usize = 100;

/// Truncate a string to at most `max` characters (not bytes)
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Moment tag classifying when in the event a media item belongs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Moment {
    Banner,
    Companions,
    Preparation,
    Ceremony,
    Reception,
}

impl Moment {
    /// Database/query-parameter string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Moment::Banner => "banner",
            Moment::Companions => "companions",
            Moment::Preparation => "preparation",
            Moment::Ceremony => "ceremony",
            Moment::Reception => "reception",
        }
    }

    /// Parse from the database/query string form
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "banner" => Some(Moment::Banner),
            "companions" => Some(Moment::Companions),
            "preparation" => Some(Moment::Preparation),
            "ceremony" => Some(Moment::Ceremony),
            "reception" => Some(Moment::Reception),
            _ => None,
        }
    }
}

/// Media record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "image" => Some(MediaKind::Image),
            "video" => Some(MediaKind::Video),
            _ => None,
        }
    }
}

/// One approved-or-pending photo/video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub id: Uuid,
    pub couple_id: String,
    pub kind: MediaKind,
    /// Opaque media CDN asset reference (e.g. `mariage/photo1`)
    pub asset_ref: String,
    pub moment: Moment,
    pub created_at: DateTime<Utc>,
    pub likes_count: i64,
    pub uploaded_by: Option<String>,
    pub is_approved: bool,
    pub caption: Option<String>,
}

/// Moderated-or-auto-approved text attached to a media item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub media_id: Uuid,
    pub visitor_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub is_approved: bool,
}

/// One externally-hosted video reference in the curated playlist
///
/// `position` is the dense, zero-based play order (unique per deployment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: Uuid,
    pub title: String,
    pub video_id: String,
    pub moment: Moment,
    pub position: i64,
}

/// Free-standing guestbook message not tied to a media item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestbookEntry {
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub is_approved: bool,
}

/// Validated insert payload for a media record
#[derive(Debug, Clone)]
pub struct NewMedia {
    pub couple_id: String,
    pub kind: MediaKind,
    pub asset_ref: String,
    pub moment: Moment,
    pub likes_count: i64,
    pub uploaded_by: Option<String>,
    pub is_approved: bool,
    pub caption: Option<String>,
}

impl NewMedia {
    /// Build a dashboard direct-add record: approved immediately,
    /// zero likes, caption trimmed and capped at 300 characters.
    pub fn direct_add(
        couple_id: &str,
        kind: MediaKind,
        asset_ref: &str,
        moment: Moment,
        caption: Option<&str>,
    ) -> Self {
        let caption = caption
            .map(|c| truncate_chars(c.trim(), MAX_CAPTION_LEN))
            .filter(|c| !c.is_empty());
        Self {
            couple_id: couple_id.to_string(),
            kind,
            asset_ref: asset_ref.to_string(),
            moment,
            likes_count: 0,
            uploaded_by: Some("dashboard".to_string()),
            is_approved: true,
            caption,
        }
    }

    /// Build a visitor-upload record: enters the moderation queue unapproved.
    pub fn visitor_upload(
        couple_id: &str,
        kind: MediaKind,
        asset_ref: &str,
        moment: Moment,
        uploaded_by: Option<&str>,
    ) -> Self {
        let uploaded_by = uploaded_by
            .map(|n| truncate_chars(n.trim(), MAX_AUTHOR_NAME_LEN))
            .filter(|n| !n.is_empty());
        Self {
            couple_id: couple_id.to_string(),
            kind,
            asset_ref: asset_ref.to_string(),
            moment,
            likes_count: 0,
            uploaded_by,
            is_approved: false,
            caption: None,
        }
    }
}

/// Validated insert payload for a comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub media_id: Uuid,
    pub visitor_id: Uuid,
    pub author_name: String,
    pub content: String,
}

impl NewComment {
    /// Trim and cap the content; returns None when the trimmed content is
    /// empty (whitespace-only input is never inserted).
    pub fn new(media_id: Uuid, visitor: &VisitorIdentity, content: &str) -> Option<Self> {
        let trimmed = truncate_chars(content.trim(), MAX_COMMENT_LEN);
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            media_id,
            visitor_id: visitor.visitor_id,
            author_name: visitor.author_name(),
            content: trimmed,
        })
    }
}

/// Validated insert payload for a guestbook entry
#[derive(Debug, Clone)]
pub struct NewGuestbookEntry {
    pub visitor_id: Uuid,
    pub author_name: String,
    pub content: String,
}

impl NewGuestbookEntry {
    pub fn new(visitor: &VisitorIdentity, content: &str) -> Option<Self> {
        let trimmed = truncate_chars(content.trim(), MAX_GUESTBOOK_LEN);
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            visitor_id: visitor.visitor_id,
            author_name: visitor.author_name(),
            content: trimmed,
        })
    }
}

/// Validated insert payload for a playlist item
#[derive(Debug, Clone)]
pub struct NewPlaylistItem {
    pub title: String,
    pub video_id: String,
    pub moment: Moment,
}

impl NewPlaylistItem {
    /// Trim and cap the title at 100 characters. An empty title falls back
    /// to a placeholder containing the video reference.
    pub fn new(title: &str, video_id: &str, moment: Moment) -> Self {
        let mut title = truncate_chars(title.trim(), MAX_TITLE_LEN);
        if title.is_empty() {
            title = format!("Video {}", video_id);
        }
        Self {
            title,
            video_id: video_id.to_string(),
            moment,
        }
    }
}
