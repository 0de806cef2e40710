//! Engagement engine: like toggling and comment submission
//!
//! The like counter is denormalized on the media row for O(1) display; the
//! per-visitor like row is the source of truth for "did I like this". The
//! toggle updates both inside one transaction so they never diverge.

use crate::db::{now_ts, parse_ts, parse_uuid};
use crate::error::Result;
use chrono::{DateTime, Utc};
use memoire_common::db::models::{Comment, NewComment, MIN_COMMENT_INTERVAL_MS};
use memoire_common::VisitorIdentity;
use sqlx::{Row, SqlitePool};
use tracing::warn;
use uuid::Uuid;

/// Result of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The media record does not exist; nothing was written
    NotFound,
    /// Toggle applied; `liked` is the new state for this visitor
    Toggled { liked: bool, likes_count: i64 },
}

/// Result of a comment submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentOutcome {
    /// Content trimmed to nothing; never inserted
    Empty,
    /// This visitor commented on this media less than a minute ago
    RateLimited,
    /// Inserted
    Posted { id: Uuid },
}

/// Toggle the (media, visitor) like edge and adjust the denormalized
/// counter, all-or-nothing.
pub async fn toggle_like(
    pool: &SqlitePool,
    media_id: Uuid,
    visitor_id: Uuid,
) -> Result<ToggleOutcome> {
    let mut tx = pool.begin().await?;

    // No orphan likes: the media row must exist
    let likes_count: Option<i64> = sqlx::query_scalar("SELECT likes_count FROM media WHERE id = ?")
        .bind(media_id.to_string())
        .fetch_optional(&mut *tx)
        .await?;
    let Some(likes_count) = likes_count else {
        return Ok(ToggleOutcome::NotFound);
    };

    let existing: Option<(String,)> = sqlx::query_as(
        "SELECT visitor_id FROM likes WHERE media_id = ? AND visitor_id = ?",
    )
    .bind(media_id.to_string())
    .bind(visitor_id.to_string())
    .fetch_optional(&mut *tx)
    .await?;

    let liked = existing.is_none();
    if liked {
        sqlx::query("INSERT INTO likes (media_id, visitor_id, created_at) VALUES (?, ?, ?)")
            .bind(media_id.to_string())
            .bind(visitor_id.to_string())
            .bind(now_ts())
            .execute(&mut *tx)
            .await?;
    } else {
        sqlx::query("DELETE FROM likes WHERE media_id = ? AND visitor_id = ?")
            .bind(media_id.to_string())
            .bind(visitor_id.to_string())
            .execute(&mut *tx)
            .await?;
    }

    // Counter never goes negative even if it drifted low
    let new_count = if liked { likes_count + 1 } else { (likes_count - 1).max(0) };
    sqlx::query("UPDATE media SET likes_count = ? WHERE id = ?")
        .bind(new_count)
        .bind(media_id.to_string())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(ToggleOutcome::Toggled {
        liked,
        likes_count: new_count,
    })
}

/// Whether this visitor currently likes this media
pub async fn has_liked(pool: &SqlitePool, media_id: Uuid, visitor_id: Uuid) -> Result<bool> {
    let row: Option<(String,)> = sqlx::query_as(
        "SELECT visitor_id FROM likes WHERE media_id = ? AND visitor_id = ?",
    )
    .bind(media_id.to_string())
    .bind(visitor_id.to_string())
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}

/// Submit a comment, auto-published, rate-limited to one per visitor per
/// media per rolling minute.
pub async fn add_comment(
    pool: &SqlitePool,
    media_id: Uuid,
    visitor: &VisitorIdentity,
    content: &str,
) -> Result<CommentOutcome> {
    let Some(comment) = NewComment::new(media_id, visitor, content) else {
        return Ok(CommentOutcome::Empty);
    };

    // Rate-limit check: most recent comment by this visitor on this media.
    // A failing lookup (query error or a corrupt stored timestamp) never
    // blocks the insert.
    match last_comment_time(pool, media_id, visitor.visitor_id).await {
        Ok(Some(last)) => {
            let age_ms = (Utc::now() - last).num_milliseconds();
            if age_ms < MIN_COMMENT_INTERVAL_MS {
                return Ok(CommentOutcome::RateLimited);
            }
        }
        Ok(None) => {}
        Err(e) => {
            warn!("Rate-limit lookup failed, allowing comment: {}", e);
        }
    }

    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO comments (id, media_id, visitor_id, author_name, content, created_at, is_approved)
        VALUES (?, ?, ?, ?, ?, ?, 1)
        "#,
    )
    .bind(id.to_string())
    .bind(comment.media_id.to_string())
    .bind(comment.visitor_id.to_string())
    .bind(&comment.author_name)
    .bind(&comment.content)
    .bind(now_ts())
    .execute(pool)
    .await?;

    Ok(CommentOutcome::Posted { id })
}

/// Timestamp of this visitor's most recent comment on this media
async fn last_comment_time(
    pool: &SqlitePool,
    media_id: Uuid,
    visitor_id: Uuid,
) -> Result<Option<DateTime<Utc>>> {
    let row: Option<(String,)> = sqlx::query_as(
        "SELECT created_at FROM comments
         WHERE media_id = ? AND visitor_id = ?
         ORDER BY created_at DESC LIMIT 1",
    )
    .bind(media_id.to_string())
    .bind(visitor_id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(|(created_at,)| parse_ts(&created_at)).transpose()
}

/// Approved comments for a media item, newest first
pub async fn list_comments(pool: &SqlitePool, media_id: Uuid) -> Result<Vec<Comment>> {
    let rows = sqlx::query(
        "SELECT id, media_id, visitor_id, author_name, content, created_at, is_approved
         FROM comments
         WHERE media_id = ? AND is_approved = 1
         ORDER BY created_at DESC",
    )
    .bind(media_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(Comment {
                id: parse_uuid(&row.get::<String, _>("id"))?,
                media_id: parse_uuid(&row.get::<String, _>("media_id"))?,
                visitor_id: parse_uuid(&row.get::<String, _>("visitor_id"))?,
                author_name: row.get("author_name"),
                content: row.get("content"),
                created_at: parse_ts(&row.get::<String, _>("created_at"))?,
                is_approved: row.get::<i64, _>("is_approved") != 0,
            })
        })
        .collect()
}

/// Number of like rows for a media item (test/diagnostic support for the
/// counter invariant)
pub async fn count_likes(pool: &SqlitePool, media_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE media_id = ?")
        .bind(media_id.to_string())
        .fetch_one(pool)
        .await?;
    Ok(count)
}
