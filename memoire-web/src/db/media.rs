//! Media store gateway
//!
//! Typed read/write access to media records, scoped to one couple
//! identifier. Also carries the moderation mutations (approval flips and
//! hard deletes); likes and comments cascade away with their parent row.

use crate::db::{now_ts, parse_ts, parse_uuid};
use crate::error::Result;
use memoire_common::db::models::{Media, MediaKind, Moment, NewMedia};
use sqlx::{Row, SqlitePool};
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

fn row_to_media(row: &SqliteRow) -> Result<Media> {
    let kind_str: String = row.get("kind");
    let moment_str: String = row.get("moment");
    Ok(Media {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        couple_id: row.get("couple_id"),
        kind: MediaKind::from_str(&kind_str).unwrap_or(MediaKind::Image),
        asset_ref: row.get("asset_ref"),
        moment: Moment::from_str(&moment_str).unwrap_or(Moment::Reception),
        created_at: parse_ts(&row.get::<String, _>("created_at"))?,
        likes_count: row.get("likes_count"),
        uploaded_by: row.get("uploaded_by"),
        is_approved: row.get::<i64, _>("is_approved") != 0,
        caption: row.get("caption"),
    })
}

const MEDIA_COLUMNS: &str =
    "id, couple_id, kind, asset_ref, moment, created_at, likes_count, uploaded_by, is_approved, caption";

/// All approved media for the couple, newest first, optionally filtered by
/// moment tag. An empty gallery is an empty list, never an error.
pub async fn list_approved(
    pool: &SqlitePool,
    couple_id: &str,
    moment: Option<Moment>,
) -> Result<Vec<Media>> {
    let rows = match moment {
        Some(moment) => {
            sqlx::query(&format!(
                "SELECT {} FROM media
                 WHERE couple_id = ? AND moment = ? AND is_approved = 1
                 ORDER BY created_at DESC",
                MEDIA_COLUMNS
            ))
            .bind(couple_id)
            .bind(moment.as_str())
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(&format!(
                "SELECT {} FROM media
                 WHERE couple_id = ? AND is_approved = 1
                 ORDER BY created_at DESC",
                MEDIA_COLUMNS
            ))
            .bind(couple_id)
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter().map(row_to_media).collect()
}

/// Media awaiting moderation, newest first (dashboard use)
pub async fn list_pending(pool: &SqlitePool, couple_id: &str) -> Result<Vec<Media>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM media
         WHERE couple_id = ? AND is_approved = 0
         ORDER BY created_at DESC",
        MEDIA_COLUMNS
    ))
    .bind(couple_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_media).collect()
}

/// Approved and pending media together, newest first (dashboard use)
pub async fn list_all(pool: &SqlitePool, couple_id: &str) -> Result<Vec<Media>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM media WHERE couple_id = ? ORDER BY created_at DESC",
        MEDIA_COLUMNS
    ))
    .bind(couple_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_media).collect()
}

/// Fetch one media record
pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Option<Media>> {
    let row = sqlx::query(&format!("SELECT {} FROM media WHERE id = ?", MEDIA_COLUMNS))
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(row_to_media).transpose()
}

/// Insert a validated media record with a server-assigned timestamp;
/// returns the new identifier
pub async fn create(pool: &SqlitePool, media: &NewMedia) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO media (id, couple_id, kind, asset_ref, moment, created_at,
                           likes_count, uploaded_by, is_approved, caption)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(&media.couple_id)
    .bind(media.kind.as_str())
    .bind(&media.asset_ref)
    .bind(media.moment.as_str())
    .bind(now_ts())
    .bind(media.likes_count)
    .bind(&media.uploaded_by)
    .bind(media.is_approved as i64)
    .bind(&media.caption)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Flip the approval flag. Idempotent; returns false when no such row.
pub async fn set_approval(pool: &SqlitePool, id: Uuid, approved: bool) -> Result<bool> {
    let result = sqlx::query("UPDATE media SET is_approved = ? WHERE id = ?")
        .bind(approved as i64)
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Hard delete (moderation reject). Idempotent: deleting a missing id is
/// not an error. Likes and comments go with the row via FK cascade.
pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM media WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(())
}
