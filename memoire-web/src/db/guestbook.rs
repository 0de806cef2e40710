//! Guestbook queries
//!
//! Same shape as comments but free-standing (no media scope) and not
//! rate-limited; entries auto-publish.

use crate::db::{now_ts, parse_ts, parse_uuid};
use crate::error::Result;
use memoire_common::db::models::{GuestbookEntry, NewGuestbookEntry};
use memoire_common::VisitorIdentity;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Submit a guestbook entry. Returns None when the trimmed content is
/// empty (nothing inserted).
pub async fn add_entry(
    pool: &SqlitePool,
    visitor: &VisitorIdentity,
    content: &str,
) -> Result<Option<Uuid>> {
    let Some(entry) = NewGuestbookEntry::new(visitor, content) else {
        return Ok(None);
    };

    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO guestbook (id, visitor_id, author_name, content, created_at, is_approved)
        VALUES (?, ?, ?, ?, ?, 1)
        "#,
    )
    .bind(id.to_string())
    .bind(entry.visitor_id.to_string())
    .bind(&entry.author_name)
    .bind(&entry.content)
    .bind(now_ts())
    .execute(pool)
    .await?;

    Ok(Some(id))
}

/// Approved guestbook entries, newest first
pub async fn list_entries(pool: &SqlitePool) -> Result<Vec<GuestbookEntry>> {
    let rows = sqlx::query(
        "SELECT id, visitor_id, author_name, content, created_at, is_approved
         FROM guestbook
         WHERE is_approved = 1
         ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(GuestbookEntry {
                id: parse_uuid(&row.get::<String, _>("id"))?,
                visitor_id: parse_uuid(&row.get::<String, _>("visitor_id"))?,
                author_name: row.get("author_name"),
                content: row.get("content"),
                created_at: parse_ts(&row.get::<String, _>("created_at"))?,
                is_approved: row.get::<i64, _>("is_approved") != 0,
            })
        })
        .collect()
}
