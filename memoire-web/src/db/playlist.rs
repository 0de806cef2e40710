//! Playlist ordering
//!
//! Maintains a dense, unique, zero-based `position` over the curated
//! playlist. Every reorder rewrites the position of the entire list from
//! its index, so a partially-applied sequence self-heals on the next
//! mutation; removal re-densifies the survivors the same way.

use crate::db::parse_uuid;
use crate::error::Result;
use crate::services::title_lookup::TitleClient;
use memoire_common::db::models::{Moment, NewPlaylistItem, PlaylistItem};
use serde::Deserialize;
use sqlx::{Row, SqlitePool};
use tracing::{info, warn};
use uuid::Uuid;

/// Direction for an adjacent-swap move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Playlist in play order
pub async fn list(pool: &SqlitePool) -> Result<Vec<PlaylistItem>> {
    let rows = sqlx::query(
        "SELECT id, title, video_id, moment, position FROM playlist ORDER BY position ASC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let moment_str: String = row.get("moment");
            Ok(PlaylistItem {
                id: parse_uuid(&row.get::<String, _>("id"))?,
                title: row.get("title"),
                video_id: row.get("video_id"),
                moment: Moment::from_str(&moment_str).unwrap_or(Moment::Reception),
                position: row.get("position"),
            })
        })
        .collect()
}

/// Append a validated item at the end of the playlist
pub async fn add(pool: &SqlitePool, item: &NewPlaylistItem) -> Result<Uuid> {
    let next_position: i64 =
        sqlx::query_scalar("SELECT COALESCE(MAX(position) + 1, 0) FROM playlist")
            .fetch_one(pool)
            .await?;

    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO playlist (id, title, video_id, moment, position) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(&item.title)
    .bind(&item.video_id)
    .bind(item.moment.as_str())
    .bind(next_position)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Move an item one position up or down by adjacent swap, then rewrite
/// `position = index` for the whole list. Returns false for a boundary
/// no-op or an unknown id.
pub async fn move_item(pool: &SqlitePool, id: Uuid, direction: Direction) -> Result<bool> {
    let mut items = list(pool).await?;

    let Some(idx) = items.iter().position(|p| p.id == id) else {
        return Ok(false);
    };
    let Some(new_idx) = neighbor_index(idx, items.len(), direction) else {
        // Cannot move the first item up or the last item down
        return Ok(false);
    };

    let moved = items.remove(idx);
    items.insert(new_idx, moved);

    write_positions(pool, &items).await?;
    Ok(true)
}

/// Remove an item and re-densify the survivors' positions
pub async fn remove(pool: &SqlitePool, id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM playlist WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    let survivors = list(pool).await?;
    write_positions(pool, &survivors).await?;
    Ok(())
}

/// Re-resolve every item's title from the external lookup, updating only
/// items whose resolved title differs. Runs one lookup at a time to bound
/// load on the title service; per-item failures are skipped. Returns the
/// number of updated rows.
pub async fn refresh_titles(pool: &SqlitePool, client: &TitleClient) -> Result<u32> {
    let items = list(pool).await?;
    let mut updated = 0u32;

    for item in &items {
        match client.fetch_title(&item.video_id).await {
            Ok(title) if title != item.title => {
                sqlx::query("UPDATE playlist SET title = ? WHERE id = ?")
                    .bind(&title)
                    .bind(item.id.to_string())
                    .execute(pool)
                    .await?;
                info!("Playlist title refreshed: {} -> {}", item.title, title);
                updated += 1;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Title lookup failed for {}: {}", item.video_id, e);
            }
        }
    }

    Ok(updated)
}

/// Index of the adjacent neighbor in the given direction, None at either
/// boundary
fn neighbor_index(idx: usize, len: usize, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Up => idx.checked_sub(1),
        Direction::Down => {
            let next = idx + 1;
            (next < len).then_some(next)
        }
    }
}

/// Rewrite `position = index` for the entire list, one UPDATE per row.
/// Best-effort sequence of independent writes; a crash mid-way leaves a
/// partial renumbering that the next full rewrite repairs.
async fn write_positions(pool: &SqlitePool, items: &[PlaylistItem]) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        sqlx::query("UPDATE playlist SET position = ? WHERE id = ?")
            .bind(index as i64)
            .bind(item.id.to_string())
            .execute(pool)
            .await?;
    }
    Ok(())
}
