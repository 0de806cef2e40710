//! Database initialization
//!
//! Creates the SQLite database on first run and applies the schema
//! idempotently. Schema creation is split out of `init_database` so tests
//! can run against an in-memory pool.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // WAL allows concurrent readers with one writer; foreign_keys is
    // per-connection, so it must be set through the connect options to
    // hold on every pool connection
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000))
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent - safe to call multiple times)
///
/// Foreign keys are enabled per connection here so the like/comment
/// cascade on media deletion also holds for in-memory test pools.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    create_media_table(pool).await?;
    create_likes_table(pool).await?;
    create_comments_table(pool).await?;
    create_playlist_table(pool).await?;
    create_guestbook_table(pool).await?;

    Ok(())
}

async fn create_media_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS media (
            id TEXT PRIMARY KEY NOT NULL,
            couple_id TEXT NOT NULL,
            kind TEXT NOT NULL,
            asset_ref TEXT NOT NULL,
            moment TEXT NOT NULL,
            created_at TEXT NOT NULL,
            likes_count INTEGER NOT NULL DEFAULT 0,
            uploaded_by TEXT,
            is_approved INTEGER NOT NULL DEFAULT 0,
            caption TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_media_couple_approved
         ON media (couple_id, is_approved, created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_likes_table(pool: &SqlitePool) -> Result<()> {
    // Row existence is the liked state: at most one row per
    // (media_id, visitor_id) pair, removed with the parent media
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS likes (
            media_id TEXT NOT NULL,
            visitor_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            PRIMARY KEY (media_id, visitor_id),
            FOREIGN KEY (media_id) REFERENCES media(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_comments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id TEXT PRIMARY KEY NOT NULL,
            media_id TEXT NOT NULL,
            visitor_id TEXT NOT NULL,
            author_name TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL,
            is_approved INTEGER NOT NULL DEFAULT 1,
            FOREIGN KEY (media_id) REFERENCES media(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Supports the per-visitor rate-limit lookup
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_comments_media_visitor
         ON comments (media_id, visitor_id, created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_playlist_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS playlist (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            video_id TEXT NOT NULL,
            moment TEXT NOT NULL,
            position INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_guestbook_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS guestbook (
            id TEXT PRIMARY KEY NOT NULL,
            visitor_id TEXT NOT NULL,
            author_name TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL,
            is_approved INTEGER NOT NULL DEFAULT 1
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
