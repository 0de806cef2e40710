//! Engagement engine tests: like toggling, comment rate limiting,
//! guestbook submission, counter invariants

use memoire_common::db::create_schema;
use memoire_common::db::models::{MediaKind, Moment, NewMedia};
use memoire_common::VisitorIdentity;
use memoire_web::db::engagement::{self, CommentOutcome, ToggleOutcome};
use memoire_web::db::{guestbook, media};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

const COUPLE: &str = "default";

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should open in-memory database");
    create_schema(&pool).await.expect("Should create schema");
    pool
}

async fn seed_media(pool: &SqlitePool) -> Uuid {
    let new_media = NewMedia::direct_add(COUPLE, MediaKind::Image, "mariage/photo1", Moment::Ceremony, None);
    media::create(pool, &new_media).await.expect("Should insert media")
}

#[tokio::test]
async fn test_toggle_like_twice_restores_original_state() {
    let pool = test_pool().await;
    let media_id = seed_media(&pool).await;
    let visitor = Uuid::new_v4();

    let first = engagement::toggle_like(&pool, media_id, visitor).await.unwrap();
    assert_eq!(first, ToggleOutcome::Toggled { liked: true, likes_count: 1 });

    let second = engagement::toggle_like(&pool, media_id, visitor).await.unwrap();
    assert_eq!(second, ToggleOutcome::Toggled { liked: false, likes_count: 0 });

    // Counter equals the number of like rows, and never went negative
    let m = media::get(&pool, media_id).await.unwrap().unwrap();
    assert_eq!(m.likes_count, 0);
    assert_eq!(engagement::count_likes(&pool, media_id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_counter_tracks_like_rows_across_visitors() {
    let pool = test_pool().await;
    let media_id = seed_media(&pool).await;

    for _ in 0..3 {
        let visitor = Uuid::new_v4();
        engagement::toggle_like(&pool, media_id, visitor).await.unwrap();
    }

    let m = media::get(&pool, media_id).await.unwrap().unwrap();
    assert_eq!(m.likes_count, 3);
    assert_eq!(engagement::count_likes(&pool, media_id).await.unwrap(), 3);
    assert!(m.likes_count >= 0);
}

#[tokio::test]
async fn test_toggle_on_missing_media_is_not_found_and_writes_nothing() {
    let pool = test_pool().await;
    let visitor = Uuid::new_v4();

    let outcome = engagement::toggle_like(&pool, Uuid::new_v4(), visitor).await.unwrap();
    assert_eq!(outcome, ToggleOutcome::NotFound);

    // No orphan likes
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_has_liked_survives_reload() {
    let pool = test_pool().await;
    let media_id = seed_media(&pool).await;
    let visitor = Uuid::new_v4();

    engagement::toggle_like(&pool, media_id, visitor).await.unwrap();

    // Fresh reads, as a page reload would issue
    assert!(engagement::has_liked(&pool, media_id, visitor).await.unwrap());
    let m = media::get(&pool, media_id).await.unwrap().unwrap();
    assert_eq!(m.likes_count, 1);

    // A different visitor has not liked it
    assert!(!engagement::has_liked(&pool, media_id, Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn test_whitespace_comment_never_inserted() {
    let pool = test_pool().await;
    let media_id = seed_media(&pool).await;
    let visitor = VisitorIdentity::mint();

    let outcome = engagement::add_comment(&pool, media_id, &visitor, "  \n\t   ").await.unwrap();
    assert_eq!(outcome, CommentOutcome::Empty);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_second_comment_within_window_is_rate_limited() {
    let pool = test_pool().await;
    let media_id = seed_media(&pool).await;
    let mut visitor = VisitorIdentity::mint();
    visitor.set_display_name("Alice");

    let first = engagement::add_comment(&pool, media_id, &visitor, "Magnifique !").await.unwrap();
    assert!(matches!(first, CommentOutcome::Posted { .. }));

    let second = engagement::add_comment(&pool, media_id, &visitor, "Encore un mot").await.unwrap();
    assert_eq!(second, CommentOutcome::RateLimited);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "Rate-limited attempt must not create a record");
}

#[tokio::test]
async fn test_comment_allowed_after_window_elapses() {
    let pool = test_pool().await;
    let media_id = seed_media(&pool).await;
    let visitor = VisitorIdentity::mint();

    engagement::add_comment(&pool, media_id, &visitor, "Premier").await.unwrap();

    // Backdate the first comment past the 60-second window
    let backdated = (chrono::Utc::now() - chrono::Duration::seconds(61))
        .to_rfc3339_opts(chrono::SecondsFormat::Micros, true);
    sqlx::query("UPDATE comments SET created_at = ?")
        .bind(&backdated)
        .execute(&pool)
        .await
        .unwrap();

    let outcome = engagement::add_comment(&pool, media_id, &visitor, "Deuxieme").await.unwrap();
    assert!(matches!(outcome, CommentOutcome::Posted { .. }));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_failed_rate_limit_lookup_still_allows_comment() {
    let pool = test_pool().await;
    let media_id = seed_media(&pool).await;
    let visitor = VisitorIdentity::mint();

    engagement::add_comment(&pool, media_id, &visitor, "Premier").await.unwrap();

    // Corrupt the stored timestamp: the rate-limit lookup cannot read it,
    // and the submission goes through rather than being blocked
    sqlx::query("UPDATE comments SET created_at = 'not-a-timestamp'")
        .execute(&pool)
        .await
        .unwrap();

    let outcome = engagement::add_comment(&pool, media_id, &visitor, "Deuxieme").await.unwrap();
    assert!(matches!(outcome, CommentOutcome::Posted { .. }));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_rate_limit_is_scoped_per_media() {
    let pool = test_pool().await;
    let media_a = seed_media(&pool).await;
    let media_b = seed_media(&pool).await;
    let visitor = VisitorIdentity::mint();

    let on_a = engagement::add_comment(&pool, media_a, &visitor, "Sur A").await.unwrap();
    assert!(matches!(on_a, CommentOutcome::Posted { .. }));

    // Same visitor, different media: no rate limit
    let on_b = engagement::add_comment(&pool, media_b, &visitor, "Sur B").await.unwrap();
    assert!(matches!(on_b, CommentOutcome::Posted { .. }));
}

#[tokio::test]
async fn test_comments_list_newest_first_and_approved_only() {
    let pool = test_pool().await;
    let media_id = seed_media(&pool).await;

    for i in 0..3 {
        let visitor = VisitorIdentity::mint();
        engagement::add_comment(&pool, media_id, &visitor, &format!("Commentaire {}", i))
            .await
            .unwrap();
    }
    // Spread timestamps so ordering is deterministic
    let rows: Vec<(String,)> = sqlx::query_as("SELECT id FROM comments ORDER BY content ASC")
        .fetch_all(&pool)
        .await
        .unwrap();
    for (i, (id,)) in rows.iter().enumerate() {
        let ts = (chrono::Utc::now() + chrono::Duration::seconds(i as i64))
            .to_rfc3339_opts(chrono::SecondsFormat::Micros, true);
        sqlx::query("UPDATE comments SET created_at = ? WHERE id = ?")
            .bind(&ts)
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();
    }
    // Hide one comment
    sqlx::query("UPDATE comments SET is_approved = 0 WHERE content = 'Commentaire 0'")
        .execute(&pool)
        .await
        .unwrap();

    let comments = engagement::list_comments(&pool, media_id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "Commentaire 2");
    assert_eq!(comments[1].content, "Commentaire 1");
}

#[tokio::test]
async fn test_rejecting_media_removes_its_engagement() {
    let pool = test_pool().await;
    let media_id = seed_media(&pool).await;
    let visitor = VisitorIdentity::mint();

    engagement::toggle_like(&pool, media_id, visitor.visitor_id).await.unwrap();
    engagement::add_comment(&pool, media_id, &visitor, "Bravo").await.unwrap();

    media::delete(&pool, media_id).await.unwrap();

    let likes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes").fetch_one(&pool).await.unwrap();
    let comments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments").fetch_one(&pool).await.unwrap();
    assert_eq!(likes, 0, "Likes should cascade with their media");
    assert_eq!(comments, 0, "Comments should cascade with their media");

    // Deleting again is not an error
    media::delete(&pool, media_id).await.unwrap();
}

#[tokio::test]
async fn test_guestbook_roundtrip_and_empty_rejection() {
    let pool = test_pool().await;
    let mut visitor = VisitorIdentity::mint();
    visitor.set_display_name("Mamie Jeanne");

    let id = guestbook::add_entry(&pool, &visitor, "  Tous nos voeux de bonheur  ")
        .await
        .unwrap();
    assert!(id.is_some());

    assert!(guestbook::add_entry(&pool, &visitor, "   ").await.unwrap().is_none());

    let entries = guestbook::list_entries(&pool).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].author_name, "Mamie Jeanne");
    assert_eq!(entries[0].content, "Tous nos voeux de bonheur");
}
