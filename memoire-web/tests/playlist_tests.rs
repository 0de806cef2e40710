//! Playlist ordering tests: dense positions under move/remove sequences,
//! title refresh against a local oEmbed stub

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use memoire_common::db::create_schema;
use memoire_common::db::models::{Moment, NewPlaylistItem};
use memoire_web::db::playlist::{self, Direction};
use memoire_web::services::title_lookup::TitleClient;
use serde::Deserialize;
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::collections::BTreeSet;
use uuid::Uuid;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should open in-memory database");
    create_schema(&pool).await.expect("Should create schema");
    pool
}

async fn seed_playlist(pool: &SqlitePool, video_ids: &[&str]) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for video_id in video_ids {
        let item = NewPlaylistItem::new(&format!("Clip {}", video_id), video_id, Moment::Reception);
        ids.push(playlist::add(pool, &item).await.expect("Should add item"));
    }
    ids
}

/// Positions must form exactly {0, 1, .., n-1}
async fn assert_dense(pool: &SqlitePool) {
    let items = playlist::list(pool).await.unwrap();
    let positions: BTreeSet<i64> = items.iter().map(|i| i.position).collect();
    let expected: BTreeSet<i64> = (0..items.len() as i64).collect();
    assert_eq!(positions, expected, "Positions must be dense and unique");
}

#[tokio::test]
async fn test_add_appends_at_end() {
    let pool = test_pool().await;
    let ids = seed_playlist(&pool, &["aaaaaaaaaaa", "bbbbbbbbbbb", "ccccccccccc"]).await;

    let items = playlist::list(&pool).await.unwrap();
    assert_eq!(items.len(), 3);
    for (index, item) in items.iter().enumerate() {
        assert_eq!(item.position, index as i64);
        assert_eq!(item.id, ids[index]);
    }
}

#[tokio::test]
async fn test_move_swaps_adjacent_and_stays_dense() {
    let pool = test_pool().await;
    let ids = seed_playlist(&pool, &["aaaaaaaaaaa", "bbbbbbbbbbb", "ccccccccccc"]).await;

    // Move the middle item up: order becomes b, a, c
    assert!(playlist::move_item(&pool, ids[1], Direction::Up).await.unwrap());
    let items = playlist::list(&pool).await.unwrap();
    assert_eq!(
        items.iter().map(|i| i.id).collect::<Vec<_>>(),
        vec![ids[1], ids[0], ids[2]]
    );
    assert_dense(&pool).await;

    // Move it back down
    assert!(playlist::move_item(&pool, ids[1], Direction::Down).await.unwrap());
    let items = playlist::list(&pool).await.unwrap();
    assert_eq!(
        items.iter().map(|i| i.id).collect::<Vec<_>>(),
        vec![ids[0], ids[1], ids[2]]
    );
    assert_dense(&pool).await;
}

#[tokio::test]
async fn test_boundary_moves_are_noops() {
    let pool = test_pool().await;
    let ids = seed_playlist(&pool, &["aaaaaaaaaaa", "bbbbbbbbbbb"]).await;

    assert!(!playlist::move_item(&pool, ids[0], Direction::Up).await.unwrap());
    assert!(!playlist::move_item(&pool, ids[1], Direction::Down).await.unwrap());
    // Unknown id
    assert!(!playlist::move_item(&pool, Uuid::new_v4(), Direction::Up).await.unwrap());

    let items = playlist::list(&pool).await.unwrap();
    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), ids);
    assert_dense(&pool).await;
}

#[tokio::test]
async fn test_positions_dense_after_arbitrary_move_sequence() {
    let pool = test_pool().await;
    let ids = seed_playlist(
        &pool,
        &["aaaaaaaaaaa", "bbbbbbbbbbb", "ccccccccccc", "ddddddddddd", "eeeeeeeeeee"],
    )
    .await;

    let sequence = [
        (ids[4], Direction::Up),
        (ids[4], Direction::Up),
        (ids[0], Direction::Down),
        (ids[2], Direction::Down),
        (ids[0], Direction::Up),
        (ids[3], Direction::Up),
    ];
    for (id, direction) in sequence {
        playlist::move_item(&pool, id, direction).await.unwrap();
        assert_dense(&pool).await;
    }
}

#[tokio::test]
async fn test_remove_redensifies_survivors() {
    let pool = test_pool().await;
    let ids = seed_playlist(&pool, &["aaaaaaaaaaa", "bbbbbbbbbbb", "ccccccccccc", "ddddddddddd"]).await;

    // Remove from the middle; survivors close the gap in order
    playlist::remove(&pool, ids[1]).await.unwrap();
    let items = playlist::list(&pool).await.unwrap();
    assert_eq!(
        items.iter().map(|i| i.id).collect::<Vec<_>>(),
        vec![ids[0], ids[2], ids[3]]
    );
    assert_dense(&pool).await;

    // Removing an unknown id leaves the list untouched
    playlist::remove(&pool, Uuid::new_v4()).await.unwrap();
    assert_eq!(playlist::list(&pool).await.unwrap().len(), 3);
    assert_dense(&pool).await;
}

#[derive(Deserialize)]
struct OembedQuery {
    url: String,
}

/// Minimal oEmbed stub: answers with "Titre <token>" except for the
/// all-z token which it 404s.
async fn spawn_oembed_stub() -> String {
    let app = Router::new().route(
        "/oembed",
        get(|Query(q): Query<OembedQuery>| async move {
            let token = q.url.rsplit("v=").next().unwrap_or_default().to_string();
            if token == "zzzzzzzzzzz" {
                return (StatusCode::NOT_FOUND, Json(json!({"error": "not found"})));
            }
            (StatusCode::OK, Json(json!({"title": format!("Titre {}", token)})))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind stub listener");
    let addr = listener.local_addr().expect("Should read stub address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_refresh_titles_updates_stale_and_skips_failures() {
    let pool = test_pool().await;
    seed_playlist(&pool, &["aaaaaaaaaaa", "bbbbbbbbbbb", "zzzzzzzzzzz"]).await;

    let base = spawn_oembed_stub().await;
    let client = TitleClient::with_base_url(&base);

    // First pass: the two resolvable items pick up their stub titles; the
    // unresolvable one keeps its seed title
    let updated = playlist::refresh_titles(&pool, &client).await.unwrap();
    assert_eq!(updated, 2);

    let items = playlist::list(&pool).await.unwrap();
    assert_eq!(items[0].title, "Titre aaaaaaaaaaa");
    assert_eq!(items[1].title, "Titre bbbbbbbbbbb");
    assert_eq!(items[2].title, "Clip zzzzzzzzzzz");

    // Second pass: nothing changed, nothing rewritten
    let updated = playlist::refresh_titles(&pool, &client).await.unwrap();
    assert_eq!(updated, 0);
}

#[tokio::test]
async fn test_fetch_title_resolves_and_maps_not_found() {
    let base = spawn_oembed_stub().await;
    let client = TitleClient::with_base_url(&base);

    let title = client.fetch_title("dQw4w9WgXcQ").await.unwrap();
    assert_eq!(title, "Titre dQw4w9WgXcQ");

    let err = client.fetch_title("zzzzzzzzzzz").await.unwrap_err();
    assert!(matches!(
        err,
        memoire_web::services::title_lookup::TitleError::NotFound
    ));
}
