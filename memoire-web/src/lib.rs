//! memoire-web library - guest-facing wedding memory site service
//!
//! Public gallery/engagement API plus the couple-only moderation dashboard
//! API, backed by SQLite. The router is built here so integration tests
//! can drive it without binding a socket.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use memoire_common::config::SiteConfig;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod db;
pub mod error;
pub mod services;

use services::title_lookup::TitleClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Site settings (couple id, session gate, CDN cloud name)
    pub site: Arc<SiteConfig>,
    /// External video title lookup client
    pub titles: Arc<TitleClient>,
}

impl AppState {
    pub fn new(db: SqlitePool, site: SiteConfig, titles: TitleClient) -> Self {
        Self {
            db,
            site: Arc::new(site),
            titles: Arc::new(titles),
        }
    }
}

/// Build the application router
///
/// Every route passes the session gate middleware; the gate itself decides
/// what is protected (dashboard always, the rest only on private sites).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint (no auth)
        .route("/health", get(api::health::health))
        // Visitor identity + session
        .route("/api/visitor", post(api::visitor::mint_visitor))
        .route(
            "/api/session",
            post(api::session::login).delete(api::session::logout),
        )
        // Public gallery + engagement
        .route("/api/media", get(api::media::list_media))
        .route(
            "/api/media/:media_id/comments",
            get(api::media::list_comments).post(api::media::post_comment),
        )
        .route("/api/media/:media_id/like", post(api::media::toggle_like))
        .route("/api/media/:media_id/liked", get(api::media::has_liked))
        .route(
            "/api/guestbook",
            get(api::guestbook::list_entries).post(api::guestbook::post_entry),
        )
        .route("/api/playlist", get(api::playlist::list))
        .route("/api/video-title", get(api::video_title::get_title))
        // Couple-only dashboard
        .route(
            "/api/dashboard/media",
            get(api::dashboard::list_all).post(api::dashboard::add_media),
        )
        .route("/api/dashboard/media/pending", get(api::dashboard::list_pending))
        .route(
            "/api/dashboard/media/:media_id/approval",
            post(api::dashboard::set_approval),
        )
        .route(
            "/api/dashboard/media/:media_id",
            delete(api::dashboard::delete_media),
        )
        .route("/api/dashboard/playlist", post(api::playlist::add_item))
        .route(
            "/api/dashboard/playlist/refresh-titles",
            post(api::playlist::refresh_titles),
        )
        .route(
            "/api/dashboard/playlist/:item_id/move",
            post(api::playlist::move_item),
        )
        .route(
            "/api/dashboard/playlist/:item_id",
            delete(api::playlist::remove_item),
        )
        // Session gate ahead of every route
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::session::session_gate,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
