//! memoire-web - guest-facing wedding memory site
//!
//! Public gallery, likes, comments, guestbook and playlist over SQLite,
//! with a password-gated dashboard API for the couple to moderate content.

use anyhow::Result;
use clap::Parser;
use memoire_common::config::{self, SiteConfig};
use memoire_common::db::init_database;
use memoire_web::services::title_lookup::TitleClient;
use memoire_web::{build_router, AppState};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "memoire-web", about = "Wedding memory site service")]
struct Args {
    /// Root folder holding the database and site.toml
    #[arg(long)]
    root_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting memoire-web v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), "MEMOIRE_ROOT");
    config::ensure_root_folder(&root_folder)?;
    info!("Root folder: {}", root_folder.display());

    let site = SiteConfig::load(&root_folder)?;
    info!(
        "Site: couple_id={} private={} gate={}",
        site.couple_id,
        site.private_site,
        if site.password.is_empty() { "disabled (no password set)" } else { "enabled" }
    );

    let db_path = config::database_path(&root_folder);
    let pool = init_database(&db_path).await?;
    info!("Database ready: {}", db_path.display());

    let bind = format!("{}:{}", site.bind_addr, site.port);
    let state = AppState::new(pool, site, TitleClient::new());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("memoire-web listening on http://{}", bind);

    axum::serve(listener, app).await?;

    Ok(())
}
