//! Visitor identity endpoint
//!
//! The browser stores the minted identity locally and passes it back
//! explicitly on every engagement call.

use axum::Json;
use memoire_common::VisitorIdentity;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MintRequest {
    #[serde(default)]
    display_name: Option<String>,
}

/// POST /api/visitor - mint a fresh visitor identity
pub async fn mint_visitor(Json(req): Json<MintRequest>) -> Json<VisitorIdentity> {
    let mut visitor = VisitorIdentity::mint();
    if let Some(name) = &req.display_name {
        visitor.set_display_name(name);
    }
    Json(visitor)
}
