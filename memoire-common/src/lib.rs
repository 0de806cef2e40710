//! # Memoire Common Library
//!
//! Shared code for the memoire wedding-memory site:
//! - Database models, builders and schema initialization
//! - Configuration loading and root folder resolution
//! - Visitor identity
//! - Media asset URL construction
//! - Media-host and video link extraction

pub mod config;
pub mod db;
pub mod error;
pub mod identity;
pub mod media_link;
pub mod media_url;
pub mod video_link;

pub use db::models::{MediaKind, Moment};
pub use error::{Error, Result};
pub use identity::VisitorIdentity;
