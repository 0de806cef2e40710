//! HTTP API: handlers, session gate, title proxy

pub mod dashboard;
pub mod guestbook;
pub mod health;
pub mod media;
pub mod playlist;
pub mod session;
pub mod video_title;
pub mod visitor;
