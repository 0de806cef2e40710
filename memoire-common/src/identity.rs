//! Visitor identity
//!
//! A stable pseudonymous token assigned per browser, used to attribute
//! likes and comments without account login. The identity is minted once
//! (the client stores it locally) and passed explicitly into every
//! engagement call rather than read from ambient state.

use crate::db::models::{truncate_chars, MAX_AUTHOR_NAME_LEN};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback author name when a visitor never set one
pub const ANONYMOUS_NAME: &str = "Invite";

/// Per-browser visitor identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorIdentity {
    pub visitor_id: Uuid,
    /// Normalized display name (trimmed, 50-char cap); None until the
    /// visitor introduces themselves
    pub display_name: Option<String>,
}

impl VisitorIdentity {
    /// Mint a fresh identity for a new browser
    pub fn mint() -> Self {
        Self {
            visitor_id: Uuid::new_v4(),
            display_name: None,
        }
    }

    /// Rebuild an identity from a stored id and optional name
    pub fn from_parts(visitor_id: Uuid, display_name: Option<&str>) -> Self {
        let mut identity = Self {
            visitor_id,
            display_name: None,
        };
        if let Some(name) = display_name {
            identity.set_display_name(name);
        }
        identity
    }

    /// Set the display name, trimming and capping it; a blank name clears
    /// nothing (the previous name is kept)
    pub fn set_display_name(&mut self, name: &str) {
        let trimmed = truncate_chars(name.trim(), MAX_AUTHOR_NAME_LEN);
        if !trimmed.is_empty() {
            self.display_name = Some(trimmed);
        }
    }

    /// Author name used on inserted records
    pub fn author_name(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_is_unique() {
        assert_ne!(VisitorIdentity::mint().visitor_id, VisitorIdentity::mint().visitor_id);
    }

    #[test]
    fn test_display_name_normalization() {
        let mut visitor = VisitorIdentity::mint();
        visitor.set_display_name("  Tante Monique  ");
        assert_eq!(visitor.display_name.as_deref(), Some("Tante Monique"));

        // Blank input keeps the previous name
        visitor.set_display_name("   ");
        assert_eq!(visitor.display_name.as_deref(), Some("Tante Monique"));
    }

    #[test]
    fn test_display_name_cap() {
        let mut visitor = VisitorIdentity::mint();
        visitor.set_display_name(&"n".repeat(80));
        assert_eq!(visitor.display_name.as_ref().unwrap().chars().count(), MAX_AUTHOR_NAME_LEN);
    }

    #[test]
    fn test_author_name_fallback() {
        let visitor = VisitorIdentity::mint();
        assert_eq!(visitor.author_name(), ANONYMOUS_NAME);
    }
}
