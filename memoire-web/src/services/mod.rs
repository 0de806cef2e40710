//! External service clients

pub mod title_lookup;
