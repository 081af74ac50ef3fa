//! Kahoot Store
//!
//! Pooled Postgres data-access layer for a quiz-authoring platform.
//! This library provides typed repositories for users, kahoots, quiz content,
//! ownership, favorites and groups, the join views across them, and a closed
//! error taxonomy that boundary layers map to responses.

pub mod config;
pub mod database;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ErrorKind, KahootStoreError, Result, StoreError, StoreResult};

// Re-export main components for easy access
pub use database::{ConnectionPool, DatabaseService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
