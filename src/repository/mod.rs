//! Repository layer for SQLite persistence.
//!
//! Each repository holds the database path and opens a short-lived
//! connection per call; SQLite's own locking covers concurrent access.
//! Multi-statement mutations run inside a transaction so a failed
//! validation or insert never leaves partial state behind.

mod activity;
mod building;
mod organization;
pub mod schema;

pub use activity::ActivityRepository;
pub use building::BuildingRepository;
pub use organization::OrganizationRepository;

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

/// Storage-level failure: the database itself, or a corrupt stored value.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("corrupt stored value: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Repository result type.
pub type Result<T> = std::result::Result<T, RepoError>;

/// Open a connection with the pragmas every repository relies on.
pub(crate) fn connect(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(conn)
}
