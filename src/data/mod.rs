//! Repositories for database access.
//!
//! Each repository borrows a connection, so the sync path can run the same
//! repositories against a transaction and the query paths against the pooled
//! connection.

pub mod location;
pub mod price;
pub mod price_history;
pub mod station;
pub mod sync_lock;

/// Rows per bulk insert statement, kept under common bind-parameter limits.
pub(crate) const INSERT_CHUNK_SIZE: usize = 200;
