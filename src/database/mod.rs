// Modules
pub mod backend;
pub mod error;
pub mod records;
pub mod seed;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

// Re-export the storage seam
pub use backend::{KeyValueStore, SqliteStore};
pub use error::StorageError;

// Re-export collections and session
pub use records::{keys, RecordStore};
pub use users::{demo_user, Session};
