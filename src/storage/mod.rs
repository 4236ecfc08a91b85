//! Storage abstractions.
//!
//! Two independent concerns live here:
//! - [`TextFs`]: plain-text file access used by the boycotter lists and the
//!   generated page. Injected so tests can swap the disk for memory.
//! - [`RsvpStore`]: the document store owning RSVP records.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/                     # publisher storage dir
//! ├── config.toml
//! ├── artist_boycotters.txt
//! ├── label_boycotters.txt
//! └── music.html
//!
//! ```
//!
//! RSVP records live in Redis, see [`RedisStore`].

pub mod local;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod redis;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewRsvp, Rsvp};

// Re-export for convenience
pub use local::LocalFs;
#[cfg(any(test, feature = "test-util"))]
pub use memory::{MemoryFs, MemoryStore};
pub use self::redis::RedisStore;

/// Minimal text file access.
#[async_trait]
pub trait TextFs: Send + Sync {
    /// Read a whole file, returning `None` if it does not exist.
    async fn read_to_string(&self, path: &Path) -> Result<Option<String>>;

    /// Replace the file contents. Not atomic.
    async fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Document store for RSVP records.
#[async_trait]
pub trait RsvpStore: Send + Sync {
    /// All records in store order.
    async fn list(&self) -> Result<Vec<Rsvp>>;

    /// Persist a validated record and return it with its identifier.
    async fn insert(&self, new: NewRsvp) -> Result<Rsvp>;

    /// Remove the record with `id`.
    ///
    /// Returns whether a record was removed. An id that cannot be parsed is
    /// a store error, an unknown id is not.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// Parse a raw identifier the way the store expects it.
pub(crate) fn parse_id(id: &str) -> Result<uuid::Uuid> {
    uuid::Uuid::parse_str(id).map_err(|e| {
        crate::error::AppError::store(format!(
            "Cast to identifier failed for value \"{id}\": {e}"
        ))
    })
}
