//! In-memory storage doubles.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{NewRsvp, Rsvp};
use crate::storage::{RsvpStore, TextFs, parse_id};

/// Text files held in a map keyed by path.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file before the code under test runs.
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.into(), contents.into());
        }
        self
    }

    /// Current contents of a file, if present.
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().ok()?.get(path).cloned()
    }
}

#[async_trait]
impl TextFs for MemoryFs {
    async fn read_to_string(&self, path: &Path) -> Result<Option<String>> {
        let files = self
            .files
            .lock()
            .map_err(|e| AppError::store(format!("memory fs poisoned: {e}")))?;
        Ok(files.get(path).cloned())
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let mut files = self
            .files
            .lock()
            .map_err(|e| AppError::store(format!("memory fs poisoned: {e}")))?;
        files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// RSVP records held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Rsvp>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails, as if the connection were down.
    pub fn unavailable() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            unavailable: true,
        }
    }

    fn records(&self) -> Result<std::sync::MutexGuard<'_, Vec<Rsvp>>> {
        if self.unavailable {
            return Err(AppError::store("connection refused"));
        }
        self.records
            .lock()
            .map_err(|e| AppError::store(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl RsvpStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Rsvp>> {
        Ok(self.records()?.clone())
    }

    async fn insert(&self, new: NewRsvp) -> Result<Rsvp> {
        let rsvp = Rsvp::from_new(new);
        self.records()?.push(rsvp.clone());
        Ok(rsvp)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.records()?;
        let id = parse_id(id)?;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_memory_fs_roundtrip() {
        let fs = MemoryFs::new().with_file("a.txt", "x");
        assert_eq!(
            fs.read_to_string(Path::new("a.txt")).await.unwrap(),
            Some("x".to_string())
        );
        assert_eq!(fs.read_to_string(Path::new("b.txt")).await.unwrap(), None);

        fs.write(Path::new("b.txt"), "y").await.unwrap();
        assert_eq!(fs.contents(Path::new("b.txt")).as_deref(), Some("y"));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let store = MemoryStore::unavailable();
        assert!(store.list().await.is_err());
        let new = NewRsvp {
            name: "A".to_string(),
            phone: "1".to_string(),
            plus_one: true,
            created_at: Utc::now(),
        };
        assert!(store.insert(new).await.is_err());
    }
}
