// src/services/boycotters.rs

//! Newline-delimited boycotter lists.
//!
//! Each list is a plain UTF-8 text file, one name per line, kept sorted by
//! UTF-16 code units and free of duplicates. Writes replace the whole file and are not safe against
//! concurrent writers: two overlapping `add` calls can lose one update.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Config, ListKind};
use crate::storage::TextFs;

/// Reads and updates boycotter list files through an injected filesystem.
#[derive(Clone)]
pub struct BoycotterStore {
    fs: Arc<dyn TextFs>,
}

impl BoycotterStore {
    pub fn new(fs: Arc<dyn TextFs>) -> Self {
        Self { fs }
    }

    /// Read the list at `path`, sorted.
    ///
    /// A missing file is logged and read as an empty list.
    pub async fn read(&self, path: &Path) -> Result<Vec<String>> {
        let Some(data) = self.fs.read_to_string(path).await? else {
            log::warn!("File not found: {}", path.display());
            return Ok(Vec::new());
        };

        let mut names: Vec<String> = data
            .split('\n')
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string)
            .collect();
        sort_by_utf16(&mut names);
        Ok(names)
    }

    /// Merge `new_names` into the list at `path` and rewrite it.
    ///
    /// Returns the list as written.
    pub async fn add<S: AsRef<str>>(&self, path: &Path, new_names: &[S]) -> Result<Vec<String>> {
        let existing = self.read(path).await?;

        let mut names: Vec<String> = existing
            .into_iter()
            .chain(
                new_names
                    .iter()
                    .map(|n| n.as_ref())
                    .filter(|n| !n.trim().is_empty())
                    .map(str::to_string),
            )
            .collect();
        sort_by_utf16(&mut names);
        names.dedup();

        self.fs.write(path, &names.join("\n")).await?;
        log::info!("Updated list saved to {}", path.display());
        Ok(names)
    }
}

/// Order names by UTF-16 code units, the order browsers and Node sort strings
/// in. Differs from `str` ordering only above U+FFFF.
fn sort_by_utf16(names: &mut [String]) {
    names.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
}

/// The artist and label lists of one storage directory.
#[derive(Clone)]
pub struct BoycotterLists {
    store: BoycotterStore,
    artists: PathBuf,
    labels: PathBuf,
}

impl BoycotterLists {
    pub fn new(store: BoycotterStore, artists: PathBuf, labels: PathBuf) -> Self {
        Self {
            store,
            artists,
            labels,
        }
    }

    /// Resolve list locations from configuration.
    pub fn from_config(store: BoycotterStore, config: &Config, root: &Path) -> Self {
        Self::new(
            store,
            config.files.artist_path(root),
            config.files.label_path(root),
        )
    }

    pub fn path(&self, kind: ListKind) -> &Path {
        match kind {
            ListKind::Artists => &self.artists,
            ListKind::Labels => &self.labels,
        }
    }

    pub async fn read(&self, kind: ListKind) -> Result<Vec<String>> {
        self.store.read(self.path(kind)).await
    }

    pub async fn add<S: AsRef<str>>(&self, kind: ListKind, names: &[S]) -> Result<Vec<String>> {
        self.store.add(self.path(kind), names).await
    }
}
