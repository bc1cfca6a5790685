use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, warn};

use super::{lookup::VolumeInfo, ClientError, ClientResult};
use crate::books::dto::blank_to_none;

/// Key under which the local shelf keeps its entries.
pub const BOOKS_KEY: &str = "books";

/// Persistent string key-value storage on the device.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> ClientResult<()>;
}

/// A JSON object on disk, one member per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ClientResult<HashMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> ClientResult<()> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value);
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&all)?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    map: HashMap<String, String>,
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> ClientResult<()> {
        self.map.insert(key.to_string(), value);
        Ok(())
    }
}

/// A book saved on this device only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalBook {
    pub id: i64, // creation time, unix millis
    pub member: String,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub progress: Option<i32>,
    #[serde(default)]
    pub rating: Option<i32>,
}

impl LocalBook {
    /// Five stars, filled up to the rating. `None` when unrated.
    pub fn stars(&self) -> Option<String> {
        let rating = self.rating.filter(|r| *r != 0)?;
        Some((1..=5).map(|i| if i <= rating { '★' } else { '☆' }).collect())
    }

    pub fn progress_clamped(&self) -> Option<u8> {
        self.progress.map(|p| p.clamp(0, 100) as u8)
    }
}

/// What the member typed into the tracker form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalDraft {
    pub member: String,
    pub title: String,
    pub genre: String,
    pub summary: String,
    pub cover_url: String,
    pub progress: Option<i32>,
    pub rating: Option<i32>,
}

impl LocalDraft {
    /// Fills summary, genre and cover from a lookup, leaving anything the
    /// member already entered alone.
    pub fn prefill(&mut self, info: &VolumeInfo) {
        if self.summary.trim().is_empty() {
            if let Some(desc) = info.description.as_deref().filter(|d| !d.is_empty()) {
                self.summary = desc.to_string();
            }
        }
        if self.genre.trim().is_empty() {
            if let Some(category) = info.categories.first() {
                self.genre = category.clone();
            }
        }
        if self.cover_url.trim().is_empty() {
            if let Some(thumb) = info.image_links.as_ref().and_then(|l| l.thumbnail.as_deref()) {
                self.cover_url = thumb.replace("zoom=1", "zoom=2");
            }
        }
    }
}

/// The device-local book list, independent of the server.
pub struct LocalShelf<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> LocalShelf<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Saved entries in insertion order; unreadable data counts as empty.
    pub fn load(&self) -> Vec<LocalBook> {
        let raw = match self.store.get(BOOKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "reading stored books failed");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "error parsing stored books");
            Vec::new()
        })
    }

    pub fn save(&mut self, books: &[LocalBook]) -> ClientResult<()> {
        self.store.set(BOOKS_KEY, serde_json::to_string(books)?)
    }

    pub fn add(&mut self, draft: LocalDraft) -> ClientResult<LocalBook> {
        let member = draft.member.trim().to_string();
        let title = draft.title.trim().to_string();
        if member.is_empty() || title.is_empty() {
            return Err(ClientError::Invalid(
                "Please provide your name and a book title.".into(),
            ));
        }

        let mut books = self.load();
        let now_ms = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
        // ids stay unique when two entries land in the same millisecond
        let id = books.last().map_or(now_ms, |last| now_ms.max(last.id + 1));

        let book = LocalBook {
            id,
            member,
            title,
            genre: blank_to_none(Some(draft.genre)),
            summary: blank_to_none(Some(draft.summary)),
            cover_url: blank_to_none(Some(draft.cover_url)),
            progress: draft.progress,
            rating: draft.rating,
        };
        books.push(book.clone());
        self.save(&books)?;
        debug!(id = book.id, title = %book.title, "saved local book");
        Ok(book)
    }
}
