use std::path::PathBuf;

use crate::error::Result;
use crate::models::FavoriteEntry;

/// The persisted favorites, keyed by repository URL.
///
/// Records are held in memory in file order; mutations go through
/// [`upsert`](Self::upsert) and [`remove`](Self::remove) so the store never
/// contains two entries with the same URL, and [`save`](Self::save) writes
/// the whole set back atomically.
pub struct FavoritesStore {
    path: PathBuf,
    records: Vec<FavoriteEntry>,
}

impl FavoritesStore {
    /// Open the store at `path`, tolerating malformed rows. A missing file
    /// is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = super::load_rows_tolerant(&path)?;
        Ok(Self { path, records })
    }

    pub fn records(&self) -> &[FavoriteEntry] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.records.iter().any(|r| r.url == url)
    }

    /// Replace the entry with the same URL, or append.
    pub fn upsert(&mut self, entry: FavoriteEntry) {
        if let Some(existing) = self.records.iter_mut().find(|r| r.url == entry.url) {
            *existing = entry;
        } else {
            self.records.push(entry);
        }
    }

    /// Remove the entry with this URL. Returns whether one was present.
    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.url != url);
        self.records.len() < before
    }

    pub fn save(&self) -> Result<()> {
        super::write_rows_atomic(&self.path, &self.records, &FavoriteEntry::HEADERS)
    }
}
