pub mod advanced;
pub mod favorites;
pub mod reconciler;

pub use advanced::AdvancedStore;
pub use favorites::FavoritesStore;
pub use reconciler::{reconcile, ReconcileOutcome};

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Load a headered CSV file record by record, skipping rows that fail to
/// parse. A truncated or otherwise corrupted row costs only itself; the
/// rest of the file still loads. A missing file yields an empty set.
pub fn load_rows_tolerant<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for (index, row) in reader.deserialize::<T>().enumerate() {
        match row {
            Ok(row) => rows.push(row),
            Err(err) => {
                // +2: one for the header row, one for zero-based indexing.
                tracing::warn!(
                    "Skipping malformed line {} in {}: {}",
                    index + 2,
                    path.display(),
                    err
                );
            }
        }
    }
    Ok(rows)
}

/// Overwrite `path` with the full record set, header included. The data
/// goes to a sibling temp file first and is renamed into place, so a
/// reader never observes a partial write.
pub fn write_rows_atomic<T: Serialize>(path: &Path, rows: &[T], headers: &[&str]) -> Result<()> {
    let tmp = path.with_extension("tmp");
    {
        let mut writer = csv::Writer::from_path(&tmp)?;
        if rows.is_empty() {
            writer.write_record(headers)?;
        }
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
