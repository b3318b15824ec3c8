use std::path::PathBuf;

use crate::error::Result;
use crate::models::RepoReport;

/// The persisted advanced-analysis reports, keyed by repository name.
///
/// Favorites are keyed by URL but this store follows the archive layout,
/// which uses one directory per repository name; two favorites sharing a
/// display name collide here.
pub struct AdvancedStore {
    path: PathBuf,
    records: Vec<RepoReport>,
}

impl AdvancedStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = super::load_rows_tolerant(&path)?;
        Ok(Self { path, records })
    }

    pub fn records(&self) -> &[RepoReport] {
        &self.records
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.name == name)
    }

    /// Replace the report with the same name, or append.
    pub fn upsert(&mut self, report: RepoReport) {
        if let Some(existing) = self.records.iter_mut().find(|r| r.name == report.name) {
            *existing = report;
        } else {
            self.records.push(report);
        }
    }

    /// Remove the report for this repository name. Returns whether one was
    /// present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.name != name);
        self.records.len() < before
    }

    pub fn save(&self) -> Result<()> {
        super::write_rows_atomic(&self.path, &self.records, &RepoReport::HEADERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineCountReport;

    fn report(name: &str, total: u64) -> RepoReport {
        RepoReport::new(
            name,
            &LineCountReport {
                total_lines: total,
                code_lines: total,
                rust_lines: total,
                ..Default::default()
            },
        )
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("advanced.csv");

        let mut store = AdvancedStore::open(&path).unwrap();
        store.upsert(report("alpha", 10));
        store.upsert(report("beta", 20));
        store.save().unwrap();

        let reloaded = AdvancedStore::open(&path).unwrap();
        assert_eq!(reloaded.records(), store.records());
    }

    #[test]
    fn upsert_replaces_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AdvancedStore::open(dir.path().join("a.csv")).unwrap();

        store.upsert(report("alpha", 10));
        store.upsert(report("alpha", 99));

        assert_eq!(store.records().len(), 1);
        assert_eq!(store.records()[0].total_lines, 99);
    }

    #[test]
    fn remove_prunes_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AdvancedStore::open(dir.path().join("a.csv")).unwrap();
        store.upsert(report("alpha", 10));

        assert!(store.remove("alpha"));
        assert!(!store.contains_name("alpha"));
        assert!(!store.remove("alpha"));
    }
}
