use std::collections::HashSet;

use crate::error::Result;
use crate::models::{FavoriteEntry, RepoSummary};
use crate::storage::FavoritesStore;

/// Add/remove operations applied by one reconciliation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub added: usize,
    pub removed: usize,
}

impl ReconcileOutcome {
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Bring the persisted favorites in line with an edited display table.
///
/// Rows flagged favorite but absent from the store are added (favorite
/// flag stripped); store entries whose URL appears in the table unflagged
/// are removed. URLs not present in the table are untouched, so
/// reconciling one page of search results never disturbs favorites made
/// from another. The updated set is persisted atomically before
/// returning. Running twice on an unchanged table is a no-op.
pub fn reconcile(table: &[RepoSummary], store: &mut FavoritesStore) -> Result<ReconcileOutcome> {
    let mut persisted: HashSet<String> =
        store.records().iter().map(|r| r.url.clone()).collect();

    let mut outcome = ReconcileOutcome::default();
    for row in table {
        if row.favorite && !persisted.contains(&row.url) {
            store.upsert(FavoriteEntry::from(row));
            persisted.insert(row.url.clone());
            outcome.added += 1;
        } else if !row.favorite && persisted.contains(&row.url) {
            store.remove(&row.url);
            persisted.remove(&row.url);
            outcome.removed += 1;
        }
    }

    store.save()?;
    Ok(outcome)
}
