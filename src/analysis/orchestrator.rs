use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

use crate::analysis::cloner::RepoCloner;
use crate::config::Config;
use crate::error::Result;
use crate::models::{FavoriteEntry, RepoReport, RepoSummary, SearchRepo};
use crate::scan::scan_directory;
use crate::storage::{AdvancedStore, FavoritesStore};

/// Turn raw search results into flat display rows.
///
/// Pure transform over the JSON already fetched; absent nested fields such
/// as the license map to `None`, never an error.
pub fn analyze_basic(repos: &[SearchRepo]) -> Vec<RepoSummary> {
    repos.iter().map(RepoSummary::from).collect()
}

/// A repository to clone and scan.
#[derive(Debug, Clone)]
pub struct CloneTarget {
    pub name: String,
    pub url: String,
}

impl From<&SearchRepo> for CloneTarget {
    fn from(repo: &SearchRepo) -> Self {
        Self {
            name: repo.name.clone(),
            url: repo.clone_url.clone(),
        }
    }
}

impl From<&FavoriteEntry> for CloneTarget {
    fn from(entry: &FavoriteEntry) -> Self {
        Self {
            name: entry.name.clone(),
            url: entry.url.clone(),
        }
    }
}

/// Changes applied by one advanced-analysis update.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AdvancedOutcome {
    pub analyzed: Vec<String>,
    pub pruned: Vec<String>,
}

/// Drives clone + scan batches, one repository at a time.
pub struct AnalysisOrchestrator {
    cloner: Arc<dyn RepoCloner>,
    clone_root: PathBuf,
    archive_root: PathBuf,
}

impl AnalysisOrchestrator {
    pub fn new(cloner: impl RepoCloner + 'static, config: &Config) -> Self {
        Self {
            cloner: Arc::new(cloner),
            clone_root: config.clone_dir.clone(),
            archive_root: config.archive_dir.clone(),
        }
    }

    /// Clone, scan, and release each target in turn.
    ///
    /// A repository that fails to clone is skipped with a warning and the
    /// batch continues. Every working copy is released before the next
    /// target starts; at most one checkout exists at a time.
    pub async fn analyze_detailed(&self, targets: &[CloneTarget]) -> Vec<RepoReport> {
        let pb = progress_bar(targets.len());
        let mut reports = Vec::new();

        for target in targets {
            match self.clone_and_scan(target).await {
                Ok(report) => reports.push(report),
                Err(err) => {
                    tracing::warn!("Skipping repository {}: {}", target.name, err);
                }
            }
            pb.inc(1);
        }

        pb.finish_with_message("analysis complete");
        reports
    }

    /// Refresh the advanced store against the current favorites.
    ///
    /// Favorites without an advanced entry (matched by name) are cloned,
    /// scanned, and their checkout relocated into the archive; advanced
    /// entries whose name is no longer favorited are pruned together with
    /// their archived clone. The store is saved before returning.
    pub async fn update_advanced(
        &self,
        favorites: &FavoritesStore,
        advanced: &mut AdvancedStore,
    ) -> Result<AdvancedOutcome> {
        let mut outcome = AdvancedOutcome::default();

        let new_targets: Vec<CloneTarget> = favorites
            .records()
            .iter()
            .filter(|f| !advanced.contains_name(&f.name))
            .map(CloneTarget::from)
            .collect();

        if !new_targets.is_empty() {
            let pb = progress_bar(new_targets.len());
            for target in &new_targets {
                match self.clone_scan_archive(target).await {
                    Ok(report) => {
                        advanced.upsert(report);
                        outcome.analyzed.push(target.name.clone());
                    }
                    Err(err) => {
                        tracing::warn!("Skipping repository {}: {}", target.name, err);
                    }
                }
                pb.inc(1);
            }
            pb.finish_with_message("advanced analysis complete");
        }

        let favorite_names: HashSet<&str> = favorites
            .records()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        let stale: Vec<String> = advanced
            .records()
            .iter()
            .map(|r| r.name.clone())
            .filter(|name| !favorite_names.contains(name.as_str()))
            .collect();

        for name in stale {
            advanced.remove(&name);
            let archived = self.archive_root.join(&name);
            if archived.exists() {
                tokio::fs::remove_dir_all(&archived).await?;
            }
            outcome.pruned.push(name);
        }

        advanced.save()?;
        Ok(outcome)
    }

    async fn clone_and_scan(&self, target: &CloneTarget) -> Result<RepoReport> {
        let workdir = self.checkout(target).await?;
        let counts = scan_directory(&workdir);
        if let Err(err) = tokio::fs::remove_dir_all(&workdir).await {
            tracing::warn!(
                "Failed to remove working copy {}: {}",
                workdir.display(),
                err
            );
        }
        Ok(RepoReport::new(&target.name, &counts))
    }

    async fn clone_scan_archive(&self, target: &CloneTarget) -> Result<RepoReport> {
        let workdir = self.checkout(target).await?;
        let counts = scan_directory(&workdir);

        tokio::fs::create_dir_all(&self.archive_root).await?;
        let archived = self.archive_root.join(&target.name);
        if archived.exists() {
            tokio::fs::remove_dir_all(&archived).await?;
        }
        tokio::fs::rename(&workdir, &archived).await?;

        Ok(RepoReport::new(&target.name, &counts))
    }

    async fn checkout(&self, target: &CloneTarget) -> Result<PathBuf> {
        let workdir = self.clone_root.join(&target.name);
        // A leftover from an interrupted run would make the clone fail.
        if workdir.exists() {
            tokio::fs::remove_dir_all(&workdir).await?;
        }
        self.cloner.clone_shallow(&target.url, &workdir).await?;
        Ok(workdir)
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}
