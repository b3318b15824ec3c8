use std::collections::HashMap;

use crate::analysis::analyze_basic;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::models::{RepoSummary, SearchRepo};
use crate::storage::FavoritesStore;

/// One user action against the session.
#[derive(Debug, Clone)]
pub enum SessionAction {
    Search { query: String },
    NextPage,
    PrevPage,
}

/// Per-session search state.
///
/// Created at session start and dropped at session end; there is no
/// process-wide state. Fetched pages are cached by `(query, page)` so
/// re-rendering a page the user already visited does not hit the API
/// again.
pub struct Session {
    pub query: String,
    pub current_page: u32,
    pub per_page: u32,
    pub repositories: Vec<SearchRepo>,
    cache: HashMap<(String, u32), Vec<SearchRepo>>,
}

impl Session {
    pub fn new(per_page: u32) -> Self {
        Self {
            query: String::new(),
            current_page: 1,
            per_page,
            repositories: Vec::new(),
            cache: HashMap::new(),
        }
    }

    /// Apply one action, fetching through `client` when needed.
    ///
    /// A failed fetch clears the current result list and propagates the
    /// error; the session itself stays usable.
    pub async fn handle(&mut self, action: SessionAction, client: &GitHubClient) -> Result<()> {
        match action {
            SessionAction::Search { query } => {
                self.query = query;
                self.current_page = 1;
                self.fetch_current(client).await
            }
            SessionAction::NextPage => {
                self.current_page += 1;
                self.fetch_current(client).await
            }
            SessionAction::PrevPage => {
                if self.current_page > 1 {
                    self.current_page -= 1;
                    self.fetch_current(client).await
                } else {
                    Ok(())
                }
            }
        }
    }

    async fn fetch_current(&mut self, client: &GitHubClient) -> Result<()> {
        let key = (self.query.clone(), self.current_page);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(
                "Using cached results for {:?} page {}",
                key.0,
                key.1
            );
            self.repositories = cached.clone();
            return Ok(());
        }

        match client
            .search_repositories(&self.query, self.current_page, self.per_page)
            .await
        {
            Ok(repos) => {
                self.cache.insert(key, repos.clone());
                self.repositories = repos;
                Ok(())
            }
            Err(err) => {
                self.repositories = Vec::new();
                Err(err)
            }
        }
    }

    /// Display rows for the current page, favorite flags derived from the
    /// persisted store.
    pub fn rows_with_favorites(&self, favorites: &FavoritesStore) -> Vec<RepoSummary> {
        let mut rows = analyze_basic(&self.repositories);
        for row in &mut rows {
            row.favorite = favorites.contains_url(&row.url);
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FavoriteEntry;

    fn search_repo(name: &str, url: &str) -> SearchRepo {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": name,
            "full_name": format!("acme/{}", name),
            "description": null,
            "html_url": url,
            "clone_url": format!("{}.git", url),
            "language": null,
            "stargazers_count": 0,
            "forks_count": 0,
            "size": 1,
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2020-01-02T00:00:00Z",
            "default_branch": "main",
            "open_issues": 0,
            "watchers": 0,
            "license": null
        }))
        .unwrap()
    }

    #[test]
    fn favorite_flags_follow_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(50);
        session.repositories = vec![
            search_repo("starred", "https://example.com/starred"),
            search_repo("plain", "https://example.com/plain"),
        ];

        let mut store = FavoritesStore::open(dir.path().join("f.csv")).unwrap();
        let row = RepoSummary::from(&session.repositories[0]);
        store.upsert(FavoriteEntry::from(&row));

        let rows = session.rows_with_favorites(&store);
        assert!(rows[0].favorite);
        assert!(!rows[1].favorite);
    }

    #[tokio::test]
    async fn prev_page_at_first_page_is_a_noop() {
        let client = GitHubClient::new(None).unwrap();
        let mut session = Session::new(50);
        session.repositories = vec![search_repo("kept", "https://example.com/kept")];

        session.handle(SessionAction::PrevPage, &client).await.unwrap();

        assert_eq!(session.current_page, 1);
        assert_eq!(session.repositories.len(), 1);
    }

    #[tokio::test]
    async fn cached_page_skips_the_network() {
        // Seed the cache, then ask for the same page: the client is never
        // touched, so no network is needed.
        let client = GitHubClient::new(None).unwrap();
        let mut session = Session::new(50);
        session.query = "rust".to_string();
        session.cache.insert(
            ("rust".to_string(), 2),
            vec![search_repo("cached", "https://example.com/cached")],
        );

        session.handle(SessionAction::NextPage, &client).await.unwrap();

        assert_eq!(session.current_page, 2);
        assert_eq!(session.repositories[0].name, "cached");
    }
}
