use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repo::RepoSummary;

/// A favorited repository as persisted in the favorites CSV.
///
/// Same descriptive columns as [`RepoSummary`] without the favorite flag.
/// The URL is the stable key; the store never holds two entries with the
/// same URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Stars")]
    pub stars: u32,
    #[serde(rename = "Forks")]
    pub forks: u32,
    #[serde(rename = "Language")]
    pub language: Option<String>,
    #[serde(rename = "Size (KB)")]
    pub size_kb: u64,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Created At")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "Updated At")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "Default Branch")]
    pub default_branch: String,
    #[serde(rename = "Open Issues")]
    pub open_issues: u32,
    #[serde(rename = "Watchers")]
    pub watchers: u32,
    #[serde(rename = "License")]
    pub license: Option<String>,
}

impl FavoriteEntry {
    /// Column order of the persisted file. Written explicitly so an empty
    /// store still produces a header row.
    pub const HEADERS: [&'static str; 13] = [
        "Name",
        "Description",
        "Stars",
        "Forks",
        "Language",
        "Size (KB)",
        "URL",
        "Created At",
        "Updated At",
        "Default Branch",
        "Open Issues",
        "Watchers",
        "License",
    ];
}

impl From<&RepoSummary> for FavoriteEntry {
    fn from(row: &RepoSummary) -> Self {
        Self {
            name: row.name.clone(),
            description: row.description.clone(),
            stars: row.stars,
            forks: row.forks,
            language: row.language.clone(),
            size_kb: row.size_kb,
            url: row.url.clone(),
            created_at: row.created_at,
            updated_at: row.updated_at,
            default_branch: row.default_branch.clone(),
            open_issues: row.open_issues,
            watchers: row.watchers,
            license: row.license.clone(),
        }
    }
}
