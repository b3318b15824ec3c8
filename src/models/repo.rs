use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::favorite::FavoriteEntry;

/// Response body of the repository search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    pub items: Vec<SearchRepo>,
}

/// One repository as returned by the search API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub clone_url: String,
    pub language: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub default_branch: String,
    pub open_issues: u32,
    pub watchers: u32,
    pub license: Option<License>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub name: String,
}

/// A flat display row handed to the table surface.
///
/// The favorite flag is transient: it is derived from the favorites store
/// when rows are built and stripped again before anything is persisted.
/// Column names follow the persisted CSV headers, so an edited table
/// round-trips through the same serde definitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepoSummary {
    #[serde(rename = "Favorite", default, deserialize_with = "flag_lenient")]
    pub favorite: bool,
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

/// Tables come back from the display surface with the favorite column as
/// free-form text. Anything other than an explicit true marker counts as
/// not-favorited, including an absent column.
fn flag_lenient<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(
        raw.as_deref().map(str::trim),
        Some("true") | Some("True") | Some("TRUE") | Some("1")
    ))
}

impl From<&SearchRepo> for RepoSummary {
    fn from(repo: &SearchRepo) -> Self {
        Self {
            favorite: false,
            name: repo.name.clone(),
            description: repo.description.clone(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            language: repo.language.clone(),
            size_kb: repo.size,
            url: repo.html_url.clone(),
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            default_branch: repo.default_branch.clone(),
            open_issues: repo.open_issues,
            watchers: repo.watchers,
            license: repo.license.as_ref().map(|l| l.name.clone()),
        }
    }
}

impl From<&FavoriteEntry> for RepoSummary {
    fn from(entry: &FavoriteEntry) -> Self {
        Self {
            favorite: true,
            name: entry.name.clone(),
            description: entry.description.clone(),
            stars: entry.stars,
            forks: entry.forks,
            language: entry.language.clone(),
            size_kb: entry.size_kb,
            url: entry.url.clone(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
            default_branch: entry.default_branch.clone(),
            open_issues: entry.open_issues,
            watchers: entry.watchers,
            license: entry.license.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_from_search_repo_maps_missing_license_to_none() {
        let json = r#"{
            "id": 1,
            "name": "widget",
            "full_name": "acme/widget",
            "description": null,
            "html_url": "https://github.com/acme/widget",
            "clone_url": "https://github.com/acme/widget.git",
            "language": "Rust",
            "stargazers_count": 7,
            "forks_count": 2,
            "size": 120,
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2021-06-01T12:00:00Z",
            "default_branch": "main",
            "open_issues": 3,
            "watchers": 7,
            "license": null
        }"#;
        let repo: SearchRepo = serde_json::from_str(json).unwrap();
        let row = RepoSummary::from(&repo);
        assert_eq!(row.license, None);
        assert_eq!(row.description, None);
        assert!(!row.favorite);
        assert_eq!(row.url, "https://github.com/acme/widget");
    }

    #[test]
    fn table_without_favorite_column_defaults_to_unfavorited() {
        let table = "Name,URL,Description,Stars,Forks,Language,Size (KB),\
                     Created At,Updated At,Default Branch,Open Issues,Watchers,License\n\
                     widget,https://github.com/acme/widget,,1,0,,10,\
                     2020-01-01T00:00:00Z,2020-01-02T00:00:00Z,main,0,1,\n";
        let mut reader = csv::Reader::from_reader(table.as_bytes());
        let row: RepoSummary = reader.deserialize().next().unwrap().unwrap();
        assert!(!row.favorite);
    }

    #[test]
    fn favorite_flag_parses_leniently() {
        let table = "Favorite,Name,URL,Description,Stars,Forks,Language,Size (KB),\
                     Created At,Updated At,Default Branch,Open Issues,Watchers,License\n\
                     True,a,u1,,1,0,,10,2020-01-01T00:00:00Z,2020-01-02T00:00:00Z,main,0,1,\n\
                     ,b,u2,,1,0,,10,2020-01-01T00:00:00Z,2020-01-02T00:00:00Z,main,0,1,\n\
                     nonsense,c,u3,,1,0,,10,2020-01-01T00:00:00Z,2020-01-02T00:00:00Z,main,0,1,\n";
        let mut reader = csv::Reader::from_reader(table.as_bytes());
        let flags: Vec<bool> = reader
            .deserialize::<RepoSummary>()
            .map(|r| r.unwrap().favorite)
            .collect();
        assert_eq!(flags, vec![true, false, false]);
    }
}
