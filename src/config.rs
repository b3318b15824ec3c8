use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub favorites_path: PathBuf,
    pub advanced_path: PathBuf,
    pub clone_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub per_page: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        let favorites_path = env::var("FAVORITES_PATH")
            .unwrap_or_else(|_| "favorites.csv".to_string())
            .into();

        let advanced_path = env::var("ADVANCED_FAVORITES_PATH")
            .unwrap_or_else(|_| "advanced_favorites.csv".to_string())
            .into();

        let clone_dir = env::var("CLONE_DIR")
            .unwrap_or_else(|_| "temp_cloned_repos".to_string())
            .into();

        let archive_dir = env::var("ARCHIVE_DIR")
            .unwrap_or_else(|_| "favorites_repos".to_string())
            .into();

        let per_page = env::var("SEARCH_PER_PAGE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);

        if per_page == 0 || per_page > 100 {
            return Err(Error::Config(format!(
                "SEARCH_PER_PAGE must be between 1 and 100, got {}",
                per_page
            )));
        }

        Ok(Self {
            github_token,
            favorites_path,
            advanced_path,
            clone_dir,
            archive_dir,
            per_page,
        })
    }
}
