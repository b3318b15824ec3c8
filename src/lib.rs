pub mod analysis;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod scan;
pub mod session;
pub mod storage;

pub use analysis::{analyze_basic, AnalysisOrchestrator, GitCloner, RepoCloner};
pub use config::Config;
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use session::{Session, SessionAction};
pub use storage::{reconcile, AdvancedStore, FavoritesStore};
