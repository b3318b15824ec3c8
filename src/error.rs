use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;
