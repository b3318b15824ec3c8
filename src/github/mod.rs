pub mod client;
pub mod rate_limiter;

pub use client::GitHubClient;
pub use rate_limiter::RateLimiter;
