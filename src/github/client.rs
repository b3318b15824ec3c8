use reqwest::{header, Client, StatusCode};

use crate::error::{Error, Result};
use crate::github::rate_limiter::RateLimiter;
use crate::models::{SearchRepo, SearchResponse};

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    /// Build a client. The token is optional; search works anonymously at
    /// a lower rate limit.
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("reposcope/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(token.is_some()),
            base_url: "https://api.github.com".to_string(),
        })
    }

    /// Search repositories matching `query`, one page at a time.
    ///
    /// Non-success responses are surfaced as errors; there is no retry.
    pub async fn search_repositories(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<SearchRepo>> {
        self.rate_limiter.wait().await;
        let url = format!("{}/search/repositories", self.base_url);
        tracing::info!("Searching repositories: {:?} (page {})", query, page);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await?;
        self.rate_limiter.observe(&response).await;

        if response.status() == StatusCode::FORBIDDEN
            || response.status() == StatusCode::TOO_MANY_REQUESTS
        {
            let exhausted = response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                .map(|v| v == "0")
                .unwrap_or(false);
            if exhausted || response.status() == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get(header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);
                return Err(Error::RateLimited(retry_after));
            }
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Search failed with status {}: {}",
                status, body
            )));
        }

        let body: SearchResponse = response.json().await?;
        tracing::debug!(
            "{} of {} matching repositories returned",
            body.items.len(),
            body.total_count
        );
        Ok(body.items)
    }
}
