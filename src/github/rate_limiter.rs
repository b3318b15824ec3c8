use reqwest::Response;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

/// Client-side pacing for the search endpoint.
///
/// Search has its own budget, separate from the core API: 10 requests per
/// minute anonymously, 30 with a token. Server-reported header values take
/// precedence over the local window.
pub struct RateLimiter {
    state: Mutex<LimiterState>,
    per_minute: u32,
}

struct LimiterState {
    remaining: u32,
    reset_at: Option<std::time::Instant>,
    window_used: u32,
    window_start: std::time::Instant,
}

impl RateLimiter {
    pub fn new(authenticated: bool) -> Self {
        let per_minute = if authenticated { 30 } else { 10 };
        Self {
            state: Mutex::new(LimiterState {
                remaining: per_minute,
                reset_at: None,
                window_used: 0,
                window_start: std::time::Instant::now(),
            }),
            per_minute,
        }
    }

    /// Block until the next request is allowed.
    pub async fn wait(&self) {
        let mut state = self.state.lock().await;

        // Server says we are out of budget; sleep until the reported reset.
        if state.remaining == 0 {
            if let Some(reset_at) = state.reset_at {
                let now = std::time::Instant::now();
                if reset_at > now {
                    let wait = reset_at - now;
                    drop(state);
                    tracing::info!("Search rate limit exhausted, waiting {:?}", wait);
                    sleep(wait).await;
                    state = self.state.lock().await;
                    state.remaining = self.per_minute;
                    state.reset_at = None;
                }
            }
        }

        // Local window keeps us under the documented per-minute budget even
        // before the server pushes back.
        let elapsed = state.window_start.elapsed();
        if elapsed < Duration::from_secs(60) {
            if state.window_used >= self.per_minute {
                let wait = Duration::from_secs(60) - elapsed;
                drop(state);
                tracing::debug!("Pacing search requests, waiting {:?}", wait);
                sleep(wait).await;
                state = self.state.lock().await;
                state.window_used = 0;
                state.window_start = std::time::Instant::now();
            }
        } else {
            state.window_used = 0;
            state.window_start = std::time::Instant::now();
        }

        state.window_used += 1;
    }

    /// Record the rate-limit headers of a response.
    pub async fn observe(&self, response: &Response) {
        let remaining = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let Some(remaining) = remaining else {
            return;
        };

        let reset = response
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let mut state = self.state.lock().await;
        state.remaining = remaining;
        if let Some(reset_timestamp) = reset {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            if reset_timestamp > now {
                state.reset_at = Some(
                    std::time::Instant::now() + Duration::from_secs(reset_timestamp - now),
                );
            }
        }
    }
}
