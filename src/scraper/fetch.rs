use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use crate::config::ScraperConfig;
use crate::error::{HackathonError, Result};

/// Source of raw page bodies.
///
/// The orchestrator only needs "give me the HTML at this URL"; an error means
/// the page is unavailable.
pub trait PageFetcher {
    fn fetch_page(&self, url: &str) -> impl Future<Output = Result<String>>;
}

/// HTTP fetcher with a fixed user agent, a per-attempt timeout and a bounded
/// number of attempts with exponential backoff.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
    retries: u32,
    backoff_base: Duration,
}

impl HttpFetcher {
    /// Build a fetcher whose client carries the configured user agent and timeout.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(HackathonError::Client)?;
        Ok(Self::with_client(http, config))
    }

    /// Use the provided [`reqwest::Client`] as is; only the retry settings are
    /// taken from `config`.
    pub fn with_client(http: reqwest::Client, config: &ScraperConfig) -> Self {
        Self {
            http,
            retries: config.retries,
            backoff_base: config.backoff_base,
        }
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let attempts = self.retries.max(1);
        let mut attempt = 0;
        loop {
            match get_body(&self.http, url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    warn!(
                        url,
                        attempt = attempt + 1,
                        attempts,
                        error = %e,
                        "fetch attempt failed"
                    );
                    if attempt + 1 >= attempts {
                        return Err(e);
                    }
                    sleep(backoff(self.backoff_base, attempt)).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Pause after failed attempt `attempt` (zero based): `base * 2^attempt`, saturating.
fn backoff(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// One GET request. Non-success statuses are errors.
async fn get_body(client: &reqwest::Client, url: &str) -> Result<String> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| HackathonError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HackathonError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(|e| HackathonError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })
}
