use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://allhackathons.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Settings for fetching and walking the hackathon site.
///
/// The delays are unconditional politeness pauses; they do not adapt to the
/// server's responses.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Total number of attempts per URL.
    pub retries: u32,
    /// Timeout of a single attempt.
    pub timeout: Duration,
    /// Attempt `n` (zero based) waits `backoff_base * 2^n` before the next try.
    pub backoff_base: Duration,
    /// Pause after each card's detail fetch.
    pub card_delay: Duration,
    /// Pause after each listing page.
    pub page_delay: Duration,
    /// Pause between themes when scraping all of them.
    pub theme_delay: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retries: 3,
            timeout: Duration::from_secs(30),
            backoff_base: Duration::from_secs(1),
            card_delay: Duration::from_secs(1),
            page_delay: Duration::from_secs(2),
            theme_delay: Duration::from_secs(5),
        }
    }
}

impl ScraperConfig {
    /// Listing URL of the first page of `theme`.
    pub fn theme_url(&self, theme: &str) -> String {
        format!("{}/themes/{theme}/", self.base_url.trim_end_matches('/'))
    }

    /// Listing URL of page `page` of `theme`. Page 1 is the bare theme URL.
    pub fn page_url(&self, theme: &str, page: u32) -> String {
        let theme_url = self.theme_url(theme);
        if page <= 1 {
            theme_url
        } else {
            format!("{theme_url}?page={page}")
        }
    }

    /// A configuration with every pause set to zero.
    pub fn without_delays(mut self) -> Self {
        self.backoff_base = Duration::ZERO;
        self.card_delay = Duration::ZERO;
        self.page_delay = Duration::ZERO;
        self.theme_delay = Duration::ZERO;
        self
    }
}

/// How charts are drawn. Passed explicitly to the renderer.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts"),
            width: 1200,
            height: 600,
            font_family: "sans-serif".to_string(),
        }
    }
}
