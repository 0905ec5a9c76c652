use std::collections::BTreeMap;
use std::path::Path;

use strum::IntoEnumIterator;
use tracing::{error, instrument};

use crate::config::ScraperConfig;
use crate::error::Result;
use crate::model::*;
use crate::scraper::fetch::{HttpFetcher, PageFetcher};
use crate::scraper::{detail, theme};
use crate::storage;

/// The main entry point for scraping allhackathons.com.
///
/// `HackathonClient` owns a [`ScraperConfig`] and a page fetcher, and exposes
/// the theme scrape workflow plus its building blocks.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> hackathon_scraper::Result<()> {
/// use std::path::Path;
///
/// use hackathon_scraper::HackathonClient;
///
/// let client = HackathonClient::new()?;
/// let hackathons = client
///     .scrape_theme("remote", Some(Path::new("remote_hackathons.json")))
///     .await;
/// println!("Found {} hackathons", hackathons.len());
/// # Ok(())
/// # }
/// ```
pub struct HackathonClient<F = HttpFetcher> {
    fetcher: F,
    config: ScraperConfig,
}

impl HackathonClient {
    /// Create a client with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a client whose HTTP fetcher follows `config`.
    pub fn with_config(config: ScraperConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }
}

impl<F: PageFetcher> HackathonClient<F> {
    /// Create a client that reads pages through `fetcher`.
    pub fn with_fetcher(fetcher: F, config: ScraperConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Scrape all pages of a theme (e.g. `remote`, `ai`, `blockchain`).
    ///
    /// When `save_to` is given the records are written there once the scrape
    /// finishes. A failed save is logged and the records are still returned.
    #[instrument(skip(self))]
    pub async fn scrape_theme(&self, theme: &str, save_to: Option<&Path>) -> Vec<HackathonRecord> {
        let records = theme::scrape_theme(&self.fetcher, &self.config, theme).await;
        if let Some(path) = save_to {
            save_logged(&records, path);
        }
        records
    }

    /// Scrape every known theme, keyed by theme slug.
    #[instrument(skip(self))]
    pub async fn scrape_all_themes(
        &self,
        save_to: Option<&Path>,
    ) -> BTreeMap<String, Vec<HackathonRecord>> {
        let themes = Theme::iter().collect::<Vec<_>>();
        let by_theme = theme::scrape_themes(&self.fetcher, &self.config, &themes).await;
        if let Some(path) = save_to {
            save_logged(&by_theme, path);
        }
        by_theme
    }

    /// Fetch and parse one hackathon detail page.
    #[instrument(skip(self))]
    pub async fn get_details(&self, url: &str) -> HackathonDetails {
        detail::get_details(&self.fetcher, url).await
    }
}

fn save_logged<T: serde::Serialize + ?Sized>(value: &T, path: &Path) {
    if let Err(e) = storage::save_json(value, path) {
        error!(path = %path.display(), error = %e, "failed to save scrape results");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::fetch::tests::StubFetcher;
    use crate::scraper::listing::tests::{card_html, listing_html};

    #[tokio::test]
    async fn test_scrape_theme_saves_results() {
        let config = ScraperConfig::default().without_delays();
        let fetcher = StubFetcher::default().with_page(
            "https://allhackathons.com/themes/web/",
            &listing_html(&[card_html("Webby", "webby", &["web"], "Online")]),
        );
        let client = HackathonClient::with_fetcher(fetcher, config);
        let path =
            std::env::temp_dir().join(format!("hackathon-client-{}.json", std::process::id()));

        let records = client.scrape_theme("web", Some(&path)).await;
        assert_eq!(records.len(), 1);

        let saved = storage::load_records(&path).unwrap();
        assert_eq!(saved, records);
        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_failed_save_still_returns_records() {
        let config = ScraperConfig::default().without_delays();
        let fetcher = StubFetcher::default().with_page(
            "https://allhackathons.com/themes/web/",
            &listing_html(&[card_html("Webby", "webby", &["web"], "Online")]),
        );
        let client = HackathonClient::with_fetcher(fetcher, config);
        let path = std::env::temp_dir()
            .join("hackathon-scraper-missing-dir")
            .join("nested")
            .join("out.json");

        let records = client.scrape_theme("web", Some(&path)).await;
        assert_eq!(records.len(), 1);
        assert!(!path.exists());
    }
}
