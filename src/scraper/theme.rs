use std::collections::BTreeMap;

use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::config::ScraperConfig;
use crate::model::{HackathonRecord, Theme};
use crate::scraper::detail::get_details;
use crate::scraper::fetch::PageFetcher;
use crate::scraper::listing::parse_cards;
use crate::scraper::pagination::parse_total_pages;
use crate::scraper::parse_document;

/// Scrape every listing page of `theme`, enriching each card with its detail
/// page. Records come back in page-then-card order.
///
/// Unavailable pages are skipped; nothing here is fatal.
#[instrument(skip(fetcher, config))]
pub(crate) async fn scrape_theme<F: PageFetcher>(
    fetcher: &F,
    config: &ScraperConfig,
    theme: &str,
) -> Vec<HackathonRecord> {
    let theme_url = config.theme_url(theme);
    info!(url = %theme_url, "starting theme scrape");

    let mut first_page = match fetcher.fetch_page(&theme_url).await {
        Ok(body) => Some(body),
        Err(e) => {
            warn!(error = %e, "could not discover page count, assuming one page");
            None
        }
    };
    let total_pages = match first_page.as_deref() {
        Some(body) => parse_total_pages(&parse_document(body)).unwrap_or_else(|e| {
            warn!(error = %e, "could not read pagination, assuming one page");
            1
        }),
        None => 1,
    };
    info!(total_pages, "found pages to scrape");

    let mut records = vec![];
    for page in 1..=total_pages {
        let url = config.page_url(theme, page);
        let body = match first_page.take().filter(|_| page == 1) {
            Some(body) => body,
            None => match fetcher.fetch_page(&url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(page, url = %url, error = %e, "failed to fetch page, skipping");
                    continue;
                }
            },
        };

        let cards = match parse_cards(&parse_document(&body), &config.base_url) {
            Ok(cards) => cards,
            Err(e) => {
                warn!(page, error = %e, "failed to parse listing page, skipping");
                continue;
            }
        };
        info!(page, total_pages, count = cards.len(), "found hackathons on page");

        let count = cards.len();
        for (index, mut card) in cards.into_iter().enumerate() {
            debug!(
                index = index + 1,
                count,
                title = card.title.as_deref().unwrap_or("Unknown"),
                "fetching details"
            );
            if let Some(detail_url) = card.detail_url.clone() {
                let details = get_details(fetcher, &detail_url).await;
                card.merge_details(details);
            }
            records.push(card);

            sleep(config.card_delay).await;
        }

        sleep(config.page_delay).await;
    }

    info!(total = records.len(), "theme scrape complete");
    records
}

/// Scrape each theme in turn, pausing between themes.
pub(crate) async fn scrape_themes<F: PageFetcher>(
    fetcher: &F,
    config: &ScraperConfig,
    themes: &[Theme],
) -> BTreeMap<String, Vec<HackathonRecord>> {
    let mut by_theme = BTreeMap::new();
    for (index, theme) in themes.iter().enumerate() {
        if index > 0 {
            sleep(config.theme_delay).await;
        }
        let records = scrape_theme(fetcher, config, theme.as_ref()).await;
        by_theme.insert(theme.to_string(), records);
    }
    by_theme
}
