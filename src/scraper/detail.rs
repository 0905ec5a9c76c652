use ::scraper::{ElementRef, Selector};
use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::model::HackathonDetails;
use crate::scraper::fetch::PageFetcher;
use crate::scraper::{element_text, find_next, parse_document, select_text, Html};

/// Fetch a hackathon's detail page and extract its fields.
///
/// A page that cannot be fetched yields empty details.
#[instrument(skip(fetcher))]
pub(crate) async fn get_details<F: PageFetcher>(fetcher: &F, url: &str) -> HackathonDetails {
    let body = match fetcher.fetch_page(url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(url, error = %e, "detail page unavailable");
            return HackathonDetails::default();
        }
    };
    let document = parse_document(&body);
    let details = parse_details(&document);
    debug!(url, empty = details.is_empty(), "parsed detail page");
    details
}

/// Extract the description and the labeled sections of a detail page.
///
/// Each section is optional. If extraction breaks part way, the fields filled
/// so far are kept.
pub(crate) fn parse_details(document: &Html) -> HackathonDetails {
    let mut details = HackathonDetails::default();
    if let Err(e) = fill_details(document, &mut details) {
        warn!(error = %e, "detail extraction stopped early");
    }
    details
}

fn fill_details(document: &Html, details: &mut HackathonDetails) -> Result<()> {
    details.full_description = parse_description(document)?;

    if let Some((start, end)) = parse_event_dates(document)? {
        details.start_date = start;
        details.end_date = end;
    }

    let paragraph_selector = Selector::parse("p")?;
    details.location = section_value(document, "Location", &|body| {
        select_text(body, &paragraph_selector)
    })?;
    details.organizer = section_value(document, "Organizer", &|body| {
        select_text(body, &paragraph_selector)
    })?;
    details.prizes = section_value(document, "Prizes", &|body| {
        select_text(body, &paragraph_selector)
    })?;

    let link_selector = Selector::parse("a")?;
    details.website = section_value(document, "Website", &|body| {
        body.select(&link_selector)
            .next()
            .map(|a| a.value().attr("href").unwrap_or_default().to_string())
    })?;

    Ok(())
}

fn parse_description(document: &Html) -> Result<Option<String>> {
    let card_selector = Selector::parse("div.card-body")?;
    let content_selector = Selector::parse("div.text-muted.lh-lg")?;
    let paragraph_selector = Selector::parse("p")?;

    let description = document
        .select(&card_selector)
        .next()
        .and_then(|card| card.select(&content_selector).next())
        .map(|content| {
            content
                .select(&paragraph_selector)
                .map(|p| element_text(&p))
                .join("\n\n")
        });
    Ok(description)
}

/// The first `h5` whose text contains `label`.
fn find_heading<'a>(document: &'a Html, label: &str) -> Result<Option<ElementRef<'a>>> {
    let heading_selector = Selector::parse("h5")?;
    Ok(document
        .select(&heading_selector)
        .find(|h| h.text().collect::<String>().contains(label)))
}

/// Start and end date from the block following the "Event Dates" heading.
fn parse_event_dates(document: &Html) -> Result<Option<(Option<String>, Option<String>)>> {
    let Some(heading) = find_heading(document, "Event Dates")? else {
        return Ok(None);
    };
    let body_selector = Selector::parse("div")?;
    let Some(body) = find_next(document, &heading, &body_selector) else {
        return Ok(None);
    };

    let start_selector = Selector::parse("div.fw-medium")?;
    let end_selector = Selector::parse("small.text-muted")?;
    let start = select_text(&body, &start_selector);
    let end = body
        .select(&end_selector)
        .next()
        .map(|e| strip_to_word(&e.text().collect::<String>()));
    Ok(Some((start, end)))
}

/// Drop the standalone word "to" from an end date such as "to Oct 3, 2025".
fn strip_to_word(text: &str) -> String {
    text.split_whitespace().filter(|word| *word != "to").join(" ")
}

/// Value of a labeled section: the heading, then the next `div.text-muted`,
/// then whatever `extract` pulls out of it.
fn section_value(
    document: &Html,
    label: &str,
    extract: &dyn Fn(&ElementRef) -> Option<String>,
) -> Result<Option<String>> {
    let Some(heading) = find_heading(document, label)? else {
        return Ok(None);
    };
    let body_selector = Selector::parse("div.text-muted")?;
    Ok(find_next(document, &heading, &body_selector).and_then(|body| extract(&body)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::scraper::fetch::tests::StubFetcher;

    pub(crate) const DETAIL_HTML: &str = r#"
        <html><body>
          <div class="card"><div class="card-body">
            <div class="text-muted lh-lg"><p> First paragraph. </p><p>Second paragraph.</p></div>
          </div></div>
          <div class="card"><h5 class="card-header">Event Dates</h5>
            <div class="card-body">
              <div class="fw-medium"> Nov 1, 2024 </div>
              <small class="text-muted">to Jan 31, 2025</small>
            </div>
          </div>
          <div class="card"><h5>Location</h5><div class="text-muted"><p>Berlin, Germany</p></div></div>
          <div class="card"><h5>Organizer</h5><div class="text-muted"><p> Open Source Guild </p></div></div>
          <div class="card"><h5>Prizes</h5><div class="text-muted"><p>$10,000</p></div></div>
          <div class="card"><h5>Website</h5><div class="text-muted"><a href="https://galaxy.dev">galaxy.dev</a></div></div>
        </body></html>"#;

    #[test]
    fn test_parse_all_sections() {
        let details = parse_details(&parse_document(DETAIL_HTML));
        assert_eq!(
            details.full_description.as_deref(),
            Some("First paragraph.\n\nSecond paragraph.")
        );
        assert_eq!(details.start_date.as_deref(), Some("Nov 1, 2024"));
        assert_eq!(details.end_date.as_deref(), Some("Jan 31, 2025"));
        assert_eq!(details.location.as_deref(), Some("Berlin, Germany"));
        assert_eq!(details.organizer.as_deref(), Some("Open Source Guild"));
        assert_eq!(details.prizes.as_deref(), Some("$10,000"));
        assert_eq!(details.website.as_deref(), Some("https://galaxy.dev"));
    }

    #[test]
    fn test_end_date_keeps_words_containing_to() {
        assert_eq!(strip_to_word(" to  October 3, 2025 "), "October 3, 2025");
    }

    #[test]
    fn test_missing_sections_are_absent() {
        let html = r#"<html><body>
            <div class="card"><h5>Prizes</h5><div class="text-muted"><p>$0</p></div></div>
        </body></html>"#;
        let details = parse_details(&parse_document(html));
        assert_eq!(details.prizes.as_deref(), Some("$0"));
        assert_eq!(details.full_description, None);
        assert_eq!(details.start_date, None);
        assert_eq!(details.location, None);
        assert_eq!(details.organizer, None);
        assert_eq!(details.website, None);
    }

    #[test]
    fn test_section_block_without_value() {
        let html = r#"<html><body>
            <h5>Website</h5><div class="text-muted">No link yet</div>
            <h5>Organizer</h5><div class="text-muted"><span>n/a</span></div>
        </body></html>"#;
        let details = parse_details(&parse_document(html));
        assert_eq!(details.website, None);
        assert_eq!(details.organizer, None);
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty_details() {
        let fetcher = StubFetcher::default();
        let details = get_details(&fetcher, "https://allhackathons.com/hackathon/gone/").await;
        assert!(details.is_empty());
        assert_eq!(fetcher.requests.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_get_details_from_fetched_page() {
        let url = "https://allhackathons.com/hackathon/galaxy/";
        let fetcher = StubFetcher::default().with_page(url, DETAIL_HTML);
        let details = get_details(&fetcher, url).await;
        assert_eq!(details.organizer.as_deref(), Some("Open Source Guild"));
    }
}
