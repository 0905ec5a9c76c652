use ::scraper::{ElementRef, Selector};
use itertools::Itertools;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{HackathonRecord, Status};
use crate::scraper::{absolute_url, element_text, own_text, select_text, Html};

const CARD_SELECTOR: &str = "div.row.align-items-center.bg-white.mb-4.py-5.px-4";

/// Separator between theme links and the location in a card's theme block.
/// The mis-decoded form shows up in pages saved as Latin-1.
const LOCATION_SEPARATORS: [&str; 2] = ["Â·", "·"];

/// Extract every hackathon card on a listing page.
///
/// Cards that fail to parse are logged and left out.
pub(crate) fn parse_cards(document: &Html, base_url: &str) -> Result<Vec<HackathonRecord>> {
    let selector = Selector::parse(CARD_SELECTOR)?;
    let mut cards = vec![];
    for element in document.select(&selector) {
        match parse_card(&element, base_url) {
            Ok(card) => cards.push(card),
            Err(e) => warn!(error = %e, "skipping unparsable hackathon card"),
        }
    }
    debug!(count = cards.len(), "parsed listing cards");
    Ok(cards)
}

fn parse_card(element: &ElementRef, base_url: &str) -> Result<HackathonRecord> {
    let mut card = HackathonRecord::default();

    let title_selector = Selector::parse("a.h5.text-darkblue.d-block.mt-3")?;
    if let Some(link) = element.select(&title_selector).next() {
        card.title = Some(element_text(&link));
        card.detail_url = link
            .value()
            .attr("href")
            .map(|href| absolute_url(base_url, href));
    }

    let image_selector = Selector::parse("img.img-fluid")?;
    card.image_url = element
        .select(&image_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| absolute_url(base_url, src));

    let badge_selector = Selector::parse("span.badge.bg-success")?;
    card.location_type = select_text(element, &badge_selector);

    let paragraph_selector = Selector::parse("p")?;
    card.dates = select_text(element, &paragraph_selector);

    card.status = parse_status(element)?;

    let description_selector = Selector::parse("p.text-muted.mt-2.mb-0")?;
    card.short_description = select_text(element, &description_selector);

    let themes_selector = Selector::parse("div.font-size-sm.text-muted.mt-3")?;
    if let Some(themes_block) = element.select(&themes_selector).next() {
        let (themes, location) = parse_themes_block(&themes_block)?;
        card.themes = Some(themes);
        card.location = location;
    }

    Ok(card)
}

/// The first `div` whose own text names one of the known statuses.
fn parse_status(element: &ElementRef) -> Result<Option<String>> {
    let div_selector = Selector::parse("div")?;
    let status = element
        .select(&div_selector)
        .filter_map(|div| own_text(&div))
        .find(|text| Status::iter().any(|status| text.contains(status.as_ref())))
        .map(|text| text.trim().to_string());
    Ok(status)
}

/// Theme link texts in order, plus whatever text remains once the links and
/// separators are removed, which is the location.
fn parse_themes_block(block: &ElementRef) -> Result<(Vec<String>, Option<String>)> {
    let link_selector = Selector::parse("a")?;
    let themes = block
        .select(&link_selector)
        .map(|link| element_text(&link))
        .collect_vec();

    let block_id = block.id();
    let mut remainder = block
        .descendants()
        .filter_map(|node| node.value().as_text().map(|text| (node, text)))
        .filter(|(node, _)| {
            !node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != block_id)
                .any(|ancestor| ancestor.value().as_element().is_some_and(|e| e.name() == "a"))
        })
        .map(|(_, text)| &**text)
        .collect::<String>();
    for separator in LOCATION_SEPARATORS {
        remainder = remainder.replace(separator, "");
    }
    let location = Some(remainder.trim().to_string()).filter(|l| !l.is_empty());

    Ok((themes, location))
}
