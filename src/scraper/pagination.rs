use ::scraper::Selector;

use crate::error::Result;
use crate::scraper::{element_text, Html};

/// Highest page number linked from a listing page's pagination control.
///
/// Pages without pagination, or whose links carry no numbers, count as one page.
pub(crate) fn parse_total_pages(document: &Html) -> Result<u32> {
    let pagination_selector = Selector::parse("div.pagination")?;
    let Some(pagination) = document.select(&pagination_selector).next() else {
        return Ok(1);
    };

    let link_selector = Selector::parse("a.endless_page_link")?;
    let total_pages = pagination
        .select(&link_selector)
        .filter_map(|link| element_text(&link).parse::<u32>().ok())
        .fold(1, u32::max);
    Ok(total_pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::parse_document;

    fn pagination_html(links: &[&str]) -> String {
        let links: String = links
            .iter()
            .map(|l| format!(r#"<a class="endless_page_link" href="?page={l}">{l}</a>"#))
            .collect();
        format!(r#"<html><body><div class="pagination">{links}</div></body></html>"#)
    }

    #[test]
    fn test_max_numeric_link_wins() {
        let html = pagination_html(&["1", "2", "10", "abc"]);
        assert_eq!(parse_total_pages(&parse_document(&html)).unwrap(), 10);
    }

    #[test]
    fn test_no_pagination_is_one_page() {
        let html = "<html><body><p>nothing here</p></body></html>";
        assert_eq!(parse_total_pages(&parse_document(html)).unwrap(), 1);
    }

    #[test]
    fn test_only_non_numeric_links() {
        let html = pagination_html(&["next", "last"]);
        assert_eq!(parse_total_pages(&parse_document(&html)).unwrap(), 1);
    }

    #[test]
    fn test_links_outside_pagination_are_ignored() {
        let html = r#"<html><body>
            <a class="endless_page_link">99</a>
            <div class="pagination"><a class="endless_page_link"> 3 </a><span>4</span></div>
        </body></html>"#;
        assert_eq!(parse_total_pages(&parse_document(html)).unwrap(), 3);
    }
}
