pub(crate) mod detail;
pub(crate) mod fetch;
pub(crate) mod listing;
pub(crate) mod pagination;
pub(crate) mod theme;

pub(crate) use ::scraper::Html;
use ::scraper::node::Node;
use ::scraper::{ElementRef, Selector};
use itertools::Itertools;

/// Parse a response body as an HTML document.
pub(crate) fn parse_document(body: &str) -> Html {
    Html::parse_document(body)
}

/// All text inside `element`, trimmed.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first element matching `selector` inside `element`.
/// `None` if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(|e| element_text(&e))
}

/// Text of the direct text children of `element`. An element whose only
/// child is another element yields that child's text; any other mix of
/// element children yields `None`.
pub(crate) fn own_text(element: &ElementRef) -> Option<String> {
    let children = element
        .children()
        .filter(|child| matches!(child.value(), Node::Text(_) | Node::Element(_)))
        .collect_vec();
    if let [only] = children.as_slice() {
        if let Some(child) = ElementRef::wrap(*only) {
            return own_text(&child);
        }
    }

    let mut text = String::new();
    for child in children {
        match child.value() {
            Node::Text(t) => text.push_str(t),
            _ => return None,
        }
    }
    Some(text)
}

/// First element after `anchor` in document order that matches `selector`.
pub(crate) fn find_next<'a>(
    document: &'a Html,
    anchor: &ElementRef<'a>,
    selector: &Selector,
) -> Option<ElementRef<'a>> {
    let anchor_id = anchor.id();
    document
        .root_element()
        .descendants()
        .skip_while(|node| node.id() != anchor_id)
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| selector.matches(element))
}

/// Resolve a site relative link against `base_url`.
pub(crate) fn absolute_url(base_url: &str, link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else if link.starts_with("//") {
        format!("https:{link}")
    } else {
        format!("{}{link}", base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url() {
        let base = "https://allhackathons.com";
        assert_eq!(
            absolute_url(base, "/hackathon/x/"),
            "https://allhackathons.com/hackathon/x/"
        );
        assert_eq!(
            absolute_url(base, "//cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(
            absolute_url(base, "https://other.org/a"),
            "https://other.org/a"
        );
    }

    #[test]
    fn test_find_next_follows_document_order() {
        let html = parse_document(
            r#"<div><h5>Label</h5></div><div class="x">skip</div><section><div class="y">hit</div></section>"#,
        );
        let heading_selector = Selector::parse("h5").unwrap();
        let heading = html.select(&heading_selector).next().unwrap();
        let target = Selector::parse("div.y").unwrap();
        let found = find_next(&html, &heading, &target).unwrap();
        assert_eq!(element_text(&found), "hit");

        let before = Selector::parse("div:not(.x):not(.y)").unwrap();
        assert!(find_next(&html, &heading, &before).is_none());
    }

    #[test]
    fn test_own_text() {
        let html = parse_document(
            r#"<div id="a"> Open </div><div id="b">Open <span>x</span></div><div id="c"><span><b>Ended</b></span></div>"#,
        );
        let by_id = |id: &str| {
            html.select(&Selector::parse(id).unwrap())
                .next()
                .unwrap()
        };
        assert_eq!(own_text(&by_id("#a")).as_deref(), Some(" Open "));
        assert_eq!(own_text(&by_id("#b")), None);
        assert_eq!(own_text(&by_id("#c")).as_deref(), Some("Ended"));
    }
}
