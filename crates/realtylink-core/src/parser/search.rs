//! Search results parser for realtylink.org
//!
//! The pagination API answers JSON with an HTML fragment of listing cards
//! nested under `d.Result.html`. This module digs out the fragment and
//! walks it for listing detail links.

use scraper::{Html, Selector};

use crate::error::{RealtylinkError, Result};

/// CSS class marking decorative price-summary blocks between listing cards
const PRICE_BLOCK_CLASS: &str = "price";

/// Pull the listing-card HTML fragment out of a pagination response.
///
/// # Arguments
/// * `body` - Raw JSON body of one pagination POST
///
/// # Returns
/// * `Ok(String)` with the embedded HTML fragment
/// * `Err(RealtylinkError::Decode)` if the body is not the expected envelope
pub fn parse_page_fragment(body: &str) -> Result<String> {
    let envelope: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| RealtylinkError::Decode(format!("invalid JSON envelope: {}", e)))?;

    envelope
        .get("d")
        .and_then(|d| d.get("Result"))
        .and_then(|result| result.get("html"))
        .and_then(|html| html.as_str())
        .map(|html| html.to_string())
        .ok_or_else(|| RealtylinkError::Decode("missing d.Result.html field".to_string()))
}

/// Extract absolute listing URLs from one results fragment.
///
/// Walks `div[itemscope]` containers in document order and prefixes each
/// detail link with `host`. Price-summary blocks and containers without a
/// detail link are skipped.
///
/// # Arguments
/// * `fragment` - HTML fragment of listing cards
/// * `host` - Site host prefixed to relative hrefs
///
/// # Returns
/// * `Ok(Vec<String>)` with absolute URLs in document order
/// * `Err(RealtylinkError)` if parsing fails
pub fn extract_listing_links(fragment: &str, host: &str) -> Result<Vec<String>> {
    let document = Html::parse_fragment(fragment);

    let container_selector = Selector::parse("div[itemscope]")
        .map_err(|e| RealtylinkError::Parse(format!("Invalid selector: {:?}", e)))?;

    let mut links = Vec::new();
    for element in document.select(&container_selector) {
        if let Some(href) = parse_listing_link(&element) {
            links.push(format!("{}{}", host, href));
        }
    }

    Ok(links)
}

/// Pull the detail-page href from a single listing container.
fn parse_listing_link(element: &scraper::ElementRef) -> Option<String> {
    // Price summary blocks carry the itemscope attribute but hold no link
    if element.value().classes().any(|c| c == PRICE_BLOCK_CLASS) {
        return None;
    }

    let link_selector = Selector::parse("a.a-more-detail").ok()?;
    let link = element.select(&link_selector).next()?;

    let href = link.value().attr("href")?;
    if href.is_empty() {
        return None;
    }

    Some(href.to_string())
}
