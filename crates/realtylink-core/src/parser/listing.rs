//! Listing detail page parser for realtylink.org
//!
//! Extracts the structured fields of one listing from its detail page.
//! Price, address and title are required structure; area, room counts and
//! description degrade to `None` when their markup is missing.

use scraper::{Html, Selector};

use crate::error::{RealtylinkError, Result};
use crate::types::Listing;

/// Characteristic labels that carry the listing area
const AREA_LABELS: [&str; 2] = ["Floor Area", "Lot Size"];

/// Parse one listing detail page into a `Listing`.
///
/// # Arguments
/// * `url` - Absolute URL the page was fetched from
/// * `html` - Raw HTML of the detail page
///
/// # Returns
/// * `Ok(Listing)` with every field the page states
/// * `Err(RealtylinkError::ElementNotFound)` if the price, address or
///   title markup is missing
pub fn parse_listing(url: &str, html: &str) -> Result<Listing> {
    let document = Html::parse_document(html);

    let price = required_text(&document, "span#BuyPrice")?;

    let address_block = required_text(&document, r#"h2[itemprop="address"]"#)?;
    let (address, region) = split_address(&address_block);

    let title = required_text(&document, r#"span[data-id="PageTitle"]"#)?;
    let description = optional_text(&document, r#"div[itemprop="description"]"#);

    let image_urls = extract_image_urls(&document)?;
    let area = extract_area(&document);
    let rooms_counts = extract_rooms_counts(&document);

    Ok(Listing {
        url: url.to_string(),
        price,
        description,
        address,
        region,
        title,
        rooms_counts,
        area,
        image_urls,
    })
}

/// Trimmed text of the first element matching `selector`.
///
/// # Errors
/// `RealtylinkError::ElementNotFound` when nothing matches.
fn required_text(document: &Html, selector: &str) -> Result<String> {
    let parsed = Selector::parse(selector)
        .map_err(|e| RealtylinkError::Parse(format!("Invalid selector: {:?}", e)))?;

    let element = document
        .select(&parsed)
        .next()
        .ok_or_else(|| RealtylinkError::ElementNotFound(selector.to_string()))?;

    Ok(element.text().collect::<String>().trim().to_string())
}

/// Trimmed text of the first element matching `selector`, None when absent.
fn optional_text(document: &Html, selector: &str) -> Option<String> {
    let parsed = Selector::parse(selector).ok()?;
    let element = document.select(&parsed).next()?;
    Some(element.text().collect::<String>().trim().to_string())
}

/// Split the address block into street address and region.
///
/// The first comma-separated segment is the street address; the remaining
/// segments, rejoined, form the region.
fn split_address(block: &str) -> (String, String) {
    match block.split_once(", ") {
        Some((address, region)) => (address.to_string(), region.to_string()),
        None => (block.to_string(), String::new()),
    }
}

/// Collect the source of every image on the page, in document order.
fn extract_image_urls(document: &Html) -> Result<Vec<String>> {
    let selector = Selector::parse("img")
        .map_err(|e| RealtylinkError::Parse(format!("Invalid selector: {:?}", e)))?;

    Ok(document
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .map(|src| src.to_string())
        .collect())
}

/// Area from the characteristics list.
///
/// Scans `div.carac-container` blocks for a Floor Area or Lot Size label
/// and reads the first span of the matching block. Missing structure
/// anywhere in the scan yields `None`.
fn extract_area(document: &Html) -> Option<String> {
    let container_selector = Selector::parse("div.carac-container").ok()?;
    let title_selector = Selector::parse("div.carac-title").ok()?;
    let value_selector = Selector::parse("span").ok()?;

    for container in document.select(&container_selector) {
        let label = container
            .select(&title_selector)
            .next()?
            .text()
            .collect::<String>();

        if AREA_LABELS.contains(&label.trim()) {
            let value = container.select(&value_selector).next()?;
            return Some(value.text().collect::<String>().trim().to_string());
        }
    }

    None
}

/// Bedrooms plus bathrooms, read from the cac and sdb badges.
///
/// Returns `None` when either badge or its leading integer is missing.
fn extract_rooms_counts(document: &Html) -> Option<u32> {
    let bedrooms = first_integer(&optional_text(document, "div.cac")?)?;
    let bathrooms = first_integer(&optional_text(document, "div.sdb")?)?;
    Some(bedrooms + bathrooms)
}

/// First integer substring of `text`.
fn first_integer(text: &str) -> Option<u32> {
    let re = regex_lite::Regex::new(r"\d+").ok()?;
    re.find(text)?.as_str().parse().ok()
}
