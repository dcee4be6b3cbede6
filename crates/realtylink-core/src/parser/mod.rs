//! HTML parsers for realtylink.org content
//!
//! This module contains parsers for the two crawling stages:
//! - `search`: Dig the listing-card fragment out of the paginated API
//!   response and collect detail-page links
//! - `listing`: Extract the structured fields of one listing detail page

pub mod listing;
pub mod search;

// Re-export main parsing functions
pub use listing::parse_listing;
pub use search::{extract_listing_links, parse_page_fragment};
