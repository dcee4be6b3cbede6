//! Data types for the RealtyLink scraper
//!
//! This module contains all the core data structures used throughout the library.
//! All types implement Serialize and Deserialize for JSON output. Optional
//! listing fields serialize as explicit `null`, so every record carries the
//! full key set.

use serde::{Deserialize, Serialize};

/// One extracted rental listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Absolute URL of the listing detail page
    pub url: String,
    /// Displayed price text (e.g., "$1,300 /month")
    pub price: String,
    /// Free-form description, None when the listing has none
    pub description: Option<String>,
    /// Street address (first segment of the address block)
    pub address: String,
    /// Remaining address segments (city, district, province)
    pub region: String,
    /// Listing headline
    pub title: String,
    /// Bedrooms plus bathrooms, None when either count is missing
    pub rooms_counts: Option<u32>,
    /// Floor area or lot size, None when the listing states neither
    pub area: Option<String>,
    /// Source of every image on the page, in document order
    pub image_urls: Vec<String>,
}

/// A fetched detail page waiting for extraction
#[derive(Debug, Clone)]
pub struct ListingDocument {
    /// Absolute URL the page was fetched from
    pub url: String,
    /// Raw HTML body of the page
    pub html: String,
}

impl ListingDocument {
    /// Create a new document from a fetched page body
    pub fn new(url: String, html: String) -> Self {
        Self { url, html }
    }
}

/// One listing that could not be fetched or extracted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeFailure {
    /// Listing URL the failure belongs to
    pub url: String,
    /// Human-readable failure reason
    pub reason: String,
}

/// Outcome of one pipeline run
///
/// Extracted records and per-listing failures are reported side by side,
/// so a partially successful run still yields every record that survived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeReport {
    /// Successfully extracted listings, in discovery order
    pub listings: Vec<Listing>,
    /// Listings that failed to fetch or extract
    pub failures: Vec<ScrapeFailure>,
}

impl ScrapeReport {
    /// Create a new report
    pub fn new(listings: Vec<Listing>, failures: Vec<ScrapeFailure>) -> Self {
        Self { listings, failures }
    }

    /// Create an empty report
    pub fn empty() -> Self {
        Self {
            listings: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Number of listings that entered the pipeline
    pub fn total(&self) -> usize {
        self.listings.len() + self.failures.len()
    }
}
