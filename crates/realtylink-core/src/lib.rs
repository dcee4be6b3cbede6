//! RealtyLink Scraper Core Library
//!
//! This crate provides the crawling pipeline for realtylink.org rental
//! listings: discover listing URLs through the paginated search API,
//! fetch every detail page, and extract structured records in parallel.
//!
//! # Features
//! - Concurrent URL discovery with an exact record target
//! - Bounded-concurrency fetching of listing pages
//! - CPU-parallel field extraction on blocking workers
//! - Per-listing failure isolation with an explicit scrape report
//! - Rotating browser identity headers on every request

pub mod client;
pub mod error;
pub mod parser;
pub mod scraper;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, RealtylinkClient};
pub use error::{RealtylinkError, Result};
pub use scraper::{RealtylinkScraper, ScraperConfig};
pub use types::{Listing, ListingDocument, ScrapeFailure, ScrapeReport};
