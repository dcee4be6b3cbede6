//! Main RealtyLink scraper API
//!
//! This module provides the high-level API for crawling realtylink.org
//! rental listings. It combines the HTTP client with the parsers into a
//! two-stage pipeline: discover listing URLs through the paginated search
//! API, then fetch every detail page and extract its fields in parallel.

use futures::future::try_join_all;
use futures::stream::{self, StreamExt};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::client::{ClientConfig, DEFAULT_HOST, RealtylinkClient};
use crate::error::{RealtylinkError, Result};
use crate::parser::{extract_listing_links, parse_listing, parse_page_fragment};
use crate::types::{Listing, ListingDocument, ScrapeFailure, ScrapeReport};

/// Default pagination API endpoint
const DEFAULT_API_URL: &str = "https://realtylink.org/Property/GetInscriptions";

/// Configuration for the RealtyLink scraper
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Pagination API endpoint
    pub api_url: String,
    /// Site host prefixed to relative listing links
    pub host: String,
    /// Number of listing URLs to collect (default: 60)
    pub target_records: usize,
    /// Listings served per API page (default: 20)
    pub page_size: usize,
    /// Detail pages fetched concurrently (default: 8)
    pub fetch_concurrency: usize,
    /// Extraction workers (default: available CPU parallelism)
    pub extract_workers: usize,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        let extract_workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        Self {
            api_url: DEFAULT_API_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            target_records: 60,
            page_size: 20,
            fetch_concurrency: 8,
            extract_workers,
            timeout_secs: 30,
        }
    }
}

/// Main scraper API for realtylink.org rental listings
///
/// Provides the full crawl pipeline and its individual stages. All
/// operations are asynchronous; extraction runs on blocking workers.
///
/// # Example
/// ```no_run
/// use realtylink_core::RealtylinkScraper;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = RealtylinkScraper::new()?;
///
///     let report = scraper.run().await?;
///     println!("Extracted {} listings", report.listings.len());
///
///     Ok(())
/// }
/// ```
pub struct RealtylinkScraper {
    client: RealtylinkClient,
    config: ScraperConfig,
}

impl RealtylinkScraper {
    /// Create a new scraper with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a new scraper with custom configuration.
    ///
    /// # Arguments
    /// * `config` - Scraper configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(config: ScraperConfig) -> Result<Self> {
        let client = RealtylinkClient::with_config(ClientConfig {
            host: config.host.clone(),
            timeout_secs: config.timeout_secs,
        })?;

        Ok(Self { client, config })
    }

    /// Create a scraper with a pre-built client.
    ///
    /// This is useful for testing or when you need custom client
    /// configuration.
    ///
    /// # Arguments
    /// * `client` - Pre-configured RealtylinkClient instance
    /// * `config` - Scraper configuration
    pub fn with_client(client: RealtylinkClient, config: ScraperConfig) -> Self {
        Self { client, config }
    }

    /// Collect listing detail URLs from the paginated search API.
    ///
    /// Issues one POST per page concurrently, then walks the returned
    /// pages in request order and stops accumulating the instant
    /// `target_records` URLs are collected. If the source holds fewer
    /// listings, the result is shorter than the target.
    ///
    /// # Returns
    /// Absolute listing URLs in page order, then document order within a
    /// page
    ///
    /// # Errors
    /// * `RealtylinkError::Http` if any pagination request fails
    /// * `RealtylinkError::Decode` if a response is not the expected
    ///   envelope
    ///
    /// # Example
    /// ```no_run
    /// use realtylink_core::RealtylinkScraper;
    ///
    /// # async fn example() -> Result<(), realtylink_core::RealtylinkError> {
    /// let scraper = RealtylinkScraper::new()?;
    /// let urls = scraper.discover_urls().await?;
    /// println!("Found {} listings", urls.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn discover_urls(&self) -> Result<Vec<String>> {
        let pages = page_count(self.config.target_records, self.config.page_size);
        info!(
            pages,
            target = self.config.target_records,
            "Discovering listing URLs"
        );

        let requests = (0..pages).map(|page| {
            let payload = json!({ "startPosition": page });
            async move { self.client.post_json(&self.config.api_url, &payload).await }
        });
        let bodies = try_join_all(requests).await?;

        let mut urls = Vec::with_capacity(self.config.target_records);
        for body in &bodies {
            let fragment = parse_page_fragment(body)?;
            for link in extract_listing_links(&fragment, &self.config.host)? {
                if urls.len() == self.config.target_records {
                    break;
                }
                urls.push(link);
            }
        }

        info!(count = urls.len(), "Collected listing URLs");
        Ok(urls)
    }

    /// Fetch every listing page, bounded by `fetch_concurrency`.
    ///
    /// Requests run concurrently but results come back in input order.
    /// A failed fetch does not abort the batch; the affected URL carries
    /// its error instead of a body.
    pub async fn fetch_documents(&self, urls: Vec<String>) -> Vec<(String, Result<String>)> {
        info!(count = urls.len(), "Fetching listing pages");

        stream::iter(urls)
            .map(|url| async move {
                let body = self.client.get(&url).await;
                match &body {
                    Ok(_) => debug!(url = %url, "Fetched listing page"),
                    Err(e) => warn!(url = %url, error = %e, "Failed to fetch listing page"),
                }
                (url, body)
            })
            .buffered(self.config.fetch_concurrency.max(1))
            .collect()
            .await
    }

    /// Extract listing fields from fetched documents in parallel.
    ///
    /// Documents are parsed on blocking workers, at most `extract_workers`
    /// at a time; results keep the input order. An extraction failure is
    /// confined to its document.
    pub async fn extract_listings(
        &self,
        documents: Vec<ListingDocument>,
    ) -> Vec<(String, Result<Listing>)> {
        info!(
            count = documents.len(),
            workers = self.config.extract_workers,
            "Extracting listing fields"
        );

        stream::iter(documents)
            .map(|doc| async move {
                let url = doc.url.clone();
                let handle =
                    tokio::task::spawn_blocking(move || parse_listing(&doc.url, &doc.html));

                let result = match handle.await {
                    Ok(parsed) => parsed,
                    Err(e) => Err(RealtylinkError::Worker(e.to_string())),
                };
                match &result {
                    Ok(_) => debug!(url = %url, "Extracted listing"),
                    Err(e) => warn!(url = %url, error = %e, "Failed to extract listing"),
                }
                (url, result)
            })
            .buffered(self.config.extract_workers.max(1))
            .collect()
            .await
    }

    /// Run the full pipeline: discover, fetch, extract.
    ///
    /// Fetch and extraction failures never abort the run; they end up as
    /// per-listing entries in the report while every surviving record is
    /// returned, in discovery order.
    ///
    /// # Errors
    /// Fails only when URL discovery fails.
    pub async fn run(&self) -> Result<ScrapeReport> {
        let urls = self.discover_urls().await?;
        let fetched = self.fetch_documents(urls).await;

        let mut documents = Vec::with_capacity(fetched.len());
        let mut failures = Vec::new();
        for (url, body) in fetched {
            match body {
                Ok(html) => documents.push(ListingDocument::new(url, html)),
                Err(e) => failures.push(ScrapeFailure {
                    url,
                    reason: e.to_string(),
                }),
            }
        }

        let mut listings = Vec::with_capacity(documents.len());
        for (url, result) in self.extract_listings(documents).await {
            match result {
                Ok(listing) => listings.push(listing),
                Err(e) => failures.push(ScrapeFailure {
                    url,
                    reason: e.to_string(),
                }),
            }
        }

        info!(
            listings = listings.len(),
            failures = failures.len(),
            "Scrape complete"
        );
        Ok(ScrapeReport::new(listings, failures))
    }
}

/// Number of pagination requests needed to cover `target` records.
fn page_count(target: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    target.div_ceil(page_size)
}
