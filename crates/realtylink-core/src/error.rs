//! Error types for the RealtyLink scraper
//!
//! This module defines all error types used throughout the library.
//! Transport and required-structure failures surface as errors; optional
//! listing fields never do, they degrade to `None` during extraction.

use thiserror::Error;

/// Error type for RealtyLink scraper operations
#[derive(Error, Debug)]
pub enum RealtylinkError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Pagination response was not the expected JSON envelope
    #[error("Unexpected API response: {0}")]
    Decode(String),

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    Parse(String),

    /// Required HTML element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid URL or header value built from configuration
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// An extraction worker was lost before returning a result
    #[error("Extraction worker failed: {0}")]
    Worker(String),
}

/// Result type alias for RealtyLink scraper operations
pub type Result<T> = std::result::Result<T, RealtylinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_decode() {
        let error = RealtylinkError::Decode("missing d.Result.html".to_string());
        assert_eq!(
            error.to_string(),
            "Unexpected API response: missing d.Result.html"
        );
    }

    #[test]
    fn test_error_display_parse() {
        let error = RealtylinkError::Parse("invalid selector".to_string());
        assert_eq!(error.to_string(), "Failed to parse HTML: invalid selector");
    }

    #[test]
    fn test_error_display_element_not_found() {
        let error = RealtylinkError::ElementNotFound("span#BuyPrice".to_string());
        assert_eq!(error.to_string(), "Element not found: span#BuyPrice");
    }

    #[test]
    fn test_error_display_invalid_url() {
        let error = RealtylinkError::InvalidUrl("not-a-url".to_string());
        assert_eq!(error.to_string(), "Invalid URL: not-a-url");
    }

    #[test]
    fn test_error_display_worker() {
        let error = RealtylinkError::Worker("task cancelled".to_string());
        assert_eq!(error.to_string(), "Extraction worker failed: task cancelled");
    }

    #[test]
    fn test_error_display_not_empty() {
        let error = RealtylinkError::Decode("truncated body".to_string());
        let display = error.to_string();
        assert!(!display.is_empty());
        assert!(display.contains("truncated body"));
    }
}
