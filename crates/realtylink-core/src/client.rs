//! HTTP client for realtylink.org
//!
//! This module provides a thin client that mimics a browser session:
//! every request carries a fresh header set with a User-Agent drawn at
//! random from a fixed pool. There is no retry policy; a transport
//! failure or non-success status goes straight back to the caller.

use std::time::Duration;

use rand::Rng;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, CONTENT_TYPE, ORIGIN, REFERER,
    USER_AGENT,
};
use serde::Serialize;

use crate::error::{RealtylinkError, Result};

/// Default site host listings are served from
pub(crate) const DEFAULT_HOST: &str = "https://realtylink.org";

/// Accept header sent with every request
const DEFAULT_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";

/// Accept-Language header mimicking a browser session
const DEFAULT_ACCEPT_LANGUAGE: &str = "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7";

/// Content-Type sent with API POST bodies
const DEFAULT_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// User-Agent pool rotated across requests
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.212 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:88.0) Gecko/20100101 Firefox/88.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:88.0) Gecko/20100101 Firefox/88.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 14_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (iPad; CPU OS 14_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Linux; Android 10; SM-A505FN) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.212 Mobile Safari/537.36",
    "Mozilla/5.0 (Linux; Android 11; Pixel 5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.212 Mobile Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Edge/90.0.818.56",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.212 Safari/537.36",
];

/// Configuration for the RealtyLink HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site host used for the Origin and Referer headers
    pub host: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            timeout_secs: 30,
        }
    }
}

/// HTTP client for realtylink.org with rotating browser identity
///
/// This client automatically:
/// - Picks a random User-Agent from a fixed pool per request
/// - Sends the static browser headers the site expects
/// - Keeps cookies across requests like a browser session
pub struct RealtylinkClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Client configuration
    config: ClientConfig,
}

impl RealtylinkClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Arguments
    /// * `config` - Client configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch the body of a listing page.
    ///
    /// # Arguments
    /// * `url` - Absolute URL of the page
    ///
    /// # Returns
    /// The response body as a string
    ///
    /// # Errors
    /// `RealtylinkError::Http` on a transport failure or non-success status
    pub async fn get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .headers(self.request_headers()?)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    /// POST a JSON payload and return the response body.
    ///
    /// # Arguments
    /// * `url` - Absolute URL of the endpoint
    /// * `payload` - Serialized as the JSON request body
    ///
    /// # Errors
    /// `RealtylinkError::Http` on a transport failure or non-success status
    pub async fn post_json<T: Serialize + ?Sized>(&self, url: &str, payload: &T) -> Result<String> {
        let response = self
            .client
            .post(url)
            .headers(self.request_headers()?)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    /// Build the header set for one request.
    ///
    /// A fresh map every call; nothing is shared or mutated between
    /// requests.
    fn request_headers(&self) -> Result<HeaderMap> {
        let agent = USER_AGENTS[rand::rng().random_range(0..USER_AGENTS.len())];
        let referer = format!("{}/en/properties~for-rent?uc=0", self.config.host);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        headers.insert(USER_AGENT, HeaderValue::from_static(agent));
        headers.insert(
            ORIGIN,
            HeaderValue::from_str(&self.config.host)
                .map_err(|_| RealtylinkError::InvalidUrl(self.config.host.clone()))?,
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(&referer)
                .map_err(|_| RealtylinkError::InvalidUrl(referer.clone()))?,
        );

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "https://realtylink.org");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_client_creation() {
        let client = RealtylinkClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_custom_config() {
        let config = ClientConfig {
            host: "https://example.org".to_string(),
            timeout_secs: 60,
        };
        let client = RealtylinkClient::with_config(config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_request_headers_static_values() {
        let client = RealtylinkClient::new().unwrap();
        let headers = client.request_headers().unwrap();

        assert_eq!(
            headers.get(ACCEPT).unwrap(),
            "application/json, text/javascript, */*; q=0.01"
        );
        assert_eq!(
            headers.get(CONTENT_TYPE).unwrap(),
            "application/json; charset=UTF-8"
        );
        assert_eq!(headers.get(CONNECTION).unwrap(), "keep-alive");
        assert_eq!(headers.get(ORIGIN).unwrap(), "https://realtylink.org");
        assert_eq!(
            headers.get(REFERER).unwrap(),
            "https://realtylink.org/en/properties~for-rent?uc=0"
        );
    }

    #[test]
    fn test_request_headers_user_agent_from_pool() {
        let client = RealtylinkClient::new().unwrap();

        for _ in 0..20 {
            let headers = client.request_headers().unwrap();
            let agent = headers.get(USER_AGENT).unwrap().to_str().unwrap();
            assert!(USER_AGENTS.contains(&agent));
        }
    }

    #[test]
    fn test_request_headers_invalid_host() {
        let config = ClientConfig {
            host: "https://example.org\n".to_string(),
            timeout_secs: 30,
        };
        let client = RealtylinkClient::with_config(config).unwrap();
        let result = client.request_headers();

        assert!(matches!(result, Err(RealtylinkError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_get_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/en/properties/123"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>listing</html>"))
            .mount(&server)
            .await;

        let config = ClientConfig {
            host: server.uri(),
            timeout_secs: 5,
        };
        let client = RealtylinkClient::with_config(config).unwrap();
        let body = client
            .get(&format!("{}/en/properties/123", server.uri()))
            .await
            .unwrap();

        assert_eq!(body, "<html>listing</html>");
    }

    #[tokio::test]
    async fn test_get_sends_browser_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/en/properties/123"))
            .and(header(
                "Accept",
                "application/json, text/javascript, */*; q=0.01",
            ))
            .and(header("Accept-Language", "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig {
            host: server.uri(),
            timeout_secs: 5,
        };
        let client = RealtylinkClient::with_config(config).unwrap();
        let body = client
            .get(&format!("{}/en/properties/123", server.uri()))
            .await
            .unwrap();

        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_get_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/en/properties/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = RealtylinkClient::new().unwrap();
        let result = client
            .get(&format!("{}/en/properties/404", server.uri()))
            .await;

        assert!(matches!(result, Err(RealtylinkError::Http(_))));
    }

    #[tokio::test]
    async fn test_post_json_sends_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Property/GetInscriptions"))
            .and(wiremock::matchers::body_json(
                serde_json::json!({ "startPosition": 2 }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"d\":{}}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = RealtylinkClient::new().unwrap();
        let body = client
            .post_json(
                &format!("{}/Property/GetInscriptions", server.uri()),
                &serde_json::json!({ "startPosition": 2 }),
            )
            .await
            .unwrap();

        assert_eq!(body, "{\"d\":{}}");
    }
}
