//! HTTP client for the Kakao image search API.

use super::models::{ErrorBody, SearchPage, SearchResponse};
use crate::domain::error::{Result, SearchImagesError};
use crate::Config;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::Instrument;

/// Highest page number the API serves.
pub const MAX_PAGE: u32 = 50;

/// Highest number of documents per page the API serves.
pub const MAX_PAGE_SIZE: u32 = 80;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com";

const SEARCH_PATH: &str = "/v2/search/image";

/// Authenticated image search client.
#[derive(Debug, Clone)]
pub struct ImageSearchClient {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl ImageSearchClient {
    /// Creates a client authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the key is empty or not a valid header value,
    /// and an `Http` error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, api_key: &str, page_size: u32) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(SearchImagesError::Config("API key is empty".to_string()));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(SearchImagesError::Config(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("KakaoAK {}", api_key.trim()))
                .map_err(|e| SearchImagesError::Config(format!("invalid API key: {e}")))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            page_size,
        })
    }

    /// Creates a client from the crate configuration.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            SearchImagesError::Config(
                "no API key configured (set KAKAO_API_KEY or api_key in config.toml)".to_string(),
            )
        })?;
        Self::new(config.api_base_url.clone(), api_key, config.page_size)
    }

    /// Returns the endpoint URL used for searches.
    #[must_use]
    pub fn search_url(&self) -> String {
        format!("{}{SEARCH_PATH}", self.base_url)
    }

    /// Fetches one page of images matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an `Api` error if the query is blank, the page is outside
    /// `1..=MAX_PAGE`, or the server answers with a non-success status, and an
    /// `Http` error if the request or body decoding fails.
    pub async fn search_images(&self, query: &str, page: u32) -> Result<SearchPage> {
        let query = query.trim();
        validate_request(query, page)?;

        let span = tracing::debug_span!("search_images", query = %query, page);
        self.fetch_page(query, page).instrument(span).await
    }

    async fn fetch_page(&self, query: &str, page: u32) -> Result<SearchPage> {
        let url = self.search_url();
        let page_param = page.to_string();
        let size_param = self.page_size.to_string();

        tracing::debug!(url = %url, "requesting image search");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("query", query),
                ("page", page_param.as_str()),
                ("size", size_param.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .filter(|e| !e.message.is_empty())
                .map_or(body, |e| format!("{}: {}", e.error_type, e.message));
            tracing::warn!(status = %status, detail = %detail, "image search failed");
            return Err(SearchImagesError::Api(format!("{status}: {detail}")));
        }

        let body: SearchResponse = response.json().await?;
        let page = SearchPage::from_response(query, page, body);

        tracing::debug!(
            count = page.images.len(),
            total = page.meta.total_count,
            is_end = page.meta.is_end,
            "image search completed"
        );
        Ok(page)
    }
}

/// Checks a search request before it is sent.
fn validate_request(query: &str, page: u32) -> Result<()> {
    if query.is_empty() {
        return Err(SearchImagesError::Api("query must not be empty".to_string()));
    }
    if page == 0 || page > MAX_PAGE {
        return Err(SearchImagesError::Api(format!(
            "page must be between 1 and {MAX_PAGE}, got {page}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_query() {
        assert!(matches!(
            validate_request("", 1),
            Err(SearchImagesError::Api(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_pages() {
        assert!(validate_request("cat", 0).is_err());
        assert!(validate_request("cat", MAX_PAGE + 1).is_err());
        assert!(validate_request("cat", MAX_PAGE).is_ok());
    }

    #[test]
    fn rejects_empty_api_key() {
        let err = ImageSearchClient::new(DEFAULT_BASE_URL, "  ", 30).unwrap_err();
        assert!(matches!(err, SearchImagesError::Config(_)));
    }

    #[test]
    fn rejects_oversized_pages() {
        let err = ImageSearchClient::new(DEFAULT_BASE_URL, "key", MAX_PAGE_SIZE + 1).unwrap_err();
        assert!(matches!(err, SearchImagesError::Config(_)));
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = ImageSearchClient::new("https://example.com/", "key", 30).unwrap();
        assert_eq!(client.search_url(), "https://example.com/v2/search/image");
    }

    #[test]
    fn missing_api_key_in_config_is_a_config_error() {
        let config = Config {
            api_key: None,
            ..Config::default()
        };
        let err = ImageSearchClient::from_config(&config).unwrap_err();
        assert!(matches!(err, SearchImagesError::Config(_)));
    }

    #[tokio::test]
    async fn blank_query_fails_without_a_request() {
        let client = ImageSearchClient::new("http://127.0.0.1:9", "key", 30).unwrap();
        let err = client.search_images("   ", 1).await.unwrap_err();
        assert!(matches!(err, SearchImagesError::Api(_)));
    }
}
