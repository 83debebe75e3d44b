//! Firecrawl web search provider implementation

use async_trait::async_trait;
use serde_json::json;

use crate::domain::answer::WebEvidence;
use crate::domain::web_search::WebSearchProvider;
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev";

/// Fallback key chains for normalizing heterogeneous result records.
/// The first present, non-empty string wins; a record without a usable
/// URL is dropped.
const URL_KEYS: &[&str] = &["url", "link"];
const TITLE_KEYS: &[&str] = &["title", "name"];
const SNIPPET_KEYS: &[&str] = &["snippet", "description", "content"];

/// Firecrawl search provider.
///
/// Tries the JSON POST form of `/v1/search` first and falls back to the
/// GET form when the POST fails or returns nothing. Without an API key
/// every search resolves to an empty result list.
#[derive(Debug)]
pub struct FirecrawlProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
    auth_header: Option<String>,
}

impl<C: HttpClientTrait> FirecrawlProvider<C> {
    pub fn new(client: C, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_header: api_key
                .filter(|k| !k.is_empty())
                .map(|k| format!("Bearer {}", k)),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn search_url(&self) -> String {
        format!("{}/v1/search", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];
        if let Some(ref auth) = self.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }
        headers
    }

    /// Pull the result list out of whichever shape the API used.
    fn extract_results(value: &serde_json::Value) -> Vec<serde_json::Value> {
        if let Some(items) = value.get("data").and_then(|v| v.as_array()) {
            return items.clone();
        }
        if let Some(items) = value.get("results").and_then(|v| v.as_array()) {
            return items.clone();
        }
        if let Some(items) = value.as_array() {
            return items.clone();
        }
        Vec::new()
    }

    fn first_string(item: &serde_json::Value, keys: &[&str]) -> String {
        for key in keys {
            if let Some(s) = item.get(*key).and_then(|v| v.as_str()) {
                if !s.is_empty() {
                    return s.to_string();
                }
            }
        }
        String::new()
    }

    fn normalize(item: &serde_json::Value) -> Option<WebEvidence> {
        let url = Self::first_string(item, URL_KEYS);
        if url.is_empty() {
            return None;
        }

        Some(WebEvidence {
            url,
            title: Self::first_string(item, TITLE_KEYS),
            snippet: Self::first_string(item, SNIPPET_KEYS),
        })
    }

    fn normalize_all(value: &serde_json::Value, limit: u32) -> Vec<WebEvidence> {
        Self::extract_results(value)
            .iter()
            .filter_map(Self::normalize)
            .take(limit as usize)
            .collect()
    }
}

#[async_trait]
impl<C: HttpClientTrait> WebSearchProvider for FirecrawlProvider<C> {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<WebEvidence>, DomainError> {
        if self.auth_header.is_none() {
            tracing::debug!("No web search credential configured, skipping search");
            return Ok(Vec::new());
        }

        let url = self.search_url();
        let body = json!({"query": query, "limit": limit});

        let post_err = match self.client.post_json(&url, self.headers(), &body).await {
            Ok(value) => {
                let results = Self::normalize_all(&value, limit);
                if !results.is_empty() {
                    return Ok(results);
                }
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Web search POST failed, trying GET form");
                Some(e)
            }
        };

        let limit_param = limit.to_string();
        match self
            .client
            .get_json(
                &url,
                self.headers(),
                vec![("query", query), ("limit", &limit_param)],
            )
            .await
        {
            Ok(value) => Ok(Self::normalize_all(&value, limit)),
            Err(get_err) => Err(post_err.unwrap_or(get_err)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "firecrawl"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://api.firecrawl.dev/v1/search";

    fn provider_with(client: MockHttpClient) -> FirecrawlProvider<MockHttpClient> {
        FirecrawlProvider::new(client, Some("test-key".to_string()))
    }

    #[tokio::test]
    async fn test_search_normalizes_data_wrapper() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            json!({"data": [
                {"url": "https://a.example", "title": "A", "snippet": "first"},
                {"link": "https://b.example", "name": "B", "description": "second"},
            ]}),
        );

        let results = provider_with(client).search("gdpr", 3).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://a.example");
        assert_eq!(results[1].url, "https://b.example");
        assert_eq!(results[1].title, "B");
        assert_eq!(results[1].snippet, "second");
    }

    #[tokio::test]
    async fn test_search_accepts_results_wrapper_and_bare_array() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            json!({"results": [{"url": "https://r.example", "content": "body"}]}),
        );
        let results = provider_with(client).search("q", 3).await.unwrap();
        assert_eq!(results[0].snippet, "body");

        let client = MockHttpClient::new()
            .with_response(TEST_URL, json!([{"url": "https://bare.example"}]));
        let results = provider_with(client).search("q", 3).await.unwrap();
        assert_eq!(results[0].url, "https://bare.example");
        assert_eq!(results[0].title, "");
    }

    #[tokio::test]
    async fn test_search_drops_records_without_url() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            json!({"data": [
                {"title": "no url"},
                {"url": "", "title": "empty url"},
                {"url": "https://kept.example"},
            ]}),
        );

        let results = provider_with(client).search("q", 5).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://kept.example");
    }

    #[tokio::test]
    async fn test_search_without_credential_is_empty() {
        let provider = FirecrawlProvider::new(MockHttpClient::new(), None);
        assert!(provider.search("q", 3).await.unwrap().is_empty());

        let provider = FirecrawlProvider::new(MockHttpClient::new(), Some(String::new()));
        assert!(provider.search("q", 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_falls_back_to_get_when_post_fails() {
        let client = MockHttpClient::new()
            .with_error(TEST_URL, "POST not supported")
            .with_get_response(TEST_URL, json!({"data": [{"url": "https://get.example"}]}));

        let results = provider_with(client).search("q", 3).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://get.example");
    }

    #[tokio::test]
    async fn test_search_falls_back_to_get_when_post_is_empty() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, json!({"data": []}))
            .with_get_response(TEST_URL, json!({"data": [{"url": "https://get.example"}]}));

        let results = provider_with(client).search("q", 3).await.unwrap();

        assert_eq!(results[0].url, "https://get.example");
    }

    #[tokio::test]
    async fn test_search_both_forms_failing_is_an_error() {
        let client = MockHttpClient::new()
            .with_error(TEST_URL, "post down")
            .with_get_error(TEST_URL, "get down");

        let err = provider_with(client).search("q", 3).await.unwrap_err();

        assert!(err.to_string().contains("post down"));
    }

    #[tokio::test]
    async fn test_search_truncates_to_limit() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            json!({"data": [
                {"url": "https://1.example"},
                {"url": "https://2.example"},
                {"url": "https://3.example"},
            ]}),
        );

        let results = provider_with(client).search("q", 2).await.unwrap();

        assert_eq!(results.len(), 2);
    }
}
