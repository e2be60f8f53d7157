//! Page retrieval and tag/class lookup over fetched markup.
//!
//! The pipeline only talks to [`PageFetcher`] and [`Page`], so the HTTP client
//! and the HTML backend can be swapped (tests use an in-memory fetcher).
//!
//! # Failure model
//!
//! - Connection-level failures (timeout, DNS, refused) are [`CrawlError::Network`].
//! - A non-2xx response is not an error: it yields an empty [`Page`] that
//!   matches no elements.
//! - A tag name the HTML backend cannot turn into a selector is a
//!   [`CrawlError::Parse`].

use crate::error::CrawlError;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Something that can turn a URL into a [`Page`].
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, CrawlError>;
}

/// Fetches pages over HTTP with a shared, pre-configured client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests carry `user_agent` and give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend or client cannot be initialized.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Page, CrawlError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CrawlError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Non-success status; treating page as empty");
            return Ok(Page::empty(url));
        }

        let markup = response
            .text()
            .await
            .map_err(|e| CrawlError::network(url, e))?;
        debug!(%url, bytes = markup.len(), "Fetched page");
        Ok(Page::new(url, markup))
    }
}

/// Raw markup of one fetched page.
#[derive(Debug, Clone)]
pub struct Page {
    url: String,
    markup: String,
}

impl Page {
    pub fn new(url: &str, markup: impl Into<String>) -> Self {
        Page {
            url: url.to_string(),
            markup: markup.into(),
        }
    }

    pub fn empty(url: &str) -> Self {
        Page::new(url, String::new())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// All `tag` elements carrying `class` among their classes, in document order.
    pub fn find_all(&self, tag: &str, class: &str) -> Result<Vec<Element>, CrawlError> {
        if self.markup.is_empty() {
            return Ok(Vec::new());
        }

        let selector = Selector::parse(tag)
            .map_err(|e| CrawlError::Parse(format!("invalid tag `{tag}`: {e}")))?;
        let document = Html::parse_document(&self.markup);

        let elements = document
            .select(&selector)
            .filter(|el| el.value().classes().any(|c| c == class))
            .map(|el| Element {
                attrs: el
                    .value()
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
                text: el.text().collect::<String>(),
            })
            .collect();
        Ok(elements)
    }
}

/// A matched element, detached from the parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    attrs: Vec<(String, String)>,
    text: String,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Text content of the element and all its descendants.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// In-memory fetcher for tests: known URLs return their markup, anything
/// else fails like an unreachable host.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl StaticFetcher {
    pub fn with_page(mut self, url: &str, markup: &str) -> Self {
        self.pages.insert(url.to_string(), markup.to_string());
        self
    }
}

#[cfg(test)]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, CrawlError> {
        self.pages
            .get(url)
            .map(|markup| Page::new(url, markup.as_str()))
            .ok_or_else(|| CrawlError::network(url, "connection refused"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HOMEPAGE: &str = r#"
        <html><body>
          <a class="card featured" href="/one">One</a>
          <div class="card">not an anchor</div>
          <a class="cardigan" href="/nope">Nope</a>
          <a class="promo card" href="/two">Two <b>bold</b></a>
        </body></html>
    "#;

    #[test]
    fn test_find_all_matches_class_tokens_in_order() {
        let page = Page::new("https://example.com", HOMEPAGE);
        let found = page.find_all("a", "card").unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].attr("href"), Some("/one"));
        assert_eq!(found[1].attr("href"), Some("/two"));
        assert_eq!(found[1].text().split_whitespace().collect::<Vec<_>>(), vec!["Two", "bold"]);
    }

    #[test]
    fn test_find_all_on_empty_page() {
        let page = Page::empty("https://example.com");
        assert!(page.find_all("a", "card").unwrap().is_empty());
    }

    #[test]
    fn test_find_all_rejects_bad_tag() {
        let page = Page::new("https://example.com", HOMEPAGE);
        let err = page.find_all("a[", "card").unwrap_err();
        assert!(!err.is_network());
    }

    #[test]
    fn test_element_missing_attr() {
        let page = Page::new("https://example.com", r#"<a class="card">x</a>"#);
        let found = page.find_all("a", "card").unwrap();
        assert_eq!(found[0].attr("href"), None);
    }

    #[tokio::test]
    async fn test_http_fetcher_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(HOMEPAGE))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new("test-agent/1.0", Duration::from_secs(5)).unwrap();
        let page = fetcher.fetch(&format!("{}/", server.uri())).await.unwrap();

        assert_eq!(page.find_all("a", "card").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_http_fetcher_non_success_is_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string(HOMEPAGE))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new("test-agent/1.0", Duration::from_secs(5)).unwrap();
        let page = fetcher
            .fetch(&format!("{}/missing", server.uri()))
            .await
            .unwrap();

        assert!(page.find_all("a", "card").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_http_fetcher_unreachable_host_is_network_error() {
        let fetcher = HttpFetcher::new("test-agent/1.0", Duration::from_secs(2)).unwrap();
        let err = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();
        assert!(err.is_network());
    }
}
