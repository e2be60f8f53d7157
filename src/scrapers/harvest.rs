//! Article fetching and body tokenization.
//!
//! Every link is fetched independently. A link that cannot be fetched, cannot
//! be resolved against the site's base URL, or has an empty body is logged and
//! dropped; the rest of the batch carries on.

use crate::error::CrawlError;
use crate::fetcher::PageFetcher;
use crate::models::SiteConfig;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Tokenized body of one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestedArticle {
    /// The link path as it appeared on the homepage.
    pub link: String,
    /// Absolute URL the body was fetched from.
    pub source_url: String,
    /// Lowercased whitespace-separated words, punctuation intact.
    pub tokens: Vec<String>,
}

/// Fetch and tokenize every linked article of one site.
///
/// At most `concurrency` fetches are in flight at once; results keep the
/// order of `links` regardless of completion order.
///
/// # Arguments
///
/// * `fetcher` - Source of article pages
/// * `site` - Base URL and body selector of the source
/// * `links` - Link paths from the homepage
/// * `concurrency` - Maximum fetches in flight (values below 1 mean 1)
///
/// # Returns
///
/// One [`HarvestedArticle`] per link that was fetched and had a non-empty
/// body. Failed, unresolvable and empty links are logged and left out.
#[instrument(level = "info", skip_all, fields(site = %site.base_url, links = links.len()))]
pub async fn harvest_articles<F: PageFetcher>(
    fetcher: &F,
    site: &SiteConfig,
    links: Vec<String>,
    concurrency: usize,
) -> Vec<HarvestedArticle> {
    let base = match Url::parse(&site.base_url) {
        Ok(base) => base,
        Err(e) => {
            warn!(error = %e, "Base URL is not a valid URL; skipping site");
            return Vec::new();
        }
    };
    let base = &base;
    let attempted = links.len();

    let articles: Vec<HarvestedArticle> = stream::iter(links)
        .map(|link| async move {
            match harvest_article(fetcher, base, site, &link).await {
                Ok(Some(article)) => {
                    debug!(url = %article.source_url, words = article.tokens.len(), "Harvested article");
                    Some(article)
                }
                Ok(None) => {
                    warn!(%link, "Article body was empty; dropping");
                    None
                }
                Err(e) if e.is_network() => {
                    warn!(%link, error = %e, "Article fetch failed; skipping");
                    None
                }
                Err(e) => {
                    warn!(%link, error = %e, "Article could not be read; skipping");
                    None
                }
            }
        })
        .buffered(concurrency.max(1))
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(
        attempted,
        harvested = articles.len(),
        "Harvested site articles"
    );
    articles
}

async fn harvest_article<F: PageFetcher>(
    fetcher: &F,
    base: &Url,
    site: &SiteConfig,
    link: &str,
) -> Result<Option<HarvestedArticle>, CrawlError> {
    let url = base
        .join(link)
        .map_err(|e| CrawlError::Parse(format!("cannot resolve link `{link}`: {e}")))?;

    let page = fetcher.fetch(url.as_str()).await?;
    let body = page.find_all(&site.article_tag, &site.article_class)?;
    let tokens = tokenize(body.iter().map(|element| element.text()));

    if tokens.is_empty() {
        return Ok(None);
    }
    Ok(Some(HarvestedArticle {
        link: link.to_string(),
        source_url: page.url().to_string(),
        tokens,
    }))
}

/// Lowercase the given text fragments and split them into one flat word list.
pub fn tokenize<'a>(fragments: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    fragments
        .into_iter()
        .flat_map(str::split_whitespace)
        .map(str::to_lowercase)
        .collect()
}
