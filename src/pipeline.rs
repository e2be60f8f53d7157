//! One analysis run: crawl every site, count keywords, aggregate.
//!
//! Each call builds its own [`Corpus`] from scratch, so separate keyword
//! queries never see each other's records. Sites are crawled one at a time;
//! a site whose homepage cannot be fetched contributes nothing and the run
//! moves on to the next one.

use crate::analysis::aggregate::{percentage, relate};
use crate::analysis::counter::count_keywords;
use crate::fetcher::PageFetcher;
use crate::models::{AnalysisReport, Corpus, SiteConfig};
use crate::scrapers::harvest::harvest_articles;
use crate::scrapers::links::{extract_links, DEFAULT_LINK_LIMIT};
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

/// Knobs for a crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSettings {
    /// Front-page links followed per site.
    pub link_limit: usize,
    /// Article fetches in flight per site.
    pub concurrency: usize,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        CrawlSettings {
            link_limit: DEFAULT_LINK_LIMIT,
            concurrency: 1,
        }
    }
}

/// Crawl all `sites` and count `keywords` in every harvested article.
#[instrument(level = "info", skip_all, fields(sites = sites.len(), ?keywords))]
pub async fn build_corpus<F: PageFetcher>(
    fetcher: &F,
    sites: &[SiteConfig],
    keywords: &[String],
    settings: &CrawlSettings,
) -> Corpus {
    let mut corpus = Corpus::new();

    for site in sites {
        let homepage = match fetcher.fetch(&site.base_url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(site = %site.base_url, error = %e, "Homepage fetch failed; skipping site");
                continue;
            }
        };

        let links = extract_links(&homepage, site, settings.link_limit);
        let articles = harvest_articles(fetcher, site, links, settings.concurrency).await;

        let before = corpus.len();
        for article in &articles {
            let record = count_keywords(&article.source_url, &article.tokens, keywords);
            debug!(link = %article.link, counts = ?record.keyword_counts, "Counted keywords");
            corpus.push(record);
        }
        info!(site = %site.base_url, records = corpus.len() - before, "Site crawled");
    }

    info!(records = corpus.len(), "Corpus built");
    corpus
}

/// Run the full pipeline for one keyword set.
///
/// # Arguments
///
/// * `fetcher` - Source of homepages and articles
/// * `sites` - Sources to crawl, in order
/// * `keywords` - Keywords to count and relate
/// * `settings` - Link limit and per-site concurrency
///
/// # Returns
///
/// An [`AnalysisReport`] holding the fresh corpus, relatedness stats and
/// percentages. Network failures only make the corpus smaller.
pub async fn analyze<F: PageFetcher>(
    fetcher: &F,
    sites: &[SiteConfig],
    keywords: &[String],
    settings: &CrawlSettings,
) -> AnalysisReport {
    let corpus = build_corpus(fetcher, sites, keywords, settings).await;
    let stats = relate(&corpus, keywords);
    let percentages = percentage(&stats, keywords);

    AnalysisReport {
        generated_at: Utc::now(),
        keywords: keywords.to_vec(),
        corpus,
        stats,
        percentages,
    }
}
