//! Front-page link discovery.

use crate::fetcher::Page;
use crate::models::SiteConfig;
use tracing::{debug, info, instrument, warn};

/// Number of front-page links followed per site unless configured otherwise.
pub const DEFAULT_LINK_LIMIT: usize = 20;

/// Extract up to `limit` article link paths from a site's homepage.
///
/// Only the first `limit` matching elements are considered, in document
/// order. Elements without an `href` are skipped, so fewer than `limit` paths
/// may come back. An unusable link selector yields no links at all.
///
/// # Arguments
///
/// * `page` - The fetched homepage
/// * `site` - Extraction rules for the source
/// * `limit` - Maximum number of link elements to consider
///
/// # Returns
///
/// The `href` values in document order, exactly as written in the markup.
#[instrument(level = "info", skip_all, fields(site = %site.base_url, limit = limit))]
pub fn extract_links(page: &Page, site: &SiteConfig, limit: usize) -> Vec<String> {
    let elements = match page.find_all(&site.link_tag, &site.link_class) {
        Ok(elements) => elements,
        Err(e) => {
            warn!(error = %e, "Could not read homepage links; skipping site");
            return Vec::new();
        }
    };

    let links: Vec<String> = elements
        .iter()
        .take(limit)
        .enumerate()
        .filter_map(|(position, element)| match element.attr("href") {
            Some(href) => Some(href.to_string()),
            None => {
                warn!(position, "Link element has no href; skipping");
                None
            }
        })
        .collect();

    info!(
        matched = elements.len(),
        count = links.len(),
        "Indexed article links"
    );
    debug!(links = ?links, "Link paths");
    links
}
