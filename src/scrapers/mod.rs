//! News source catalog, link discovery, and article harvesting.
//!
//! Every source is crawled the same way, driven by its [`SiteConfig`]:
//!
//! 1. **Indexing**: fetch the homepage and read link paths ([`links`])
//! 2. **Harvesting**: fetch each linked article and tokenize its body ([`harvest`])
//!
//! # Built-in Sources
//!
//! | Source | Link elements | Article body |
//! |--------|---------------|--------------|
//! | Toronto Sun | `a.article-card__image-link` | `section.article-content__content-group` |
//! | Toronto Star | `a.c-mediacard` | `p.text-block-container` |
//! | National Post | `a.article-card__link` | `section.article-content__content-group` |
//! | Yahoo News Canada | `a.js-content-viewer` | `div.caas-body` |
//!
//! The built-in list can be replaced with a YAML file holding a list of
//! [`SiteConfig`] entries (see [`load_catalog`]).

pub mod harvest;
pub mod links;

use crate::error::CatalogError;
use crate::models::SiteConfig;
use tokio::fs;
use tracing::{info, instrument};

/// The sources crawled when no catalog file is given.
pub fn default_catalog() -> Vec<SiteConfig> {
    vec![
        SiteConfig::new(
            "https://torontosun.com",
            "a",
            "article-card__image-link",
            "section",
            "article-content__content-group",
        ),
        SiteConfig::new(
            "https://www.thestar.com",
            "a",
            "c-mediacard",
            "p",
            "text-block-container",
        ),
        SiteConfig::new(
            "https://nationalpost.com",
            "a",
            "article-card__link",
            "section",
            "article-content__content-group",
        ),
        SiteConfig::new(
            "https://ca.news.yahoo.com",
            "a",
            "js-content-viewer",
            "div",
            "caas-body",
        ),
    ]
}

/// Load a site catalog from a YAML file.
///
/// # Arguments
///
/// * `path` - YAML file holding a list of [`SiteConfig`] entries
///
/// # Errors
///
/// Returns [`CatalogError`] if the file cannot be read, is not valid YAML,
/// is empty, or has an entry with an empty field.
#[instrument(level = "info")]
pub async fn load_catalog(path: &str) -> Result<Vec<SiteConfig>, CatalogError> {
    let yaml = fs::read_to_string(path).await.map_err(|source| CatalogError::Io {
        path: path.to_string(),
        source,
    })?;
    let sites = parse_catalog(&yaml)?;
    info!(count = sites.len(), "Loaded site catalog");
    Ok(sites)
}

/// Parse and validate a YAML list of sites.
pub fn parse_catalog(yaml: &str) -> Result<Vec<SiteConfig>, CatalogError> {
    let sites: Vec<SiteConfig> = serde_yaml::from_str(yaml)?;
    if sites.is_empty() {
        return Err(CatalogError::NoSites);
    }
    for (index, site) in sites.iter().enumerate() {
        if let Some(field) = site.empty_field() {
            return Err(CatalogError::EmptyField { index, field });
        }
    }
    Ok(sites)
}
