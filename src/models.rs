//! Data models shared by the crawl pipeline and its outputs.
//!
//! - [`SiteConfig`]: where links and article bodies live in one source's markup
//! - [`ArticleRecord`]: keyword counts for one harvested article
//! - [`Corpus`]: every record gathered by a single analysis run
//! - [`RelatednessStats`] and [`PercentageTable`]: the aggregated results
//! - [`TrendTable`] and [`PopularityExtreme`]: search-interest data from the trend collaborator
//! - [`AnalysisReport`]: everything one run produced, as written to JSON

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Extraction rules for one news source.
///
/// Links are read from the `href` of every `link_tag` element carrying the
/// `link_class` class on the homepage at `base_url`. Article text is the text
/// of every `article_tag` element carrying `article_class` on each linked page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Homepage of the source; link paths are resolved against it.
    pub base_url: String,
    pub link_tag: String,
    pub link_class: String,
    pub article_tag: String,
    pub article_class: String,
}

impl SiteConfig {
    pub fn new(
        base_url: &str,
        link_tag: &str,
        link_class: &str,
        article_tag: &str,
        article_class: &str,
    ) -> Self {
        SiteConfig {
            base_url: base_url.to_string(),
            link_tag: link_tag.to_string(),
            link_class: link_class.to_string(),
            article_tag: article_tag.to_string(),
            article_class: article_class.to_string(),
        }
    }

    /// Name of the first empty field, if any.
    pub fn empty_field(&self) -> Option<&'static str> {
        [
            ("base_url", &self.base_url),
            ("link_tag", &self.link_tag),
            ("link_class", &self.link_class),
            ("article_tag", &self.article_tag),
            ("article_class", &self.article_class),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Keyword counts for one harvested article.
///
/// `keyword_counts` only holds keywords that were seen at least once, and no
/// count exceeds `total_words`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    /// Absolute URL the article was fetched from.
    pub source_url: String,
    pub keyword_counts: HashMap<String, usize>,
    /// Number of whitespace-separated tokens in the article body.
    pub total_words: usize,
}

/// Records gathered by one analysis run, in crawl order.
pub type Corpus = Vec<ArticleRecord>;

/// Per-keyword match counts against the observation denominator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelatednessStats {
    pub matched_count: HashMap<String, usize>,
    pub total_observations: usize,
}

/// Share of observations in which a keyword appeared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordPercentage {
    pub keyword: String,
    /// Always within `0.0..=100.0`.
    pub percent: f64,
}

/// Keyword percentages in the order the keywords were requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PercentageTable {
    pub entries: Vec<KeywordPercentage>,
}

impl PercentageTable {
    pub fn get(&self, keyword: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.keyword == keyword)
            .map(|e| e.percent)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parallel label/value vectors, the shape a bar chart consumes.
    pub fn bar_series(&self) -> (Vec<String>, Vec<f64>) {
        self.entries
            .iter()
            .map(|e| (e.keyword.clone(), e.percent))
            .unzip()
    }
}

/// Search interest per day, one column per keyword, values in `0..=100`.
pub type TrendTable = BTreeMap<NaiveDate, HashMap<String, f64>>;

/// The day a keyword's search interest peaked or bottomed out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularityExtreme {
    pub keyword: String,
    pub date: NaiveDate,
    pub value: f64,
}

/// Everything one analysis run produced.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub keywords: Vec<String>,
    pub corpus: Corpus,
    pub stats: RelatednessStats,
    pub percentages: PercentageTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_config_empty_field() {
        let ok = SiteConfig::new("https://example.com", "a", "card", "p", "body");
        assert_eq!(ok.empty_field(), None);

        let bad = SiteConfig::new("https://example.com", "a", "card", " ", "body");
        assert_eq!(bad.empty_field(), Some("article_tag"));
    }

    #[test]
    fn test_site_config_from_yaml() {
        let yaml = r#"
base_url: https://nationalpost.com
link_tag: a
link_class: article-card__link
article_tag: section
article_class: article-content__content-group
"#;
        let site: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(site.base_url, "https://nationalpost.com");
        assert_eq!(site.link_class, "article-card__link");
    }

    #[test]
    fn test_percentage_table_bar_series() {
        let table = PercentageTable {
            entries: vec![
                KeywordPercentage {
                    keyword: "covid".to_string(),
                    percent: 40.0,
                },
                KeywordPercentage {
                    keyword: "vaccine".to_string(),
                    percent: 12.5,
                },
            ],
        };

        let (labels, values) = table.bar_series();
        assert_eq!(labels, vec!["covid", "vaccine"]);
        assert_eq!(values, vec![40.0, 12.5]);
        assert_eq!(table.get("vaccine"), Some(12.5));
        assert_eq!(table.get("flu"), None);
    }

    #[test]
    fn test_percentage_table_serializes_as_list() {
        let table = PercentageTable {
            entries: vec![KeywordPercentage {
                keyword: "covid".to_string(),
                percent: 40.0,
            }],
        };
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"keyword":"covid","percent":40.0}]"#);
    }
}
