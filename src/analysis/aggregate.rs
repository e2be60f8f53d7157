//! Cross-site relatedness and percentage computation.
//!
//! The denominator is accumulated once per (keyword, article) pair, so each
//! keyword effectively has its own observation mass and percentages for
//! different keywords are not directly comparable. Existing reports depend on
//! these numbers, so the formula is kept as is.

use crate::models::{ArticleRecord, KeywordPercentage, PercentageTable, RelatednessStats};
use itertools::Itertools;
use tracing::{debug, instrument};

/// Tally how many articles mention each keyword.
///
/// For every distinct keyword and every record:
/// - a record with no keyword matches at all adds one observation;
/// - a record containing the keyword adds one observation and one match;
/// - a record matching only other keywords adds nothing.
///
/// # Arguments
///
/// * `corpus` - Records from one analysis run
/// * `keywords` - The requested keywords; repeats are tallied once
///
/// # Returns
///
/// Match counts for every requested keyword (zero when never seen) and the
/// observation total. An empty corpus yields no keyword entries at all.
#[instrument(level = "debug", skip_all, fields(articles = corpus.len(), keywords = keywords.len()))]
pub fn relate(corpus: &[ArticleRecord], keywords: &[String]) -> RelatednessStats {
    let mut stats = RelatednessStats::default();
    if corpus.is_empty() {
        return stats;
    }

    for keyword in keywords.iter().unique() {
        stats.matched_count.entry(keyword.clone()).or_insert(0);
        for record in corpus {
            if record.keyword_counts.is_empty() {
                stats.total_observations += 1;
            } else if record.keyword_counts.contains_key(keyword) {
                stats.total_observations += 1;
                *stats.matched_count.entry(keyword.clone()).or_insert(0) += 1;
            }
        }
    }

    debug!(
        total_observations = stats.total_observations,
        matched = ?stats.matched_count,
        "Computed relatedness"
    );
    stats
}

/// Convert match counts into percentages of the observation total.
///
/// # Arguments
///
/// * `stats` - Output of [`relate`]
/// * `keywords` - The requested keywords, in display order
///
/// # Returns
///
/// One entry per requested keyword present in `stats.matched_count`, in
/// request order and without repeats. A zero denominator reports `0.0`
/// instead of failing.
pub fn percentage(stats: &RelatednessStats, keywords: &[String]) -> PercentageTable {
    let mut entries: Vec<KeywordPercentage> = Vec::new();

    for keyword in keywords.iter().unique() {
        let Some(&matched) = stats.matched_count.get(keyword) else {
            continue;
        };
        let percent = if stats.total_observations == 0 {
            0.0
        } else {
            100.0 * matched as f64 / stats.total_observations as f64
        };
        entries.push(KeywordPercentage {
            keyword: keyword.clone(),
            percent,
        });
    }

    PercentageTable { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(url: &str, counts: &[(&str, usize)], total_words: usize) -> ArticleRecord {
        ArticleRecord {
            source_url: url.to_string(),
            keyword_counts: counts.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            total_words,
        }
    }

    fn keywords(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_relate_single_article() {
        let corpus = vec![record(
            "https://www.thestar.com/news/gta/omicron.html",
            &[("covid", 7)],
            940,
        )];

        let stats = relate(&corpus, &keywords(&["covid"]));

        assert_eq!(stats.matched_count, HashMap::from([("covid".to_string(), 1)]));
        assert_eq!(stats.total_observations, 1);
    }

    #[test]
    fn test_relate_counts_denominator_per_keyword_and_article() {
        let corpus = vec![
            record("a", &[("covid", 3)], 100),
            record("b", &[("vaccine", 1)], 80),
            record("c", &[], 50),
            record("d", &[("covid", 1), ("vaccine", 2)], 60),
        ];

        let stats = relate(&corpus, &keywords(&["covid", "vaccine"]));

        // covid: a, c, d observed; vaccine: b, c, d observed.
        assert_eq!(stats.total_observations, 6);
        assert_eq!(stats.matched_count["covid"], 2);
        assert_eq!(stats.matched_count["vaccine"], 2);
    }

    #[test]
    fn test_relate_keyword_never_matched_counts_zero() {
        let corpus = vec![record("a", &[("covid", 3)], 100), record("b", &[], 40)];
        let stats = relate(&corpus, &keywords(&["covid", "flu"]));

        assert_eq!(stats.matched_count["covid"], 1);
        assert_eq!(stats.matched_count["flu"], 0);
        // covid: a + b, flu: b only.
        assert_eq!(stats.total_observations, 3);
    }

    #[test]
    fn test_relate_repeated_keyword_tallied_once() {
        let corpus = vec![record("a", &[("covid", 3)], 100), record("b", &[], 40)];

        let once = relate(&corpus, &keywords(&["covid"]));
        let twice = relate(&corpus, &keywords(&["covid", "covid"]));

        assert_eq!(once, twice);
        assert_eq!(twice.matched_count["covid"], 1);
        assert_eq!(twice.total_observations, 2);
    }

    #[test]
    fn test_percentage() {
        let stats = RelatednessStats {
            matched_count: HashMap::from([("covid".to_string(), 8)]),
            total_observations: 20,
        };

        let table = percentage(&stats, &keywords(&["covid"]));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("covid"), Some(40.0));
    }

    #[test]
    fn test_percentage_keeps_request_order_and_reports_unmatched_as_zero() {
        let corpus = vec![record("a", &[("covid", 3)], 100), record("b", &[], 40)];
        let kws = keywords(&["flu", "covid"]);

        let table = percentage(&relate(&corpus, &kws), &kws);
        let (labels, values) = table.bar_series();

        assert_eq!(labels, vec!["flu", "covid"]);
        assert_eq!(values[0], 0.0);
        assert!((values[1] - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_repeated_keyword_appears_once() {
        let stats = RelatednessStats {
            matched_count: HashMap::from([("covid".to_string(), 1)]),
            total_observations: 4,
        };

        let table = percentage(&stats, &keywords(&["covid", "covid"]));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("covid"), Some(25.0));
    }

    #[test]
    fn test_percentage_zero_denominator_reports_zero() {
        let stats = RelatednessStats {
            matched_count: HashMap::from([("covid".to_string(), 2)]),
            total_observations: 0,
        };
        assert_eq!(percentage(&stats, &keywords(&["covid"])).get("covid"), Some(0.0));
    }

    #[test]
    fn test_empty_corpus_gives_empty_table() {
        let kws = keywords(&["covid", "vaccine"]);
        let stats = relate(&[], &kws);

        assert_eq!(stats.total_observations, 0);
        assert!(percentage(&stats, &kws).is_empty());
    }

    #[test]
    fn test_relate_and_percentage_are_repeatable() {
        let corpus = vec![
            record("a", &[("covid", 3)], 100),
            record("b", &[], 10),
        ];
        let kws = keywords(&["covid"]);

        let first = percentage(&relate(&corpus, &kws), &kws);
        let second = percentage(&relate(&corpus, &kws), &kws);

        assert_eq!(first, second);
        assert_eq!(first.get("covid"), Some(50.0));
    }
}
