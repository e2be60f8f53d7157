//! Per-article keyword counting.

use crate::models::ArticleRecord;
use itertools::Itertools;
use std::collections::HashMap;

/// Count keyword occurrences in one article's tokens.
///
/// A token counts for a keyword when the keyword appears anywhere inside it,
/// so `"vaccine"` is found in `"vaccines"` and `"unvaccinated"`. One token may
/// count for several keywords. Keywords never seen are left out of the map,
/// and repeated keywords are only counted once.
///
/// # Arguments
///
/// * `source_url` - Where the article was fetched from
/// * `tokens` - Lowercased words of the article body
/// * `keywords` - Keywords to look for
///
/// # Returns
///
/// An [`ArticleRecord`] whose `total_words` is `tokens.len()`.
pub fn count_keywords(source_url: &str, tokens: &[String], keywords: &[String]) -> ArticleRecord {
    let keywords: Vec<&str> = keywords.iter().map(String::as_str).unique().collect();
    let mut keyword_counts: HashMap<String, usize> = HashMap::new();

    for token in tokens {
        for keyword in keywords.iter().filter(|k| token.contains(**k)) {
            *keyword_counts.entry(keyword.to_string()).or_insert(0) += 1;
        }
    }

    ArticleRecord {
        source_url: source_url.to_string(),
        keyword_counts,
        total_words: tokens.len(),
    }
}
