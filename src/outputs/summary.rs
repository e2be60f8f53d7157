//! Plain-text summaries printed after each analysis.

use crate::models::{AnalysisReport, TrendTable};
use crate::trends::{lowest_popularity, peak_popularity};
use std::fmt::Write;

/// Render the percentage table and corpus size.
pub fn percentages_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Keyword relatedness across {} articles:",
        report.corpus.len()
    );
    if report.percentages.is_empty() {
        let _ = writeln!(out, "  no articles were collected");
    }
    for entry in &report.percentages.entries {
        let _ = writeln!(out, "  {:<20} {:>6.2}%", entry.keyword, entry.percent);
    }
    out
}

/// Render the peak and minimum search interest of every keyword.
pub fn popularity_text(table: &TrendTable, keywords: &[String]) -> String {
    let mut out = String::new();
    for keyword in keywords {
        if let Some(peak) = peak_popularity(table, keyword) {
            let _ = writeln!(
                out,
                "Latest peak popularity for {} was: {} on {}",
                keyword, peak.value, peak.date
            );
        }
    }
    for keyword in keywords {
        if let Some(low) = lowest_popularity(table, keyword) {
            let _ = writeln!(
                out,
                "Latest minimum popularity for {} was: {} on {}",
                keyword, low.value, low.date
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeywordPercentage, PercentageTable, RelatednessStats};
    use chrono::Utc;

    fn report(entries: Vec<KeywordPercentage>) -> AnalysisReport {
        AnalysisReport {
            generated_at: Utc::now(),
            keywords: vec!["covid".to_string()],
            corpus: Vec::new(),
            stats: RelatednessStats::default(),
            percentages: PercentageTable { entries },
        }
    }

    #[test]
    fn test_percentages_text() {
        let text = percentages_text(&report(vec![KeywordPercentage {
            keyword: "covid".to_string(),
            percent: 40.0,
        }]));
        assert!(text.starts_with("Keyword relatedness across 0 articles:"));
        assert!(text.contains("covid"));
        assert!(text.contains("40.00%"));
    }

    #[test]
    fn test_percentages_text_empty() {
        let text = percentages_text(&report(Vec::new()));
        assert!(text.contains("no articles were collected"));
    }

    #[test]
    fn test_popularity_text() {
        let table: TrendTable = serde_json::from_str(
            r#"{ "2021-12-05": { "covid": 40.0 }, "2021-12-12": { "covid": 100.0 } }"#,
        )
        .unwrap();

        let text = popularity_text(&table, &["covid".to_string()]);

        assert!(text.contains("Latest peak popularity for covid was: 100 on 2021-12-12"));
        assert!(text.contains("Latest minimum popularity for covid was: 40 on 2021-12-05"));
    }
}
