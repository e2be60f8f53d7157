//! Search-interest time series for the requested keywords.
//!
//! The data itself comes from an outside provider; this module only defines
//! the shape it is consumed in ([`TrendTable`]), a file-backed source, and the
//! peak/minimum summaries printed after each analysis.

use crate::error::TrendError;
use crate::models::{PopularityExtreme, TrendTable};
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

/// A provider of daily search interest per keyword.
pub trait TrendSource {
    async fn interest_over_time(&self, keywords: &[String]) -> Result<TrendTable, TrendError>;
}

/// Reads an exported trend table from a JSON file shaped like
/// `{ "2021-12-13": { "covid": 87.0, "vaccine": 41.0 }, ... }`.
#[derive(Debug, Clone)]
pub struct JsonTrendFile {
    path: PathBuf,
}

impl JsonTrendFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonTrendFile { path: path.into() }
    }
}

impl TrendSource for JsonTrendFile {
    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    async fn interest_over_time(&self, keywords: &[String]) -> Result<TrendTable, TrendError> {
        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|source| TrendError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        let table = select_keywords(serde_json::from_str(&raw)?, keywords)?;
        info!(days = table.len(), "Loaded trend table");
        Ok(table)
    }
}

/// Keep only the requested keyword columns.
fn select_keywords(table: TrendTable, keywords: &[String]) -> Result<TrendTable, TrendError> {
    if let Some(missing) = keywords
        .iter()
        .find(|k| !table.is_empty() && !table.values().any(|row| row.contains_key(*k)))
    {
        return Err(TrendError::MissingKeyword(missing.clone()));
    }

    Ok(table
        .into_iter()
        .map(|(date, mut row)| {
            row.retain(|k, _| keywords.contains(k));
            (date, row)
        })
        .collect())
}

/// The day `keyword` was most searched. Ties go to the most recent day.
pub fn peak_popularity(table: &TrendTable, keyword: &str) -> Option<PopularityExtreme> {
    extreme(table, keyword, |value, best| value >= best)
}

/// The day `keyword` was least searched. Ties go to the most recent day.
pub fn lowest_popularity(table: &TrendTable, keyword: &str) -> Option<PopularityExtreme> {
    extreme(table, keyword, |value, best| value <= best)
}

fn extreme(
    table: &TrendTable,
    keyword: &str,
    replaces: impl Fn(f64, f64) -> bool,
) -> Option<PopularityExtreme> {
    let mut found: Option<PopularityExtreme> = None;
    for (date, row) in table {
        let Some(&value) = row.get(keyword) else {
            continue;
        };
        if found.as_ref().is_none_or(|best| replaces(value, best.value)) {
            found = Some(PopularityExtreme {
                keyword: keyword.to_string(),
                date: *date,
                value,
            });
        }
    }
    found
}
