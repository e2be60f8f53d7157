//! Command-line interface definitions.
//!
//! All options can be given as flags; the keyword list, site catalog and
//! trend table can also come from environment variables.

use crate::scrapers::links::DEFAULT_LINK_LIMIT;
use clap::Parser;

/// Command-line arguments for a keyword relatedness run.
///
/// # Examples
///
/// ```sh
/// # One run over the built-in news sites
/// news_keyword_pulse -k "covid, vaccine, climate_change"
///
/// # Interactive: prompt for keywords until told to stop
/// news_keyword_pulse
///
/// # Custom sources, search-trend table, and a JSON report
/// news_keyword_pulse -k covid --sites sites.yaml --trends trends.json -j ./reports
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Comma-separated keywords; use `_` for a space inside a keyword.
    /// Prompts interactively when omitted.
    #[arg(short, long, env = "NEWS_KEYWORDS")]
    pub keywords: Option<String>,

    /// Front-page links followed per site
    #[arg(short, long, default_value_t = DEFAULT_LINK_LIMIT)]
    pub link_limit: usize,

    /// Article fetches in flight per site
    #[arg(short = 'c', long, default_value_t = 1)]
    pub concurrency: usize,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[arg(long, default_value = concat!("news_keyword_pulse/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,

    /// YAML file replacing the built-in site catalog
    #[arg(long, env = "NEWS_SITES")]
    pub sites: Option<String>,

    /// JSON search-trend table used for popularity summaries
    #[arg(long, env = "NEWS_TRENDS")]
    pub trends: Option<String>,

    /// Output directory for JSON reports
    #[arg(short, long)]
    pub json_output_dir: Option<String>,
}
