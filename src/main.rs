//! # News Keyword Pulse
//!
//! Crawls a fixed set of news front pages, follows a bounded number of
//! article links on each, and reports how related each requested keyword is
//! to the collected coverage.
//!
//! ## Usage
//!
//! ```sh
//! news_keyword_pulse -k "covid, vaccine, climate_change"
//! ```
//!
//! ## Architecture
//!
//! Each keyword query runs the pipeline from scratch:
//! 1. **Indexing**: read article links from every site's homepage
//! 2. **Harvesting**: fetch each article and tokenize its body
//! 3. **Counting**: count keyword substring matches per article
//! 4. **Aggregation**: relatedness counts and percentages across all sites
//! 5. **Output**: print summaries and optionally write a JSON report
//!
//! Network failures only ever shrink the corpus; a run always completes.

use clap::Parser;
use std::error::Error;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod analysis;
mod cli;
mod error;
mod fetcher;
mod keywords;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod trends;
mod utils;

use cli::Cli;
use fetcher::HttpFetcher;
use keywords::parse_keywords;
use models::SiteConfig;
use outputs::{json, summary};
use pipeline::{analyze, CrawlSettings};
use trends::{JsonTrendFile, TrendSource};
use utils::{ensure_writable_dir, truncate_for_log};

const INSTRUCTIONS: &str = "Instructions:\n\
    If you wish to enter more than one word, separate each word with a comma\n\
    If there is a space in your word, use a '_' instead of the space.\n\
    Enter your keywords: ";

/// Everything a single query needs, set up once at startup.
struct Session {
    fetcher: HttpFetcher,
    sites: Vec<SiteConfig>,
    settings: CrawlSettings,
    trends: Option<JsonTrendFile>,
    json_output_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    info!("news_keyword_pulse starting up");
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let sites = match &args.sites {
        Some(path) => scrapers::load_catalog(path).await?,
        None => scrapers::default_catalog(),
    };
    info!(count = sites.len(), "Using site catalog");

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "JSON output directory is not writable");
            return Err(e);
        }
    }

    let session = Session {
        fetcher: HttpFetcher::new(&args.user_agent, Duration::from_secs(args.timeout_secs))?,
        sites,
        settings: CrawlSettings {
            link_limit: args.link_limit,
            concurrency: args.concurrency.max(1),
        },
        trends: args.trends.as_deref().map(JsonTrendFile::new),
        json_output_dir: args.json_output_dir.clone(),
    };

    match &args.keywords {
        Some(input) => run_query(&session, input).await,
        None => interactive(&session).await?,
    }

    info!("Execution complete");
    Ok(())
}

/// Prompt for keyword sets until the user declines to continue.
async fn interactive(session: &Session) -> Result<(), Box<dyn Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(input) = prompt(&mut lines, INSTRUCTIONS).await? else {
            break;
        };
        run_query(session, &input).await;

        match prompt(&mut lines, "Input new words? (y/n): ").await? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("n") => break,
            Some(_) => continue,
            None => break,
        }
    }
    Ok(())
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, text: &str) -> std::io::Result<Option<String>> {
    print!("{text}");
    std::io::stdout().flush()?;
    lines.next_line().await
}

/// Analyze one keyword set and print (and optionally save) the results.
#[instrument(level = "info", skip_all, fields(input = %truncate_for_log(input, 200)))]
async fn run_query(session: &Session, input: &str) {
    let keywords = parse_keywords(input);
    if keywords.is_empty() {
        warn!("No keywords given; nothing to analyze");
        return;
    }

    let start_time = std::time::Instant::now();
    let report = analyze(&session.fetcher, &session.sites, &keywords, &session.settings).await;
    info!(
        articles = report.corpus.len(),
        total_observations = report.stats.total_observations,
        keywords_found = report.percentages.len(),
        elapsed_secs = start_time.elapsed().as_secs(),
        "Analysis complete"
    );

    print!("{}", summary::percentages_text(&report));

    if let Some(source) = &session.trends {
        match source.interest_over_time(&keywords).await {
            Ok(table) => {
                println!("Data:");
                print!("{}", summary::popularity_text(&table, &keywords));
            }
            Err(e) => warn!(error = %e, "Search-trend data unavailable"),
        }
    }

    if let Some(dir) = &session.json_output_dir {
        match json::write_report(&report, dir).await {
            Ok(path) => info!(path = %path.display(), "Report saved"),
            Err(e) => error!(error = %e, "Failed to write JSON report"),
        }
    }
}
