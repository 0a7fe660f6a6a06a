//! Scrape coordinator - main orchestration logic
//!
//! This module drives a full run:
//! - Building the ordered list of listing page URLs
//! - Fetching each listing page and parsing its movie cards
//! - Extracting movies through a bounded worker pool, in card order
//! - Collecting records and statistics, then exporting them

use crate::config::{validate, Config};
use crate::crawler::detail::{MovieExtractor, MovieOutcome};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::listing::{page_url, parse_listing};
use crate::movie::MovieRecord;
use crate::output::{write_csv, RunStatistics};
use crate::MarqueeError;
use futures::stream::{self, StreamExt};
use std::path::Path;
use url::Url;

/// Result of scraping one listing page
#[derive(Debug, Clone)]
pub struct PageOutcome {
    /// The listing page URL
    pub url: String,

    /// Whether the listing page itself was fetched
    pub fetched: bool,

    /// One outcome per movie card, in card order
    pub movies: Vec<MovieOutcome>,
}

impl PageOutcome {
    /// The page's records, in card order
    pub fn into_records(self) -> Vec<MovieRecord> {
        self.movies.into_iter().map(|movie| movie.record).collect()
    }
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    /// All records, in page order then card order
    pub records: Vec<MovieRecord>,
    pub statistics: RunStatistics,
}

/// Main scrape coordinator structure
pub struct Coordinator {
    config: Config,
    base_url: Url,
    fetcher: Fetcher,
    extractor: MovieExtractor,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(MarqueeError)` - Invalid configuration or HTTP client failure
    pub fn new(config: Config) -> Result<Self, MarqueeError> {
        validate(&config)?;
        let base_url = Url::parse(&config.site.base_url)?;
        let fetcher = Fetcher::new(&config.fetcher)?;
        Ok(Self::with_fetcher(config, base_url, fetcher))
    }

    /// Creates a coordinator around an existing fetcher
    pub fn with_fetcher(config: Config, base_url: Url, fetcher: Fetcher) -> Self {
        let extractor = MovieExtractor::new(fetcher.clone(), base_url.clone());
        Self {
            config,
            base_url,
            fetcher,
            extractor,
        }
    }

    /// Builds the ordered list of listing page URLs
    pub fn page_urls(&self) -> Result<Vec<Url>, MarqueeError> {
        let site = &self.config.site;
        (site.first_page..=site.last_page)
            .map(|page| page_url(&self.base_url, &site.listing_path, page).map_err(Into::into))
            .collect()
    }

    /// Scrapes one listing page
    ///
    /// An unreachable listing page yields an empty outcome; the run goes on.
    pub async fn extract_page(&self, page_url: &Url) -> PageOutcome {
        let body = match self.fetcher.fetch(page_url.as_str()).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(url = %page_url, error = %e, "Skipping listing page");
                return PageOutcome {
                    url: page_url.to_string(),
                    fetched: false,
                    movies: Vec::new(),
                };
            }
        };

        let cards = parse_listing(&body);
        tracing::debug!(url = %page_url, cards = cards.len(), "Parsed listing page");

        // buffered() keeps results in input order whatever order they finish in
        let movies: Vec<MovieOutcome> = stream::iter(cards.iter())
            .map(|card| self.extractor.extract_movie(card))
            .buffered(self.config.scraper.concurrency.max(1))
            .collect()
            .await;

        PageOutcome {
            url: page_url.to_string(),
            fetched: true,
            movies,
        }
    }

    /// Runs the scrape over every listing page
    ///
    /// Pages are processed one after another; records keep page order and,
    /// within a page, card order.
    pub async fn run(&self) -> Result<ScrapeReport, MarqueeError> {
        let page_urls = self.page_urls()?;
        let total_pages = page_urls.len();
        let mut statistics = RunStatistics::new();
        let mut records = Vec::new();

        tracing::info!("Scraping {} listing pages", total_pages);

        for (index, page_url) in page_urls.iter().enumerate() {
            let page = self.extract_page(page_url).await;

            statistics.record_page(page.fetched);
            for movie in &page.movies {
                statistics.record_movie(movie);
            }

            tracing::info!(
                "Progress: page {}/{} done, {} movies on page, {} movies total",
                index + 1,
                total_pages,
                page.movies.len(),
                records.len() + page.movies.len()
            );

            records.extend(page.into_records());
        }

        statistics.finish();

        tracing::info!(
            "Scrape completed: {} movies from {} pages ({} pages failed)",
            statistics.movies,
            statistics.pages_requested,
            statistics.pages_failed
        );

        Ok(ScrapeReport {
            records,
            statistics,
        })
    }
}

/// Runs a full scrape and writes the CSV export
///
/// The export is written once, after every page has been processed.
///
/// # Example
///
/// ```no_run
/// use marquee::config::Config;
/// use marquee::crawler::run_scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_scrape(Config::default()).await?;
/// println!("{} movies", report.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: Config) -> Result<ScrapeReport, MarqueeError> {
    let csv_path = config.output.csv_path.clone();
    let coordinator = Coordinator::new(config)?;

    let report = coordinator.run().await?;

    write_csv(&report.records, Path::new(&csv_path))?;
    tracing::info!("Wrote {} records to {}", report.records.len(), csv_path);

    Ok(report)
}
