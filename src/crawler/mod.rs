//! Crawler module for page fetching and movie extraction
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with bounded retries
//! - Listing page parsing into movie cards
//! - Detail page field extraction
//! - Overall run coordination

mod coordinator;
mod detail;
mod fetcher;
mod listing;
mod retry;

pub use coordinator::{run_scrape, Coordinator, PageOutcome, ScrapeReport};
pub use detail::{
    extract_details, extract_director, extract_genres, extract_overview, extract_rating,
    extract_runtime, resolve_field, FieldError, MovieExtractor, MovieOutcome,
};
pub use fetcher::{build_http_client, AttemptError, FetchError, Fetcher};
pub use listing::{page_url, parse_listing, MovieCard, CARD_SELECTOR};
pub use retry::{retry, RetryOutcome};
