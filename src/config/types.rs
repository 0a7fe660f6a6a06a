use serde::Deserialize;

/// Browser-like User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.3; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/99.0.4844.51 Safari/537.36";

/// Main configuration structure for Marquee
///
/// Every section has defaults, so an empty file (or no file at all)
/// describes a full 50-page run against the public catalog.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub fetcher: FetcherConfig,
    pub scraper: ScraperConfig,
    pub output: OutputConfig,
}

/// Catalog site layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin that listing and detail paths are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the paginated listing (the page number goes in `?page=`)
    #[serde(rename = "listing-path")]
    pub listing_path: String,

    /// First listing page to fetch (inclusive)
    #[serde(rename = "first-page")]
    pub first_page: u32,

    /// Last listing page to fetch (inclusive)
    #[serde(rename = "last-page")]
    pub last_page: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.themoviedb.org".to_string(),
            listing_path: "/movie".to_string(),
            first_page: 1,
            last_page: 50,
        }
    }
}

/// HTTP fetching behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total number of requests made for one URL before giving up
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Fixed pause between attempts (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_attempts: 10,
            retry_delay_ms: 0,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Extraction behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Maximum number of detail pages fetched at the same time
    pub concurrency: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the exported CSV file
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "Movies.csv".to_string(),
        }
    }
}
