//! Configuration module for Marquee
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use marquee::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("marquee.toml")).unwrap();
//! println!("Scraping pages up to {}", config.site.last_page);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetcherConfig, OutputConfig, ScraperConfig, SiteConfig, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
