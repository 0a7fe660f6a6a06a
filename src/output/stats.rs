//! Run statistics
//!
//! Counters collected while a scrape runs, and a terminal rendering of them.

use crate::crawler::MovieOutcome;
use crate::movie::Field;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Scrape run statistics
#[derive(Debug, Clone)]
pub struct RunStatistics {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Listing pages requested
    pub pages_requested: u64,

    /// Listing pages that could not be fetched
    pub pages_failed: u64,

    /// Records produced
    pub movies: u64,

    /// Records without any `NA` column
    ///
    /// A not-rated movie has `NA` as its rating without a diagnostic, so it
    /// counts as incomplete here while `missing_by_field` leaves it out.
    pub complete_movies: u64,

    /// Movies whose detail page could not be fetched
    pub detail_pages_unavailable: u64,

    /// Diagnosed `NA` substitutions per column
    pub missing_by_field: BTreeMap<Field, u64>,

    /// Extraction failures other than missing elements
    pub unexpected_errors: u64,
}

impl RunStatistics {
    /// Starts a new set of counters, stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_requested: 0,
            pages_failed: 0,
            movies: 0,
            complete_movies: 0,
            detail_pages_unavailable: 0,
            missing_by_field: BTreeMap::new(),
            unexpected_errors: 0,
        }
    }

    /// Records one listing page request
    pub fn record_page(&mut self, fetched: bool) {
        self.pages_requested += 1;
        if !fetched {
            self.pages_failed += 1;
        }
    }

    /// Records one extracted movie
    pub fn record_movie(&mut self, outcome: &MovieOutcome) {
        self.movies += 1;

        if outcome.record.is_complete() {
            self.complete_movies += 1;
        }

        if !outcome.detail_fetched {
            self.detail_pages_unavailable += 1;
        }

        for diagnostic in &outcome.diagnostics {
            *self.missing_by_field.entry(diagnostic.field).or_insert(0) += 1;
            if diagnostic.reason.is_unexpected() {
                self.unexpected_errors += 1;
            }
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Run duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Percentage of movies with every column populated
    pub fn completeness_rate(&self) -> f64 {
        if self.movies == 0 {
            return 0.0;
        }
        (self.complete_movies as f64 / self.movies as f64) * 100.0
    }
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats statistics for the terminal
pub fn format_statistics(stats: &RunStatistics) -> String {
    let mut out = String::new();

    out.push_str("=== Scrape Statistics ===\n\n");

    out.push_str(&format!("Started: {}\n", stats.started_at.to_rfc3339()));
    if let Some(finished) = stats.finished_at {
        out.push_str(&format!("Finished: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = stats.duration_seconds() {
        out.push_str(&format!("Duration: {} seconds\n", duration));
    }
    out.push('\n');

    out.push_str("Pages:\n");
    out.push_str(&format!("  Requested: {}\n", stats.pages_requested));
    out.push_str(&format!("  Failed: {}\n\n", stats.pages_failed));

    out.push_str("Movies:\n");
    out.push_str(&format!("  Extracted: {}\n", stats.movies));
    out.push_str(&format!(
        "  Complete: {} ({:.1}%)\n",
        stats.complete_movies,
        stats.completeness_rate()
    ));
    out.push_str(&format!(
        "  Detail page unavailable: {}\n",
        stats.detail_pages_unavailable
    ));
    out.push_str(&format!(
        "  Unexpected extraction errors: {}\n",
        stats.unexpected_errors
    ));

    if !stats.missing_by_field.is_empty() {
        out.push_str("\nNA values by column:\n");
        for (field, count) in &stats.missing_by_field {
            out.push_str(&format!("  {}: {}\n", field.column_name(), count));
        }
    }

    out
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &RunStatistics) {
    print!("{}", format_statistics(stats));
}
