//! Diagnostics for fields that fell back to the placeholder

use crate::movie::field::Field;
use std::fmt;

/// Why a field holds `NA`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissReason {
    /// The element carrying the value is not in the document
    ElementNotFound,

    /// The surrounding elements exist but none carry the value
    DataNotFound,

    /// The detail page could not be fetched
    DetailPageUnavailable,

    /// Extraction failed for a reason other than a missing element
    OperationFailed(String),
}

impl MissReason {
    /// Returns true for failures that indicate a bug or a changed page layout
    /// rather than a movie that simply lacks the data
    pub fn is_unexpected(&self) -> bool {
        matches!(self, MissReason::OperationFailed(_))
    }
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissReason::ElementNotFound => f.write_str("element not found"),
            MissReason::DataNotFound => f.write_str("data not found"),
            MissReason::DetailPageUnavailable => f.write_str("movie detail page not found"),
            MissReason::OperationFailed(message) => write!(f, "operation failed: {}", message),
        }
    }
}

/// A single field substitution, with enough context to find the movie again
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub field: Field,
    pub reason: MissReason,
    pub title: String,
    pub url: String,
}

impl Diagnostic {
    pub fn new(field: Field, reason: MissReason, title: &str, url: &str) -> Self {
        Self {
            field,
            reason,
            title: title.to_string(),
            url: url.to_string(),
        }
    }

    /// Emits this diagnostic as a structured log event
    ///
    /// Missing data is logged at info level, unexpected failures at error level.
    pub fn log(&self) {
        if self.reason.is_unexpected() {
            tracing::error!(
                field = %self.field,
                reason = %self.reason,
                title = %self.title,
                url = %self.url,
                "Field extraction failed, using NA"
            );
        } else {
            tracing::info!(
                field = %self.field,
                reason = %self.reason,
                title = %self.title,
                url = %self.url,
                "Field unavailable, using NA"
            );
        }
    }
}
