//! Detail page extraction
//!
//! Each of the five detail fields has its own extractor returning
//! `Result<Option<String>, FieldError>`:
//!
//! | Result | Meaning | Field value | Log level |
//! |--------|---------|-------------|-----------|
//! | `Ok(Some(v))` | value present | `v` | - |
//! | `Ok(None)` | element absent | `NA` | info |
//! | `Err(e)` | unexpected failure | `NA` | error |
//!
//! The substitution and logging happen in [`resolve_field`] only, so a
//! failure in one field never affects another.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::listing::MovieCard;
use crate::movie::{DetailFields, Diagnostic, Field, MissReason, MovieRecord, NOT_AVAILABLE};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

const RATING_SELECTOR: &str = "div.percent span";
const RATING_TOKEN_PREFIX: &str = "icon-r";
const NOT_RATED_TOKEN: &str = "NR";
const GENRES_SELECTOR: &str = "span.genres";
const GENRE_LINK_SELECTOR: &str = "a";
const RUNTIME_SELECTOR: &str = "span.runtime";
const OVERVIEW_SELECTOR: &str = "p";
const PROFILE_SELECTOR: &str = "li.profile";
const PROFILE_LINK_SELECTOR: &str = "a";
const DIRECTOR_MARKER: &str = "Director";

/// Unexpected failure while extracting a field
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("rating indicator has no 'icon-r' class token")]
    MissingRatingToken,

    #[error("unrecognized rating value '{0}'")]
    MalformedRating(String),
}

type FieldResult = Result<Option<String>, FieldError>;

fn selector(css: &str) -> Result<Selector, FieldError> {
    Selector::parse(css).map_err(|e| FieldError::InvalidSelector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Extracts the user score from the percentage indicator
///
/// The value is encoded in a class token: `icon-r72` means 72, and
/// `icon-rNR` means the movie is not rated yet (reported as `NA`).
pub fn extract_rating(document: &Html) -> FieldResult {
    let rating_selector = selector(RATING_SELECTOR)?;
    let Some(indicator) = document.select(&rating_selector).next() else {
        return Ok(None);
    };

    let value = indicator
        .value()
        .classes()
        .find_map(|class| class.strip_prefix(RATING_TOKEN_PREFIX))
        .ok_or(FieldError::MissingRatingToken)?;

    if value == NOT_RATED_TOKEN {
        return Ok(Some(NOT_AVAILABLE.to_string()));
    }

    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::MalformedRating(value.to_string()));
    }

    Ok(Some(value.to_string()))
}

/// Extracts the genre tags, comma-joined in document order
pub fn extract_genres(document: &Html) -> FieldResult {
    let container_selector = selector(GENRES_SELECTOR)?;
    let link_selector = selector(GENRE_LINK_SELECTOR)?;

    let Some(container) = document.select(&container_selector).next() else {
        return Ok(None);
    };

    let genres: Vec<String> = container
        .select(&link_selector)
        .map(|link| element_text(link).trim().to_string())
        .filter(|genre| !genre.is_empty())
        .collect();

    Ok(Some(genres.join(",")))
}

/// Extracts the runtime text with embedded newlines removed
pub fn extract_runtime(document: &Html) -> FieldResult {
    let runtime_selector = selector(RUNTIME_SELECTOR)?;

    Ok(document.select(&runtime_selector).next().map(|span| {
        element_text(span)
            .replace('\n', "")
            .trim()
            .to_string()
    }))
}

/// Extracts the overview from the first paragraph of the document
pub fn extract_overview(document: &Html) -> FieldResult {
    let overview_selector = selector(OVERVIEW_SELECTOR)?;

    Ok(document
        .select(&overview_selector)
        .next()
        .map(|p| element_text(p).trim().to_string()))
}

/// Extracts the director's name from the crew list
///
/// Scans profile entries in order and stops at the first one mentioning
/// "Director"; the name is the text of its link.
pub fn extract_director(document: &Html) -> FieldResult {
    let profile_selector = selector(PROFILE_SELECTOR)?;
    let link_selector = selector(PROFILE_LINK_SELECTOR)?;

    let Some(profile) = document
        .select(&profile_selector)
        .find(|profile| element_text(*profile).contains(DIRECTOR_MARKER))
    else {
        return Ok(None);
    };

    Ok(profile
        .select(&link_selector)
        .next()
        .map(|link| element_text(link).trim().to_string()))
}

/// Turns one extractor result into a field value
///
/// Returns the value to store and, when the placeholder was used, the
/// diagnostic describing why. The diagnostic is logged here.
pub fn resolve_field(
    field: Field,
    result: FieldResult,
    absent_reason: MissReason,
    title: &str,
    url: &str,
) -> (String, Option<Diagnostic>) {
    let reason = match result {
        Ok(Some(value)) if !value.is_empty() => return (value, None),
        Ok(Some(_)) => MissReason::DataNotFound,
        Ok(None) => absent_reason,
        Err(e) => MissReason::OperationFailed(e.to_string()),
    };

    let diagnostic = Diagnostic::new(field, reason, title, url);
    diagnostic.log();
    (NOT_AVAILABLE.to_string(), Some(diagnostic))
}

/// Extracts all five detail fields from a detail document
///
/// `title` and `url` only label the diagnostics.
pub fn extract_details(html: &str, title: &str, url: &str) -> (DetailFields, Vec<Diagnostic>) {
    let document = Html::parse_document(html);

    let extractors: [(Field, fn(&Html) -> FieldResult, MissReason); 5] = [
        (Field::Rating, extract_rating, MissReason::ElementNotFound),
        (Field::Genres, extract_genres, MissReason::ElementNotFound),
        (Field::Runtime, extract_runtime, MissReason::ElementNotFound),
        (Field::Overview, extract_overview, MissReason::ElementNotFound),
        (Field::Director, extract_director, MissReason::DataNotFound),
    ];

    let mut details = DetailFields::unavailable();
    let mut diagnostics = Vec::new();

    for (field, extract, absent_reason) in extractors {
        let (value, diagnostic) =
            resolve_field(field, extract(&document), absent_reason, title, url);
        if let Some(slot) = details.slot_mut(field) {
            *slot = value;
        }
        diagnostics.extend(diagnostic);
    }

    (details, diagnostics)
}

/// Result of extracting one movie
#[derive(Debug, Clone)]
pub struct MovieOutcome {
    pub record: MovieRecord,

    /// Every field that fell back to `NA`, and why
    pub diagnostics: Vec<Diagnostic>,

    /// Whether the detail page was fetched
    pub detail_fetched: bool,
}

/// Builds movie records from listing cards, fetching each detail page
#[derive(Debug, Clone)]
pub struct MovieExtractor {
    fetcher: Fetcher,
    base_url: Url,
}

impl MovieExtractor {
    pub fn new(fetcher: Fetcher, base_url: Url) -> Self {
        Self { fetcher, base_url }
    }

    /// Extracts one movie record from its listing card
    ///
    /// Never fails: every problem degrades the affected fields to `NA` and
    /// is reported in the outcome's diagnostics.
    pub async fn extract_movie(&self, card: &MovieCard) -> MovieOutcome {
        let detail_url = card.detail_url(&self.base_url);
        let url = detail_url
            .as_ref()
            .map(|u| u.to_string())
            .or_else(|| card.detail_path.clone())
            .unwrap_or_default();

        let mut diagnostics = Vec::new();
        let title = listing_value(
            Field::Title,
            card.title.as_deref(),
            NOT_AVAILABLE,
            &url,
            &mut diagnostics,
        );
        let date = listing_value(Field::Date, card.date.as_deref(), &title, &url, &mut diagnostics);

        let body = match detail_url {
            Some(detail_url) => match self.fetcher.fetch(detail_url.as_str()).await {
                Ok(body) => Some(body),
                Err(e) => {
                    tracing::debug!(title = %title, error = %e, "Detail fetch failed");
                    None
                }
            },
            None => None,
        };

        let Some(body) = body else {
            diagnostics.extend(unavailable_diagnostics(&title, &url));
            return MovieOutcome {
                record: MovieRecord::new(title, date, DetailFields::unavailable()),
                diagnostics,
                detail_fetched: false,
            };
        };

        let (details, detail_diagnostics) = extract_details(&body, &title, &url);
        diagnostics.extend(detail_diagnostics);

        MovieOutcome {
            record: MovieRecord::new(title, date, details),
            diagnostics,
            detail_fetched: true,
        }
    }
}

/// Title or date from the listing card, or `NA` with a diagnostic
///
/// `title` labels the diagnostic; it is `NA` while the title itself is resolved.
fn listing_value(
    field: Field,
    value: Option<&str>,
    title: &str,
    url: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => {
            let diagnostic = Diagnostic::new(field, MissReason::ElementNotFound, title, url);
            diagnostic.log();
            diagnostics.push(diagnostic);
            NOT_AVAILABLE.to_string()
        }
    }
}

/// One diagnostic per detail field, logged as a single event
fn unavailable_diagnostics(title: &str, url: &str) -> Vec<Diagnostic> {
    let fields: Vec<&str> = Field::DETAIL.iter().map(|f| f.log_name()).collect();
    tracing::info!(
        fields = %fields.join(","),
        reason = %MissReason::DetailPageUnavailable,
        title = %title,
        url = %url,
        "Detail page unavailable, using NA"
    );

    Field::DETAIL
        .iter()
        .map(|field| Diagnostic::new(*field, MissReason::DetailPageUnavailable, title, url))
        .collect()
}
