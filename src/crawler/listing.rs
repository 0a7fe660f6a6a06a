//! Listing page parser
//!
//! A listing page presents one summary card per movie. This module turns a
//! listing document into owned [`MovieCard`] values so that no parsed HTML
//! has to outlive the parsing call.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Selector for one movie summary card
pub const CARD_SELECTOR: &str = "div.card.style_1";

const HEADING_SELECTOR: &str = "h2";
const HEADING_LINK_SELECTOR: &str = "h2 a[href]";
const DATE_SELECTOR: &str = "p";

/// The summary fragment for one movie on a listing page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieCard {
    /// Heading text
    pub title: Option<String>,

    /// Release date paragraph text
    pub date: Option<String>,

    /// Link to the detail page, as written in the markup (usually relative)
    pub detail_path: Option<String>,
}

impl MovieCard {
    /// Resolves the detail link against the site base URL
    ///
    /// Root-relative links are appended to the base URL's path, so a base of
    /// `http://host/tmdb` turns `/movie/1` into `http://host/tmdb/movie/1`.
    /// Returns `None` if the card has no link or the link cannot be resolved.
    pub fn detail_url(&self, base_url: &Url) -> Option<Url> {
        let path = self.detail_path.as_deref()?.trim();
        if path.is_empty() {
            return None;
        }
        if path.starts_with('/') && !path.starts_with("//") {
            append_to_base(base_url, path).ok()
        } else {
            base_url.join(path).ok()
        }
    }
}

/// Builds the URL of one listing page
///
/// # Example
///
/// ```
/// use marquee::crawler::page_url;
/// use url::Url;
///
/// let base = Url::parse("https://www.themoviedb.org").unwrap();
/// let url = page_url(&base, "/movie", 3).unwrap();
/// assert_eq!(url.as_str(), "https://www.themoviedb.org/movie?page=3");
/// ```
pub fn page_url(base_url: &Url, listing_path: &str, page: u32) -> Result<Url, url::ParseError> {
    let mut url = append_to_base(base_url, listing_path)?;
    url.query_pairs_mut()
        .clear()
        .append_pair("page", &page.to_string());
    Ok(url)
}

/// Appends a root-relative path to the base URL, keeping any base path prefix
fn append_to_base(base_url: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut root = base_url.clone();
    root.set_query(None);
    root.set_fragment(None);
    Url::parse(&format!("{}{}", root.as_str().trim_end_matches('/'), path))
}

/// Parses every movie card out of a listing document, in document order
pub fn parse_listing(html: &str) -> Vec<MovieCard> {
    let document = Html::parse_document(html);

    let card_selector = match Selector::parse(CARD_SELECTOR) {
        Ok(selector) => selector,
        Err(e) => {
            tracing::error!("Invalid card selector {}: {}", CARD_SELECTOR, e);
            return Vec::new();
        }
    };

    document
        .select(&card_selector)
        .map(parse_card)
        .collect()
}

/// Extracts the title, date, and detail link from one card element
fn parse_card(card: ElementRef<'_>) -> MovieCard {
    MovieCard {
        title: first_text(card, HEADING_SELECTOR),
        date: first_text(card, DATE_SELECTOR),
        detail_path: first_attr(card, HEADING_LINK_SELECTOR, "href"),
    }
}

fn first_text(scope: ElementRef<'_>, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    scope
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

fn first_attr(scope: ElementRef<'_>, css: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    scope
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(str::to_string)
}
