//! The flat per-movie record and its detail-page half

use crate::movie::field::Field;
use serde::Serialize;

/// Placeholder stored whenever a field cannot be extracted
pub const NOT_AVAILABLE: &str = "NA";

/// Values read from a movie's detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailFields {
    pub rating: String,
    pub genres: String,
    pub runtime: String,
    pub overview: String,
    pub director: String,
}

impl DetailFields {
    /// Detail fields for a movie whose detail page could not be read
    pub fn unavailable() -> Self {
        Self {
            rating: NOT_AVAILABLE.to_string(),
            genres: NOT_AVAILABLE.to_string(),
            runtime: NOT_AVAILABLE.to_string(),
            overview: NOT_AVAILABLE.to_string(),
            director: NOT_AVAILABLE.to_string(),
        }
    }

    /// Mutable slot for one detail field, or `None` for listing fields
    pub(crate) fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Rating => Some(&mut self.rating),
            Field::Genres => Some(&mut self.genres),
            Field::Runtime => Some(&mut self.runtime),
            Field::Overview => Some(&mut self.overview),
            Field::Director => Some(&mut self.director),
            Field::Title | Field::Date => None,
        }
    }
}

impl Default for DetailFields {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// One movie, as exported
///
/// A record always carries all seven columns. The fields are private, so
/// once built a record can only be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieRecord {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Rating")]
    rating: String,
    #[serde(rename = "Genres")]
    genres: String,
    #[serde(rename = "Runtime")]
    runtime: String,
    #[serde(rename = "Overview")]
    overview: String,
    #[serde(rename = "Director")]
    director: String,
}

impl MovieRecord {
    /// Builds a record from listing values and detail-page values
    pub fn new(title: impl Into<String>, date: impl Into<String>, details: DetailFields) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            rating: details.rating,
            genres: details.genres,
            runtime: details.runtime,
            overview: details.overview,
            director: details.director,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn rating(&self) -> &str {
        &self.rating
    }

    pub fn genres(&self) -> &str {
        &self.genres
    }

    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    pub fn overview(&self) -> &str {
        &self.overview
    }

    pub fn director(&self) -> &str {
        &self.director
    }

    /// Value of a single column
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Date => &self.date,
            Field::Rating => &self.rating,
            Field::Genres => &self.genres,
            Field::Runtime => &self.runtime,
            Field::Overview => &self.overview,
            Field::Director => &self.director,
        }
    }

    /// Column/value pairs in export order
    pub fn entries(&self) -> [(Field, &str); 7] {
        Field::ALL.map(|field| (field, self.get(field)))
    }

    /// Fields that hold the `NA` placeholder
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field) == NOT_AVAILABLE)
            .collect()
    }

    /// Returns true if no column holds the placeholder
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
