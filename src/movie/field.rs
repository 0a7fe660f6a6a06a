//! Column identifiers for movie records

use std::fmt;

/// One of the seven columns of a movie record
///
/// Variants are declared in export column order, so the derived ordering
/// matches the order of the CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Date,
    Rating,
    Genres,
    Runtime,
    Overview,
    Director,
}

impl Field {
    /// Every field, in export column order
    pub const ALL: [Field; 7] = [
        Field::Title,
        Field::Date,
        Field::Rating,
        Field::Genres,
        Field::Runtime,
        Field::Overview,
        Field::Director,
    ];

    /// Fields that are read from the detail page rather than the listing card
    pub const DETAIL: [Field; 5] = [
        Field::Rating,
        Field::Genres,
        Field::Runtime,
        Field::Overview,
        Field::Director,
    ];

    /// Column header for this field
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Date => "Date",
            Field::Rating => "Rating",
            Field::Genres => "Genres",
            Field::Runtime => "Runtime",
            Field::Overview => "Overview",
            Field::Director => "Director",
        }
    }

    /// Lowercase name used in log events
    pub fn log_name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Date => "date",
            Field::Rating => "rating",
            Field::Genres => "genres",
            Field::Runtime => "runtime",
            Field::Overview => "overview",
            Field::Director => "director",
        }
    }

    /// Whether this field comes from the detail page
    pub fn is_detail(&self) -> bool {
        Field::DETAIL.contains(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.log_name())
    }
}
