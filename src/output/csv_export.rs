//! CSV export of movie records
//!
//! One row per record, columns in the fixed order
//! Title, Date, Rating, Genres, Runtime, Overview, Director.

use crate::movie::{Field, MovieRecord};
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes records to a CSV file, replacing any existing file
///
/// # Arguments
///
/// * `records` - Records in export order
/// * `output_path` - Path where the CSV file should be written
pub fn write_csv(records: &[MovieRecord], output_path: &Path) -> OutputResult<()> {
    let file = File::create(output_path)?;
    write_records(records, file)
}

/// Writes records as CSV to any writer
///
/// The header row is always written, even when there are no records.
pub fn write_records<W: Write>(records: &[MovieRecord], writer: W) -> OutputResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(Field::ALL.map(|field| field.column_name()))?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Formats records as a CSV string
pub fn format_csv(records: &[MovieRecord]) -> OutputResult<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
