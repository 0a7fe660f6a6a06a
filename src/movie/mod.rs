//! Movie data model
//!
//! This module defines the exported record, the column identifiers, and the
//! diagnostics produced when a column falls back to the `NA` placeholder.

mod diagnostic;
mod field;
mod record;

pub use diagnostic::{Diagnostic, MissReason};
pub use field::Field;
pub use record::{DetailFields, MovieRecord, NOT_AVAILABLE};
