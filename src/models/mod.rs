//! Domain models for the catalog.
//!
//! Display fields (names, canonical URLs, formatted dates) are pure
//! functions of entity state, computed at render time and never persisted.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

pub use author::Author;
pub use book::{Book, BookSummary};
pub use book_instance::{BookInstance, InstanceSummary, LoanStatus};
pub use genre::Genre;

use chrono::NaiveDate;

/// Display form for optional dates; empty string when absent.
pub(crate) fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// ISO form for optional dates (used as form input values); empty string
/// when absent.
pub(crate) fn iso_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}
