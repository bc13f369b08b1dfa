//! Catalog entity schemas
//!
//! Stored fields live on the record types; derived attributes (display
//! names, urls, formatted dates) are computed on read by the `*View`
//! types and never written back to the store.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

// Re-export commonly used types
pub use author::{Author, AuthorDraft, AuthorView};
pub use book::{Book, BookDraft, BookSummary, BookTitle, BookTitleView, BookView};
pub use book_instance::{
    BookInstance, BookInstanceDraft, BookInstanceStatus, BookInstanceView, PopulatedBookInstance,
};
pub use genre::{Genre, GenreDraft, GenreView};

/// Medium date used on detail pages, e.g. `Oct 16, 2026`
pub fn format_date_med(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// ISO calendar date used to pre-fill date inputs
pub fn format_date_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Read back a date field of a validated draft: empty is "not provided",
/// anything else must be an ISO calendar date.
pub(crate) fn parse_draft_date(field: &str, value: &str) -> AppResult<Option<NaiveDate>> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::Validation(format!("{} '{}' is not a valid date", field, value)))
}
