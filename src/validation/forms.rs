//! Per-entity form definitions
//!
//! Each function sanitizes the raw fields of one entity form into a
//! draft and runs that form's rules in field order.

use uuid::Uuid;

use super::{rules, sanitize, FieldErrors, RawForm, Submission};
use crate::models::{format_date_iso, AuthorDraft, BookDraft, BookInstanceDraft, GenreDraft};

/// Optional date input as draft text, and whether it parsed. An accepted
/// date is normalized to `YYYY-MM-DD`; a rejected one is kept sanitized.
fn date_field(raw: &RawForm, key: &str) -> (String, bool) {
    let submitted = raw.get(key).unwrap_or_default();
    match rules::optional_date(submitted) {
        Ok(date) => (date.map(format_date_iso).unwrap_or_default(), true),
        Err(()) => (sanitize::text(Some(submitted)), false),
    }
}

pub fn author_form(raw: &RawForm) -> Submission<AuthorDraft> {
    let mut errors = FieldErrors::default();

    let first_name = sanitize::text(raw.get("first_name"));
    errors.check("first_name", rules::not_empty(&first_name), "First name must be specified.");
    errors.check(
        "first_name",
        rules::alphanumeric(&first_name),
        "First name has non-alphanumeric characters.",
    );

    let family_name = sanitize::text(raw.get("family_name"));
    errors.check("family_name", rules::not_empty(&family_name), "Family name must be specified.");
    errors.check(
        "family_name",
        rules::alphanumeric(&family_name),
        "Family name has non-alphanumeric characters.",
    );

    let (date_of_birth, birth_valid) = date_field(raw, "date_of_birth");
    errors.check("date_of_birth", birth_valid, "Invalid date of birth");

    let (date_of_death, death_valid) = date_field(raw, "date_of_death");
    errors.check("date_of_death", death_valid, "Invalid date of death");

    Submission {
        draft: AuthorDraft {
            id: None,
            first_name,
            family_name,
            date_of_birth,
            date_of_death,
        },
        errors,
    }
}

pub fn genre_form(raw: &RawForm) -> Submission<GenreDraft> {
    let mut errors = FieldErrors::default();

    // Length is measured on the trimmed text, before entities are expanded.
    let trimmed = sanitize::trim(raw.get("name").unwrap_or_default());
    errors.check(
        "name",
        rules::min_chars(trimmed, 3),
        "Genre name must contain at least 3 characters",
    );

    Submission {
        draft: GenreDraft {
            id: None,
            name: sanitize::escape(trimmed),
        },
        errors,
    }
}

/// Normalize the genre multi-select: absent, one value or many values all
/// become a list of identifiers with duplicates and blanks removed.
/// Returns the list and whether every submitted value was well-formed.
pub fn genre_selection(raw: &RawForm) -> (Vec<Uuid>, bool) {
    let mut selected = Vec::new();
    let mut well_formed = true;
    for value in raw.get_all("genre") {
        match rules::optional_reference(value) {
            Ok(Some(id)) if !selected.contains(&id) => selected.push(id),
            Ok(_) => {}
            Err(()) => well_formed = false,
        }
    }
    (selected, well_formed)
}

pub fn book_form(raw: &RawForm) -> Submission<BookDraft> {
    let (genre, genre_well_formed) = genre_selection(raw);
    let mut errors = FieldErrors::default();

    let title = sanitize::text(raw.get("title"));
    errors.check("title", rules::not_empty(&title), "Title must not be empty.");

    let author_raw = sanitize::text(raw.get("author"));
    errors.check("author", rules::not_empty(&author_raw), "Author must not be empty.");
    let author = rules::optional_reference(&author_raw);
    errors.check("author", author.is_ok(), "Author is not a valid identifier");

    let summary = sanitize::text(raw.get("summary"));
    errors.check("summary", rules::not_empty(&summary), "Summary must not be empty.");

    let isbn = sanitize::text(raw.get("isbn"));
    errors.check("isbn", rules::not_empty(&isbn), "ISBN must not be empty");

    errors.check("genre", genre_well_formed, "Genre selection is not a valid identifier");

    Submission {
        draft: BookDraft {
            id: None,
            title,
            author: author.unwrap_or_default(),
            summary,
            isbn,
            genre,
        },
        errors,
    }
}

pub fn book_instance_form(raw: &RawForm) -> Submission<BookInstanceDraft> {
    let mut errors = FieldErrors::default();

    let book_raw = sanitize::text(raw.get("book"));
    errors.check("book", rules::not_empty(&book_raw), "Book must be specified");
    let book = rules::optional_reference(&book_raw);
    errors.check("book", book.is_ok(), "Book is not a valid identifier");

    let imprint = sanitize::text(raw.get("imprint"));
    errors.check("imprint", rules::not_empty(&imprint), "Imprint must be specified");

    // Domain membership is checked by the schema when the draft is stored.
    let status = sanitize::text(raw.get("status"));

    let (due_back, due_back_valid) = date_field(raw, "due_back");
    errors.check("due_back", due_back_valid, "Invalid date");

    Submission {
        draft: BookInstanceDraft {
            id: None,
            book: book.unwrap_or_default(),
            imprint,
            status,
            due_back,
        },
        errors,
    }
}
