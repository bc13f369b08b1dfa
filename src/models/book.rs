//! Book model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::author::AuthorView;

/// Stored book record. `author` and `genre` hold identifiers only; they
/// are not checked for existence when the book is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        book_url(self.id)
    }

    pub fn view(self) -> BookView {
        BookView {
            url: self.url(),
            book: self,
        }
    }
}

pub fn book_url(id: Uuid) -> String {
    format!("/catalog/book/{}", id)
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookView {
    #[serde(flatten)]
    pub book: Book,
    pub url: String,
}

/// Title-only projection used by selection lists and dependent listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookTitle {
    pub id: Uuid,
    pub title: String,
    /// Only present when the projection asked for it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl BookTitle {
    pub fn url(&self) -> String {
        book_url(self.id)
    }

    pub fn view(self) -> BookTitleView {
        BookTitleView {
            url: self.url(),
            book: self,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookTitleView {
    #[serde(flatten)]
    pub book: BookTitle,
    pub url: String,
}

/// Book list entry with its author resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    /// `None` when the referenced author no longer exists
    pub author: Option<AuthorView>,
}

/// Sanitized book form input
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct BookDraft {
    pub id: Option<Uuid>,
    pub title: String,
    pub author: Option<Uuid>,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct BookDocument<'a> {
    pub title: &'a str,
    pub author: Option<Uuid>,
    pub summary: &'a str,
    pub isbn: &'a str,
    pub genre: &'a [Uuid],
}

impl BookDraft {
    pub fn from_book(book: &Book) -> Self {
        Self {
            id: Some(book.id),
            title: book.title.clone(),
            author: Some(book.author),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.clone(),
        }
    }

    pub fn document(&self) -> BookDocument<'_> {
        BookDocument {
            title: &self.title,
            author: self.author,
            summary: &self.summary,
            isbn: &self.isbn,
            genre: &self.genre,
        }
    }
}
