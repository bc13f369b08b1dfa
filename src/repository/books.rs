//! Book domain methods on Repository

use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::{unique_ids, Collection, Filter, FindQuery, Repository};
use crate::{
    error::AppResult,
    models::{
        author::Author,
        book::{Book, BookDraft, BookSummary, BookTitle},
    },
};

/// `title author` projection used by the book list
#[derive(Debug, Deserialize)]
struct BookListing {
    id: Uuid,
    title: String,
    author: Uuid,
}

impl Repository {
    /// List books ordered by title, with their authors populated
    pub async fn books_list(&self) -> AppResult<Vec<BookSummary>> {
        let query = FindQuery::all().sort_asc("title").project(&["title", "author"]);
        let listings: Vec<BookListing> = self.find(Collection::Books, &query).await?;

        let author_ids = unique_ids(listings.iter().map(|b| b.author));
        let authors = self
            .populate(Collection::Authors, author_ids, |a: &Author| a.id)
            .await?;

        Ok(listings
            .into_iter()
            .map(|listing| BookSummary {
                url: crate::models::book::book_url(listing.id),
                id: listing.id,
                title: listing.title,
                author: authors.get(&listing.author).cloned().map(Author::view),
            })
            .collect())
    }

    /// Titles of all books, for selection lists
    pub async fn books_titles(&self) -> AppResult<Vec<BookTitle>> {
        let query = FindQuery::all().sort_asc("title").project(&["title"]);
        self.find(Collection::Books, &query).await
    }

    pub async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>> {
        self.get(Collection::Books, id).await
    }

    /// Books written by an author (title and summary only)
    pub async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookTitle>> {
        let query = FindQuery::new(Filter::Eq("author", json!(author_id)))
            .sort_asc("title")
            .project(&["title", "summary"]);
        self.find(Collection::Books, &query).await
    }

    /// Books tagged with a genre (title and summary only)
    pub async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<BookTitle>> {
        let query = FindQuery::new(Filter::Eq("genre", json!(genre_id)))
            .sort_asc("title")
            .project(&["title", "summary"]);
        self.find(Collection::Books, &query).await
    }

    pub async fn books_count_by_author(&self, author_id: Uuid) -> AppResult<u64> {
        self.count(Collection::Books, &Filter::Eq("author", json!(author_id)))
            .await
    }

    pub async fn books_count_by_genre(&self, genre_id: Uuid) -> AppResult<u64> {
        self.count(Collection::Books, &Filter::Eq("genre", json!(genre_id)))
            .await
    }

    pub async fn books_create(&self, draft: &BookDraft) -> AppResult<Uuid> {
        self.insert(Collection::Books, &draft.document()).await
    }

    pub async fn books_update(&self, id: Uuid, draft: &BookDraft) -> AppResult<()> {
        self.replace(Collection::Books, id, &draft.document()).await
    }

    pub async fn books_delete(&self, id: Uuid) -> AppResult<bool> {
        self.remove(Collection::Books, id).await
    }
}
