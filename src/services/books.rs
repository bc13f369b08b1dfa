//! Book workflows

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{
        book::book_url, Author, AuthorView, BookDraft, BookInstance, BookInstanceView, BookSummary, BookView,
        Genre, GenreView,
    },
    repository::Repository,
    validation::{book_form, FieldErrors, RawForm, Submission},
};

pub const BOOK_LIST_URL: &str = "/catalog/books";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetailPage {
    pub title: String,
    pub book: BookView,
    /// `None` when the referenced author no longer exists
    pub author: Option<AuthorView>,
    pub genres: Vec<GenreView>,
    pub book_instances: Vec<BookInstanceView>,
}

/// Author choice on the book form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorOption {
    #[serde(flatten)]
    pub author: AuthorView,
    pub selected: bool,
}

/// Genre checkbox on the book form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreOption {
    #[serde(flatten)]
    pub genre: GenreView,
    pub checked: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookFormPage {
    pub title: String,
    pub book: BookDraft,
    pub authors: Vec<AuthorOption>,
    pub genres: Vec<GenreOption>,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDeletePage {
    pub title: String,
    pub book: BookView,
    pub book_instances: Vec<BookInstanceView>,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookSummary>> {
        self.repository.books_list().await
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetailPage> {
        let (book, instances) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.book_instances_by_book(id),
        )?;
        let book = book.ok_or_else(|| not_found(id))?;

        let (author, genres) = tokio::try_join!(
            self.repository.authors_get(book.author),
            self.repository.genres_get_many(&book.genre),
        )?;

        Ok(BookDetailPage {
            title: book.title.clone(),
            book: book.view(),
            author: author.map(Author::view),
            genres: genres.into_iter().map(Genre::view).collect(),
            book_instances: instances.into_iter().map(BookInstance::view).collect(),
        })
    }

    pub async fn create_form(&self) -> AppResult<BookFormPage> {
        self.form_page("Create Book", BookDraft::default(), FieldErrors::default())
            .await
    }

    pub async fn create_submit(&self, raw: &RawForm) -> AppResult<FormOutcome<BookFormPage>> {
        let Submission { draft, errors } = book_form(raw);
        if !errors.is_empty() {
            let page = self.form_page("Create Book", draft, errors).await?;
            return Ok(FormOutcome::Invalid(page));
        }

        let id = self.repository.books_create(&draft).await?;
        tracing::info!(%id, title = %draft.title, "book created");
        Ok(FormOutcome::Redirect(book_url(id)))
    }

    pub async fn delete_form(&self, id: Uuid) -> AppResult<DeleteOutcome<BookDeletePage>> {
        Ok(match self.delete_page(id).await? {
            Some(page) => DeleteOutcome::Confirm(page),
            None => DeleteOutcome::Redirect(BOOK_LIST_URL.to_string()),
        })
    }

    /// Delete unless copies of the book still exist
    pub async fn delete_submit(&self, id: Uuid) -> AppResult<DeleteOutcome<BookDeletePage>> {
        let dependents = self.repository.book_instances_count_by_book(id).await?;
        if dependents > 0 {
            tracing::info!(%id, dependents, "book delete refused: copies still exist");
            return Ok(match self.delete_page(id).await? {
                Some(page) => DeleteOutcome::Blocked(page),
                None => DeleteOutcome::Redirect(BOOK_LIST_URL.to_string()),
            });
        }

        if self.repository.books_delete(id).await? {
            tracing::info!(%id, "book deleted");
        }
        Ok(DeleteOutcome::Redirect(BOOK_LIST_URL.to_string()))
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<BookFormPage> {
        let (book, authors, genres) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;
        let book = book.ok_or_else(|| not_found(id))?;
        Ok(build_form_page(
            "Update Book",
            BookDraft::from_book(&book),
            authors,
            genres,
            FieldErrors::default(),
        ))
    }

    /// Replace the book in place. The genre set is taken from the form as
    /// submitted, so deselecting every genre clears it.
    pub async fn update_submit(&self, id: Uuid, raw: &RawForm) -> AppResult<FormOutcome<BookFormPage>> {
        let Submission { mut draft, errors } = book_form(raw);
        draft.id = Some(id);
        if !errors.is_empty() {
            let page = self.form_page("Update Book", draft, errors).await?;
            return Ok(FormOutcome::Invalid(page));
        }

        self.repository.books_update(id, &draft).await?;
        tracing::info!(%id, "book updated");
        Ok(FormOutcome::Redirect(book_url(id)))
    }

    async fn form_page(&self, title: &str, draft: BookDraft, errors: FieldErrors) -> AppResult<BookFormPage> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;
        Ok(build_form_page(title, draft, authors, genres, errors))
    }

    async fn delete_page(&self, id: Uuid) -> AppResult<Option<BookDeletePage>> {
        let (book, instances) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.book_instances_by_book(id),
        )?;
        Ok(book.map(|book| BookDeletePage {
            title: "Delete Book".to_string(),
            book: book.view(),
            book_instances: instances.into_iter().map(BookInstance::view).collect(),
        }))
    }
}

/// Mark the draft's author as selected and its genres as checked
fn build_form_page(
    title: &str,
    draft: BookDraft,
    authors: Vec<Author>,
    genres: Vec<Genre>,
    errors: FieldErrors,
) -> BookFormPage {
    let authors = authors
        .into_iter()
        .map(|author| AuthorOption {
            selected: draft.author == Some(author.id),
            author: author.view(),
        })
        .collect();
    let genres = genres
        .into_iter()
        .map(|genre| GenreOption {
            checked: draft.genre.contains(&genre.id),
            genre: genre.view(),
        })
        .collect();

    BookFormPage {
        title: title.to_string(),
        book: draft,
        authors,
        genres,
        errors,
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}
