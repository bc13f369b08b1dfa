//! Author workflows

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::author_url,
        Author, AuthorDraft, AuthorView, BookTitle, BookTitleView,
    },
    repository::Repository,
    validation::{author_form, FieldErrors, RawForm, Submission},
};

pub const AUTHOR_LIST_URL: &str = "/catalog/authors";

/// Author detail: the author and the books they wrote
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetailPage {
    pub title: String,
    pub author: AuthorView,
    pub author_books: Vec<BookTitleView>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorFormPage {
    pub title: String,
    pub author: AuthorDraft,
    pub errors: FieldErrors,
}

/// Delete confirmation; `author_books` lists what blocks the deletion
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDeletePage {
    pub title: String,
    pub author: AuthorView,
    pub author_books: Vec<BookTitleView>,
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<AuthorView>> {
        let authors = self.repository.authors_list().await?;
        Ok(authors.into_iter().map(Author::view).collect())
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<AuthorDetailPage> {
        let (author, books) = tokio::try_join!(
            self.repository.authors_get(id),
            self.repository.books_by_author(id),
        )?;
        let author = author.ok_or_else(|| not_found(id))?;

        Ok(AuthorDetailPage {
            title: "Author Detail".to_string(),
            author: author.view(),
            author_books: books.into_iter().map(BookTitle::view).collect(),
        })
    }

    pub async fn create_form(&self) -> AppResult<AuthorFormPage> {
        Ok(form_page("Create Author", AuthorDraft::default(), FieldErrors::default()))
    }

    pub async fn create_submit(&self, raw: &RawForm) -> AppResult<FormOutcome<AuthorFormPage>> {
        let Submission { draft, errors } = author_form(raw);
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid(form_page("Create Author", draft, errors)));
        }

        let id = self.repository.authors_create(&draft).await?;
        tracing::info!(%id, "author created");
        Ok(FormOutcome::Redirect(author_url(id)))
    }

    pub async fn delete_form(&self, id: Uuid) -> AppResult<DeleteOutcome<AuthorDeletePage>> {
        Ok(match self.delete_page(id).await? {
            Some(page) => DeleteOutcome::Confirm(page),
            None => DeleteOutcome::Redirect(AUTHOR_LIST_URL.to_string()),
        })
    }

    /// Delete unless books still reference the author. Count and delete
    /// are separate store calls.
    pub async fn delete_submit(&self, id: Uuid) -> AppResult<DeleteOutcome<AuthorDeletePage>> {
        let dependents = self.repository.books_count_by_author(id).await?;
        if dependents > 0 {
            tracing::info!(%id, dependents, "author delete refused: books still reference it");
            return Ok(match self.delete_page(id).await? {
                Some(page) => DeleteOutcome::Blocked(page),
                None => DeleteOutcome::Redirect(AUTHOR_LIST_URL.to_string()),
            });
        }

        if self.repository.authors_delete(id).await? {
            tracing::info!(%id, "author deleted");
        }
        Ok(DeleteOutcome::Redirect(AUTHOR_LIST_URL.to_string()))
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<AuthorFormPage> {
        let author = self
            .repository
            .authors_get(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(form_page(
            "Update Author",
            AuthorDraft::from_author(&author),
            FieldErrors::default(),
        ))
    }

    pub async fn update_submit(&self, id: Uuid, raw: &RawForm) -> AppResult<FormOutcome<AuthorFormPage>> {
        let Submission { mut draft, errors } = author_form(raw);
        draft.id = Some(id);
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid(form_page("Update Author", draft, errors)));
        }

        self.repository.authors_update(id, &draft).await?;
        tracing::info!(%id, "author updated");
        Ok(FormOutcome::Redirect(author_url(id)))
    }

    async fn delete_page(&self, id: Uuid) -> AppResult<Option<AuthorDeletePage>> {
        let (author, books) = tokio::try_join!(
            self.repository.authors_get(id),
            self.repository.books_by_author(id),
        )?;
        Ok(author.map(|author| AuthorDeletePage {
            title: "Delete Author".to_string(),
            author: author.view(),
            author_books: books.into_iter().map(BookTitle::view).collect(),
        }))
    }
}

fn form_page(title: &str, author: AuthorDraft, errors: FieldErrors) -> AuthorFormPage {
    AuthorFormPage {
        title: title.to_string(),
        author,
        errors,
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Author {} not found", id))
}
