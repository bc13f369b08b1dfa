//! Genre workflows

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{genre::genre_url, BookTitle, BookTitleView, Genre, GenreDraft, GenreView},
    repository::Repository,
    validation::{genre_form, FieldErrors, RawForm, Submission},
};

pub const GENRE_LIST_URL: &str = "/catalog/genres";

/// Form error for a rename onto a name another genre already holds
pub const DUPLICATE_NAME: &str = "Genre name is already in use";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreDetailPage {
    pub title: String,
    pub genre: GenreView,
    pub genre_books: Vec<BookTitleView>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreFormPage {
    pub title: String,
    pub genre: GenreDraft,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreDeletePage {
    pub title: String,
    pub genre: GenreView,
    pub genre_books: Vec<BookTitleView>,
}

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<GenreView>> {
        let genres = self.repository.genres_list().await?;
        Ok(genres.into_iter().map(Genre::view).collect())
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<GenreDetailPage> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get(id),
            self.repository.books_by_genre(id),
        )?;
        let genre = genre.ok_or_else(|| not_found(id))?;

        Ok(GenreDetailPage {
            title: "Genre Detail".to_string(),
            genre: genre.view(),
            genre_books: books.into_iter().map(BookTitle::view).collect(),
        })
    }

    pub async fn create_form(&self) -> AppResult<GenreFormPage> {
        Ok(form_page("Create Genre", GenreDraft::default(), FieldErrors::default()))
    }

    /// Create a genre, or send the caller to an existing genre with the
    /// same name ignoring case. Lookup and insert are separate store calls,
    /// so two simultaneous submissions can both insert.
    pub async fn create_submit(&self, raw: &RawForm) -> AppResult<FormOutcome<GenreFormPage>> {
        let Submission { draft, errors } = genre_form(raw);
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid(form_page("Create Genre", draft, errors)));
        }

        if let Some(existing) = self.repository.genres_find_by_name(&draft.name).await? {
            tracing::info!(id = %existing.id, name = %existing.name, "genre already exists");
            return Ok(FormOutcome::Redirect(existing.url()));
        }

        let id = self.repository.genres_create(&draft).await?;
        tracing::info!(%id, name = %draft.name, "genre created");
        Ok(FormOutcome::Redirect(genre_url(id)))
    }

    pub async fn delete_form(&self, id: Uuid) -> AppResult<DeleteOutcome<GenreDeletePage>> {
        Ok(match self.delete_page(id).await? {
            Some(page) => DeleteOutcome::Confirm(page),
            None => DeleteOutcome::Redirect(GENRE_LIST_URL.to_string()),
        })
    }

    pub async fn delete_submit(&self, id: Uuid) -> AppResult<DeleteOutcome<GenreDeletePage>> {
        let dependents = self.repository.books_count_by_genre(id).await?;
        if dependents > 0 {
            tracing::info!(%id, dependents, "genre delete refused: books still reference it");
            return Ok(match self.delete_page(id).await? {
                Some(page) => DeleteOutcome::Blocked(page),
                None => DeleteOutcome::Redirect(GENRE_LIST_URL.to_string()),
            });
        }

        if self.repository.genres_delete(id).await? {
            tracing::info!(%id, "genre deleted");
        }
        Ok(DeleteOutcome::Redirect(GENRE_LIST_URL.to_string()))
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<GenreFormPage> {
        let genre = self
            .repository
            .genres_get(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(form_page("Update Genre", GenreDraft::from_genre(&genre), FieldErrors::default()))
    }

    /// Rename in place. A name held by another genre, ignoring case, is
    /// rejected on the form; changing only the case of its own name is allowed.
    pub async fn update_submit(&self, id: Uuid, raw: &RawForm) -> AppResult<FormOutcome<GenreFormPage>> {
        let Submission { mut draft, mut errors } = genre_form(raw);
        draft.id = Some(id);
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid(form_page("Update Genre", draft, errors)));
        }

        if let Some(existing) = self.repository.genres_find_by_name(&draft.name).await? {
            if existing.id != id {
                tracing::info!(%id, other = %existing.id, "genre rename refused: name in use");
                errors.check("name", false, DUPLICATE_NAME);
                return Ok(FormOutcome::Invalid(form_page("Update Genre", draft, errors)));
            }
        }

        self.repository.genres_update(id, &draft).await?;
        tracing::info!(%id, "genre updated");
        Ok(FormOutcome::Redirect(genre_url(id)))
    }

    async fn delete_page(&self, id: Uuid) -> AppResult<Option<GenreDeletePage>> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get(id),
            self.repository.books_by_genre(id),
        )?;
        Ok(genre.map(|genre| GenreDeletePage {
            title: "Delete Genre".to_string(),
            genre: genre.view(),
            genre_books: books.into_iter().map(BookTitle::view).collect(),
        }))
    }
}

fn form_page(title: &str, genre: GenreDraft, errors: FieldErrors) -> GenreFormPage {
    GenreFormPage {
        title: title.to_string(),
        genre,
        errors,
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Genre {} not found", id))
}
