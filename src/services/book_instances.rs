//! Book instance workflows

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::book_instance_url, BookInstanceDraft, BookInstanceStatus, BookTitle, BookTitleView,
        PopulatedBookInstance,
    },
    repository::Repository,
    validation::{book_instance_form, FieldErrors, RawForm, Submission},
};

pub const BOOK_INSTANCE_LIST_URL: &str = "/catalog/bookinstances";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceDetailPage {
    pub title: String,
    pub book_instance: PopulatedBookInstance,
}

/// Book choice on the copy form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookOption {
    #[serde(flatten)]
    pub book: BookTitleView,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceFormPage {
    pub title: String,
    pub book_instance: BookInstanceDraft,
    pub book_list: Vec<BookOption>,
    pub statuses: Vec<BookInstanceStatus>,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceDeletePage {
    pub title: String,
    pub book_instance: PopulatedBookInstance,
}

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<PopulatedBookInstance>> {
        self.repository.book_instances_list().await
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookInstanceDetailPage> {
        let instance = self
            .repository
            .book_instances_get_populated(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let title = match &instance.book_title {
            Some(book) => format!("Copy: {}", book.book.title),
            None => "Copy".to_string(),
        };
        Ok(BookInstanceDetailPage {
            title,
            book_instance: instance,
        })
    }

    pub async fn create_form(&self) -> AppResult<BookInstanceFormPage> {
        self.form_page("Create BookInstance", BookInstanceDraft::default(), FieldErrors::default())
            .await
    }

    /// Store a new copy. Status and due date defaults are applied here;
    /// a status outside the four known values is rejected before writing.
    pub async fn create_submit(&self, raw: &RawForm) -> AppResult<FormOutcome<BookInstanceFormPage>> {
        let Submission { draft, errors } = book_instance_form(raw);
        if !errors.is_empty() {
            let page = self.form_page("Create BookInstance", draft, errors).await?;
            return Ok(FormOutcome::Invalid(page));
        }

        let id = self.repository.book_instances_create(&draft, Utc::now()).await?;
        tracing::info!(%id, "book instance created");
        Ok(FormOutcome::Redirect(book_instance_url(id)))
    }

    pub async fn delete_form(&self, id: Uuid) -> AppResult<DeleteOutcome<BookInstanceDeletePage>> {
        Ok(match self.repository.book_instances_get_populated(id).await? {
            Some(instance) => DeleteOutcome::Confirm(BookInstanceDeletePage {
                title: "Delete BookInstance".to_string(),
                book_instance: instance,
            }),
            None => DeleteOutcome::Redirect(BOOK_INSTANCE_LIST_URL.to_string()),
        })
    }

    /// Copies have no dependents: deletion always goes through
    pub async fn delete_submit(&self, id: Uuid) -> AppResult<DeleteOutcome<BookInstanceDeletePage>> {
        if self.repository.book_instances_delete(id).await? {
            tracing::info!(%id, "book instance deleted");
        }
        Ok(DeleteOutcome::Redirect(BOOK_INSTANCE_LIST_URL.to_string()))
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<BookInstanceFormPage> {
        let (instance, books) = tokio::try_join!(
            self.repository.book_instances_get(id),
            self.repository.books_titles(),
        )?;
        let instance = instance.ok_or_else(|| not_found(id))?;
        Ok(build_form_page(
            "Update BookInstance",
            BookInstanceDraft::from_book_instance(&instance),
            books,
            FieldErrors::default(),
        ))
    }

    pub async fn update_submit(&self, id: Uuid, raw: &RawForm) -> AppResult<FormOutcome<BookInstanceFormPage>> {
        let Submission { mut draft, errors } = book_instance_form(raw);
        draft.id = Some(id);
        if !errors.is_empty() {
            let page = self.form_page("Update BookInstance", draft, errors).await?;
            return Ok(FormOutcome::Invalid(page));
        }

        self.repository.book_instances_update(id, &draft, Utc::now()).await?;
        tracing::info!(%id, "book instance updated");
        Ok(FormOutcome::Redirect(book_instance_url(id)))
    }

    async fn form_page(&self, title: &str, draft: BookInstanceDraft, errors: FieldErrors) -> AppResult<BookInstanceFormPage> {
        let books = self.repository.books_titles().await?;
        Ok(build_form_page(title, draft, books, errors))
    }
}

fn build_form_page(
    title: &str,
    draft: BookInstanceDraft,
    books: Vec<BookTitle>,
    errors: FieldErrors,
) -> BookInstanceFormPage {
    let book_list = books
        .into_iter()
        .map(|book| BookOption {
            selected: draft.book == Some(book.id),
            book: book.view(),
        })
        .collect();

    BookInstanceFormPage {
        title: title.to_string(),
        book_instance: draft,
        book_list,
        statuses: BookInstanceStatus::ALL.to_vec(),
        errors,
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Book copy {} not found", id))
}
