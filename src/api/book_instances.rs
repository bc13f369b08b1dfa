//! Book instance (copy) endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::FormFields;
use crate::{
    error::AppResult,
    models::PopulatedBookInstance,
    services::{
        book_instances::{BookInstanceDeletePage, BookInstanceDetailPage, BookInstanceFormPage},
        DeleteOutcome, FormOutcome,
    },
    AppState,
};

/// List every copy with its book title
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "All copies", body = Vec<PopulatedBookInstance>)
    )
)]
pub async fn list_book_instances(State(state): State<AppState>) -> AppResult<Json<Vec<PopulatedBookInstance>>> {
    let instances = state.services.book_instances.list().await?;
    Ok(Json(instances))
}

#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Copy details", body = BookInstanceDetailPage),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookInstanceDetailPage>> {
    let page = state.services.book_instances.detail(id).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Copy form", body = BookInstanceFormPage)
    )
)]
pub async fn create_book_instance_form(State(state): State<AppState>) -> AppResult<Json<BookInstanceFormPage>> {
    let page = state.services.book_instances.create_form().await?;
    Ok(Json(page))
}

/// Register a new copy of a book
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    request_body(content = String, content_type = "application/x-www-form-urlencoded",
        description = "book, imprint, status, due_back"),
    responses(
        (status = 303, description = "Created, redirect to the copy"),
        (status = 200, description = "Validation failed", body = BookInstanceFormPage),
        (status = 400, description = "Unknown status", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book_instance(
    State(state): State<AppState>,
    form: FormFields,
) -> AppResult<FormOutcome<BookInstanceFormPage>> {
    state.services.book_instances.create_submit(&form.into()).await
}

#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Delete confirmation", body = BookInstanceDeletePage),
        (status = 303, description = "Copy does not exist, redirect to the list")
    )
)]
pub async fn delete_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<DeleteOutcome<BookInstanceDeletePage>> {
    state.services.book_instances.delete_form(id).await
}

#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the list")
    )
)]
pub async fn delete_book_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<DeleteOutcome<BookInstanceDeletePage>> {
    state.services.book_instances.delete_submit(id).await
}

#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Copy form", body = BookInstanceFormPage),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookInstanceFormPage>> {
    let page = state.services.book_instances.update_form(id).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    request_body(content = String, content_type = "application/x-www-form-urlencoded",
        description = "book, imprint, status, due_back"),
    responses(
        (status = 303, description = "Updated, redirect to the copy"),
        (status = 200, description = "Validation failed", body = BookInstanceFormPage),
        (status = 400, description = "Unknown status", body = crate::error::ErrorResponse),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    form: FormFields,
) -> AppResult<FormOutcome<BookInstanceFormPage>> {
    state.services.book_instances.update_submit(id, &form.into()).await
}
