//! Book endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::FormFields;
use crate::{
    error::AppResult,
    models::BookSummary,
    services::{
        books::{BookDeletePage, BookDetailPage, BookFormPage},
        DeleteOutcome, FormOutcome,
    },
    AppState,
};

/// List books by title, with their authors
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<BookSummary>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<BookSummary>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Book with author, genres and copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetailPage),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<BookDetailPage>> {
    let page = state.services.books.detail(id).await?;
    Ok(Json(page))
}

/// Empty book form with the author and genre choices
#[utoipa::path(
    get,
    path = "/catalog/book/create",
    tag = "books",
    responses(
        (status = 200, description = "Book form", body = BookFormPage)
    )
)]
pub async fn create_book_form(State(state): State<AppState>) -> AppResult<Json<BookFormPage>> {
    let page = state.services.books.create_form().await?;
    Ok(Json(page))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/catalog/book/create",
    tag = "books",
    request_body(content = String, content_type = "application/x-www-form-urlencoded",
        description = "title, author, summary, isbn, genre (repeatable)"),
    responses(
        (status = 303, description = "Created, redirect to the book"),
        (status = 200, description = "Validation failed", body = BookFormPage)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    form: FormFields,
) -> AppResult<FormOutcome<BookFormPage>> {
    state.services.books.create_submit(&form.into()).await
}

#[utoipa::path(
    get,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book and the copies blocking deletion", body = BookDeletePage),
        (status = 303, description = "Book does not exist, redirect to the list")
    )
)]
pub async fn delete_book_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<DeleteOutcome<BookDeletePage>> {
    state.services.books.delete_form(id).await
}

/// Delete a book that has no copies left
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the list"),
        (status = 200, description = "Refused, copies of the book still exist", body = BookDeletePage)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<DeleteOutcome<BookDeletePage>> {
    state.services.books.delete_submit(id).await
}

#[utoipa::path(
    get,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book form", body = BookFormPage),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_form(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<BookFormPage>> {
    let page = state.services.books.update_form(id).await?;
    Ok(Json(page))
}

/// Replace a book; the genre set is taken as submitted
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    request_body(content = String, content_type = "application/x-www-form-urlencoded",
        description = "title, author, summary, isbn, genre (repeatable)"),
    responses(
        (status = 303, description = "Updated, redirect to the book"),
        (status = 200, description = "Validation failed", body = BookFormPage),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    form: FormFields,
) -> AppResult<FormOutcome<BookFormPage>> {
    state.services.books.update_submit(id, &form.into()).await
}
