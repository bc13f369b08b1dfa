//! Author endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::FormFields;
use crate::{
    error::AppResult,
    models::AuthorView,
    services::{
        authors::{AuthorDeletePage, AuthorDetailPage, AuthorFormPage},
        DeleteOutcome, FormOutcome,
    },
    AppState,
};

/// List authors sorted by family name
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "All authors", body = Vec<AuthorView>)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<Vec<AuthorView>>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(authors))
}

/// Author with the books they wrote
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorDetailPage),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<AuthorDetailPage>> {
    let page = state.services.authors.detail(id).await?;
    Ok(Json(page))
}

/// Empty author form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses(
        (status = 200, description = "Author form", body = AuthorFormPage)
    )
)]
pub async fn create_author_form(State(state): State<AppState>) -> AppResult<Json<AuthorFormPage>> {
    let page = state.services.authors.create_form().await?;
    Ok(Json(page))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    request_body(content = String, content_type = "application/x-www-form-urlencoded",
        description = "first_name, family_name, date_of_birth, date_of_death"),
    responses(
        (status = 303, description = "Created, redirect to the author"),
        (status = 200, description = "Validation failed", body = AuthorFormPage)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    form: FormFields,
) -> AppResult<FormOutcome<AuthorFormPage>> {
    state.services.authors.create_submit(&form.into()).await
}

/// Delete confirmation page
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author and the books blocking deletion", body = AuthorDeletePage),
        (status = 303, description = "Author does not exist, redirect to the list")
    )
)]
pub async fn delete_author_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<DeleteOutcome<AuthorDeletePage>> {
    state.services.authors.delete_form(id).await
}

/// Delete an author that no book references
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the list"),
        (status = 200, description = "Refused, books still reference the author", body = AuthorDeletePage)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<DeleteOutcome<AuthorDeletePage>> {
    state.services.authors.delete_submit(id).await
}

/// Author form filled with the stored record
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author form", body = AuthorFormPage),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AuthorFormPage>> {
    let page = state.services.authors.update_form(id).await?;
    Ok(Json(page))
}

/// Replace an author
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    request_body(content = String, content_type = "application/x-www-form-urlencoded",
        description = "first_name, family_name, date_of_birth, date_of_death"),
    responses(
        (status = 303, description = "Updated, redirect to the author"),
        (status = 200, description = "Validation failed", body = AuthorFormPage),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    form: FormFields,
) -> AppResult<FormOutcome<AuthorFormPage>> {
    state.services.authors.update_submit(id, &form.into()).await
}
