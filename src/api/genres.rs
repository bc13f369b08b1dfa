//! Genre endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::FormFields;
use crate::{
    error::AppResult,
    models::GenreView,
    services::{
        genres::{GenreDeletePage, GenreDetailPage, GenreFormPage},
        DeleteOutcome, FormOutcome,
    },
    AppState,
};

/// List genres sorted by name
#[utoipa::path(
    get,
    path = "/catalog/genres",
    tag = "genres",
    responses(
        (status = 200, description = "All genres", body = Vec<GenreView>)
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<Vec<GenreView>>> {
    let genres = state.services.genres.list().await?;
    Ok(Json(genres))
}

/// Genre with the books filed under it
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre details", body = GenreDetailPage),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<GenreDetailPage>> {
    let page = state.services.genres.detail(id).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/catalog/genre/create",
    tag = "genres",
    responses(
        (status = 200, description = "Genre form", body = GenreFormPage)
    )
)]
pub async fn create_genre_form(State(state): State<AppState>) -> AppResult<Json<GenreFormPage>> {
    let page = state.services.genres.create_form().await?;
    Ok(Json(page))
}

/// Create a genre, or redirect to the one already carrying that name
#[utoipa::path(
    post,
    path = "/catalog/genre/create",
    tag = "genres",
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "name"),
    responses(
        (status = 303, description = "Created or already present, redirect to the genre"),
        (status = 200, description = "Validation failed", body = GenreFormPage)
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    form: FormFields,
) -> AppResult<FormOutcome<GenreFormPage>> {
    state.services.genres.create_submit(&form.into()).await
}

#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre and the books blocking deletion", body = GenreDeletePage),
        (status = 303, description = "Genre does not exist, redirect to the list")
    )
)]
pub async fn delete_genre_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<DeleteOutcome<GenreDeletePage>> {
    state.services.genres.delete_form(id).await
}

#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the list"),
        (status = 200, description = "Refused, books are still filed under the genre", body = GenreDeletePage)
    )
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<DeleteOutcome<GenreDeletePage>> {
    state.services.genres.delete_submit(id).await
}

#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre form", body = GenreFormPage),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<GenreFormPage>> {
    let page = state.services.genres.update_form(id).await?;
    Ok(Json(page))
}

/// Rename a genre
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "name"),
    responses(
        (status = 303, description = "Updated, redirect to the genre"),
        (status = 200, description = "Validation failed", body = GenreFormPage),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    form: FormFields,
) -> AppResult<FormOutcome<GenreFormPage>> {
    state.services.genres.update_submit(id, &form.into()).await
}
