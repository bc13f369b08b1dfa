//! HTTP handlers for the catalog
//!
//! Pages are returned as JSON. Redirect outcomes become `303 See Other`.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;
pub mod openapi;

use axum::{
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    services::{DeleteOutcome, FormOutcome},
    validation::RawForm,
    AppState,
};

/// Url-encoded body kept as ordered pairs, repeated keys included
pub type FormFields = Form<Vec<(String, String)>>;

impl From<FormFields> for RawForm {
    fn from(Form(fields): FormFields) -> Self {
        RawForm::from(fields)
    }
}

impl<P: Serialize> IntoResponse for FormOutcome<P> {
    fn into_response(self) -> Response {
        match self {
            FormOutcome::Redirect(url) => Redirect::to(&url).into_response(),
            FormOutcome::Invalid(page) => Json(page).into_response(),
        }
    }
}

impl<P: Serialize> IntoResponse for DeleteOutcome<P> {
    fn into_response(self) -> Response {
        match self {
            DeleteOutcome::Confirm(page) | DeleteOutcome::Blocked(page) => Json(page).into_response(),
            DeleteOutcome::Redirect(url) => Redirect::to(&url).into_response(),
        }
    }
}

/// Build the application router with all routes
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route("/author/create", get(authors::create_author_form).post(authors::create_author))
        .route("/author/:id", get(authors::get_author))
        .route("/author/:id/delete", get(authors::delete_author_form).post(authors::delete_author))
        .route("/author/:id/update", get(authors::update_author_form).post(authors::update_author))
        // Genres
        .route("/genres", get(genres::list_genres))
        .route("/genre/create", get(genres::create_genre_form).post(genres::create_genre))
        .route("/genre/:id", get(genres::get_genre))
        .route("/genre/:id/delete", get(genres::delete_genre_form).post(genres::delete_genre))
        .route("/genre/:id/update", get(genres::update_genre_form).post(genres::update_genre))
        // Books
        .route("/books", get(books::list_books))
        .route("/book/create", get(books::create_book_form).post(books::create_book))
        .route("/book/:id", get(books::get_book))
        .route("/book/:id/delete", get(books::delete_book_form).post(books::delete_book))
        .route("/book/:id/update", get(books::update_book_form).post(books::update_book))
        // Book instances
        .route("/bookinstances", get(book_instances::list_book_instances))
        .route(
            "/bookinstance/create",
            get(book_instances::create_book_instance_form).post(book_instances::create_book_instance),
        )
        .route("/bookinstance/:id", get(book_instances::get_book_instance))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_book_instance_form).post(book_instances::delete_book_instance),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_book_instance_form).post(book_instances::update_book_instance),
        );

    let app = Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
