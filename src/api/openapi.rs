//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, book_instances, books, catalog, genres, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog API",
        version = "1.0.0",
        description = "Local library catalog: authors, genres, books and their copies"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog
        catalog::index,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author_form,
        authors::create_author,
        authors::delete_author_form,
        authors::delete_author,
        authors::update_author_form,
        authors::update_author,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre_form,
        genres::create_genre,
        genres::delete_genre_form,
        genres::delete_genre,
        genres::update_genre_form,
        genres::update_genre,
        // Books
        books::list_books,
        books::get_book,
        books::create_book_form,
        books::create_book,
        books::delete_book_form,
        books::delete_book,
        books::update_book_form,
        books::update_book,
        // Book instances
        book_instances::list_book_instances,
        book_instances::get_book_instance,
        book_instances::create_book_instance_form,
        book_instances::create_book_instance,
        book_instances::delete_book_instance_form,
        book_instances::delete_book_instance,
        book_instances::update_book_instance_form,
        book_instances::update_book_instance,
    ),
    components(
        schemas(
            // Records
            crate::models::Author,
            crate::models::AuthorView,
            crate::models::AuthorDraft,
            crate::models::Genre,
            crate::models::GenreView,
            crate::models::GenreDraft,
            crate::models::Book,
            crate::models::BookView,
            crate::models::BookTitle,
            crate::models::BookTitleView,
            crate::models::BookSummary,
            crate::models::BookDraft,
            crate::models::BookInstance,
            crate::models::BookInstanceView,
            crate::models::BookInstanceDraft,
            crate::models::BookInstanceStatus,
            crate::models::PopulatedBookInstance,
            // Pages
            crate::services::catalog::CatalogSummary,
            crate::services::authors::AuthorDetailPage,
            crate::services::authors::AuthorFormPage,
            crate::services::authors::AuthorDeletePage,
            crate::services::genres::GenreDetailPage,
            crate::services::genres::GenreFormPage,
            crate::services::genres::GenreDeletePage,
            crate::services::books::BookDetailPage,
            crate::services::books::AuthorOption,
            crate::services::books::GenreOption,
            crate::services::books::BookFormPage,
            crate::services::books::BookDeletePage,
            crate::services::book_instances::BookInstanceDetailPage,
            crate::services::book_instances::BookOption,
            crate::services::book_instances::BookInstanceFormPage,
            crate::services::book_instances::BookInstanceDeletePage,
            // Validation
            crate::validation::FieldError,
            crate::validation::FieldErrors,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Catalog home"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre management"),
        (name = "books", description = "Book management"),
        (name = "bookinstances", description = "Book copy management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
