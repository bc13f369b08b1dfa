//! Catalog workflows
//!
//! One service per entity, each exposing the same entry points: list,
//! detail, create (form + submit), update (form + submit) and delete
//! (form + submit). Form submissions answer with a [`FormOutcome`],
//! deletions with a [`DeleteOutcome`]; only terminal failures (missing
//! record on a read path, store errors) come back as `AppError`.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use crate::repository::Repository;

/// Result of a create/update submission
#[derive(Debug, Clone)]
pub enum FormOutcome<P> {
    /// Stored (or matched an existing record); go to this url
    Redirect(String),
    /// Validation failed; show the form again with the sanitized draft
    Invalid(P),
}

/// Result of a delete request or submission
#[derive(Debug, Clone)]
pub enum DeleteOutcome<P> {
    /// Ask the operator to confirm
    Confirm(P),
    /// Refused: other records still reference this one
    Blocked(P),
    /// Deleted, or nothing to delete; go to this url
    Redirect(String),
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository),
        }
    }
}
