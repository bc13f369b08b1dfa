//! Catalog home: record counts

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::BookInstanceStatus,
    repository::{Collection, Filter, Repository},
};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogSummary {
    pub title: String,
    pub book_count: u64,
    pub book_instance_count: u64,
    pub book_instance_available_count: u64,
    pub author_count: u64,
    pub genre_count: u64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn summary(&self) -> AppResult<CatalogSummary> {
        let (books, instances, available, authors, genres) = tokio::try_join!(
            self.repository.count(Collection::Books, &Filter::All),
            self.repository.count(Collection::BookInstances, &Filter::All),
            self.repository
                .book_instances_count_by_status(BookInstanceStatus::Available),
            self.repository.count(Collection::Authors, &Filter::All),
            self.repository.count(Collection::Genres, &Filter::All),
        )?;

        Ok(CatalogSummary {
            title: "Local Library Home".to_string(),
            book_count: books,
            book_instance_count: instances,
            book_instance_available_count: available,
            author_count: authors,
            genre_count: genres,
        })
    }

    /// Cheap round trip to the store, used by the readiness check
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.count(Collection::Genres, &Filter::All).await?;
        Ok(())
    }
}
