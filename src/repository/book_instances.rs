//! Book instance domain methods on Repository

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use super::{unique_ids, Collection, Filter, FindQuery, Repository};
use crate::{
    error::AppResult,
    models::{
        book::BookTitle,
        book_instance::{BookInstance, BookInstanceDraft, BookInstanceStatus, PopulatedBookInstance},
    },
};

impl Repository {
    /// List every copy in natural order with its book title populated
    pub async fn book_instances_list(&self) -> AppResult<Vec<PopulatedBookInstance>> {
        let instances: Vec<BookInstance> = self.find(Collection::BookInstances, &FindQuery::all()).await?;
        self.book_instances_populate(instances).await
    }

    pub async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        self.get(Collection::BookInstances, id).await
    }

    /// Get one copy with its book title populated
    pub async fn book_instances_get_populated(&self, id: Uuid) -> AppResult<Option<PopulatedBookInstance>> {
        let Some(instance) = self.book_instances_get(id).await? else {
            return Ok(None);
        };
        Ok(self.book_instances_populate(vec![instance]).await?.pop())
    }

    /// Copies of a given book
    pub async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let query = FindQuery::new(Filter::Eq("book", json!(book_id)));
        self.find(Collection::BookInstances, &query).await
    }

    pub async fn book_instances_count_by_book(&self, book_id: Uuid) -> AppResult<u64> {
        self.count(Collection::BookInstances, &Filter::Eq("book", json!(book_id)))
            .await
    }

    pub async fn book_instances_count_by_status(&self, status: BookInstanceStatus) -> AppResult<u64> {
        self.count(Collection::BookInstances, &Filter::Eq("status", json!(status)))
            .await
    }

    pub async fn book_instances_create(&self, draft: &BookInstanceDraft, now: DateTime<Utc>) -> AppResult<Uuid> {
        self.insert(Collection::BookInstances, &draft.document(now)?).await
    }

    pub async fn book_instances_update(&self, id: Uuid, draft: &BookInstanceDraft, now: DateTime<Utc>) -> AppResult<()> {
        self.replace(Collection::BookInstances, id, &draft.document(now)?).await
    }

    pub async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool> {
        self.remove(Collection::BookInstances, id).await
    }

    async fn book_instances_populate(&self, instances: Vec<BookInstance>) -> AppResult<Vec<PopulatedBookInstance>> {
        let book_ids = unique_ids(instances.iter().map(|i| i.book));
        let books = self
            .populate(Collection::Books, book_ids, |b: &BookTitle| b.id)
            .await?;

        Ok(instances
            .into_iter()
            .map(|instance| PopulatedBookInstance {
                book_title: books.get(&instance.book).cloned().map(BookTitle::view),
                book_instance: instance.view(),
            })
            .collect())
    }
}
