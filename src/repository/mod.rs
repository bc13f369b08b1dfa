//! Repository layer for document store operations
//!
//! The catalog keeps its records in a schemaless document store. The
//! [`DocumentStore`] trait is the whole contract expected from a backend;
//! [`Repository`] layers typed, per-entity queries on top of it and
//! resolves references between documents.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Document collections of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Authors,
    Genres,
    Books,
    BookInstances,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Authors => "authors",
            Collection::Genres => "genres",
            Collection::Books => "books",
            Collection::BookInstances => "bookinstances",
        }
    }
}

/// Document selection
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Filter {
    #[default]
    All,
    /// Field equals the value, or the field is an array containing it
    Eq(&'static str, Value),
    /// String field equals the value ignoring case
    EqIgnoreCase(&'static str, String),
    /// Document id is one of the listed ids
    IdIn(Vec<Uuid>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub descending: bool,
}

/// Filtered, sorted and optionally projected find
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filter: Filter,
    pub sort: Vec<SortKey>,
    /// Fields to keep in returned bodies; `None` keeps the whole document
    pub projection: Option<Vec<&'static str>>,
}

impl FindQuery {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn all() -> Self {
        Self::new(Filter::All)
    }

    pub fn sort_asc(mut self, field: &'static str) -> Self {
        self.sort.push(SortKey {
            field,
            descending: false,
        });
        self
    }

    pub fn project(mut self, fields: &[&'static str]) -> Self {
        self.projection = Some(fields.to_vec());
        self
    }
}

/// A stored document: store-assigned id plus its body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub body: Value,
}

impl Document {
    /// Deserialize into a record type, exposing the id as an `id` field
    pub fn decode<T: DeserializeOwned>(self) -> AppResult<T> {
        let mut body = match self.body {
            Value::Object(map) => map,
            other => {
                return Err(AppError::Internal(format!(
                    "document {} has a non-object body: {}",
                    self.id, other
                )))
            }
        };
        body.insert("id".to_string(), Value::String(self.id.to_string()));
        Ok(serde_json::from_value(Value::Object(body))?)
    }
}

/// Operations the catalog needs from a document store.
///
/// Every call is atomic on its own; nothing spans two calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_by_id(&self, collection: Collection, id: Uuid) -> AppResult<Option<Document>>;

    async fn find(&self, collection: Collection, query: &FindQuery) -> AppResult<Vec<Document>>;

    async fn count(&self, collection: Collection, filter: &Filter) -> AppResult<u64>;

    /// Insert a new document and return its freshly assigned id
    async fn insert(&self, collection: Collection, body: Value) -> AppResult<Uuid>;

    /// Replace the body of an existing document. `false` if it is absent.
    async fn update(&self, collection: Collection, id: Uuid, body: Value) -> AppResult<bool>;

    /// Remove a document. `false` if it was already absent.
    async fn delete(&self, collection: Collection, id: Uuid) -> AppResult<bool>;

    /// Release the underlying connections
    async fn close(&self);
}

/// Typed access to the catalog collections
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
}

impl Repository {
    /// Create a new repository on top of an opened store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn close(&self) {
        self.store.close().await;
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, collection: Collection, id: Uuid) -> AppResult<Option<T>> {
        self.store
            .find_by_id(collection, id)
            .await?
            .map(Document::decode)
            .transpose()
    }

    pub(crate) async fn find<T: DeserializeOwned>(&self, collection: Collection, query: &FindQuery) -> AppResult<Vec<T>> {
        self.store
            .find(collection, query)
            .await?
            .into_iter()
            .map(Document::decode)
            .collect()
    }

    pub(crate) async fn insert<B: Serialize>(&self, collection: Collection, body: &B) -> AppResult<Uuid> {
        let id = self.store.insert(collection, serde_json::to_value(body)?).await?;
        tracing::debug!(collection = collection.name(), %id, "document inserted");
        Ok(id)
    }

    /// Replace a document in place; NotFound if it vanished
    pub(crate) async fn replace<B: Serialize>(&self, collection: Collection, id: Uuid, body: &B) -> AppResult<()> {
        if !self.store.update(collection, id, serde_json::to_value(body)?).await? {
            return Err(AppError::NotFound(format!("{} {} not found", collection.name(), id)));
        }
        tracing::debug!(collection = collection.name(), %id, "document updated");
        Ok(())
    }

    pub(crate) async fn remove(&self, collection: Collection, id: Uuid) -> AppResult<bool> {
        let removed = self.store.delete(collection, id).await?;
        tracing::debug!(collection = collection.name(), %id, removed, "document delete");
        Ok(removed)
    }

    /// Resolve a set of references into records keyed by id. Dangling
    /// references are simply missing from the map.
    pub(crate) async fn populate<T, F>(&self, collection: Collection, ids: Vec<Uuid>, key: F) -> AppResult<HashMap<Uuid, T>>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> Uuid,
    {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let records: Vec<T> = self.find(collection, &FindQuery::new(Filter::IdIn(ids))).await?;
        Ok(records.into_iter().map(|r| (key(&r), r)).collect())
    }

    pub async fn count(&self, collection: Collection, filter: &Filter) -> AppResult<u64> {
        self.store.count(collection, filter).await
    }
}

/// Collect unique ids in first-seen order
pub(crate) fn unique_ids(ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
    let mut out: Vec<Uuid> = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
