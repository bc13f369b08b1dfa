//! In-memory document store for tests and development

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter, FindQuery, SortKey};
use crate::error::{AppError, AppResult};

type Documents = IndexMap<Uuid, Value>;

/// In-memory document store.
///
/// Documents keep insertion order, which is the natural order returned by
/// unsorted finds. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<HashMap<Collection, Documents>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<R>(&self, f: impl FnOnce(&HashMap<Collection, Documents>) -> R) -> AppResult<R> {
        let collections = self
            .collections
            .read()
            .map_err(|e| AppError::Internal(format!("Failed to acquire read lock: {}", e)))?;
        Ok(f(&collections))
    }

    fn write<R>(&self, f: impl FnOnce(&mut HashMap<Collection, Documents>) -> R) -> AppResult<R> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| AppError::Internal(format!("Failed to acquire write lock: {}", e)))?;
        Ok(f(&mut collections))
    }
}

fn filter_matches(id: &Uuid, body: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Eq(field, expected) => match body.get(*field) {
            Some(Value::Array(items)) => {
                items.contains(expected) || matches!(expected, Value::Array(e) if e == items)
            }
            Some(value) => value == expected,
            None => expected.is_null(),
        },
        Filter::EqIgnoreCase(field, expected) => body
            .get(*field)
            .and_then(Value::as_str)
            .is_some_and(|value| value.to_lowercase() == expected.to_lowercase()),
        Filter::IdIn(ids) => ids.contains(id),
    }
}

/// Order two field values: absent/null first, then numbers, then strings
/// compared byte-wise.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Number(_)) => 1,
            Some(Value::String(_)) => 2,
            Some(_) => 3,
        }
    }

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.as_bytes().cmp(y.as_bytes()),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn sort_documents(docs: &mut [Document], keys: &[SortKey]) {
    docs.sort_by(|a, b| {
        keys.iter()
            .map(|key| {
                let ord = compare_values(a.body.get(key.field), b.body.get(key.field));
                if key.descending {
                    ord.reverse()
                } else {
                    ord
                }
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

fn project(body: Value, fields: &[&'static str]) -> Value {
    let Value::Object(mut map) = body else {
        return body;
    };
    let projected: Map<String, Value> = fields
        .iter()
        .filter_map(|field| map.remove(*field).map(|v| (field.to_string(), v)))
        .collect();
    Value::Object(projected)
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_by_id(&self, collection: Collection, id: Uuid) -> AppResult<Option<Document>> {
        self.read(|collections| {
            collections
                .get(&collection)
                .and_then(|docs| docs.get(&id))
                .map(|body| Document {
                    id,
                    body: body.clone(),
                })
        })
    }

    async fn find(&self, collection: Collection, query: &FindQuery) -> AppResult<Vec<Document>> {
        let mut docs = self.read(|collections| {
            collections
                .get(&collection)
                .map(|docs| {
                    docs.iter()
                        .filter(|(id, body)| filter_matches(id, body, &query.filter))
                        .map(|(id, body)| Document {
                            id: *id,
                            body: body.clone(),
                        })
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })?;

        sort_documents(&mut docs, &query.sort);

        if let Some(fields) = &query.projection {
            for doc in docs.iter_mut() {
                doc.body = project(std::mem::take(&mut doc.body), fields);
            }
        }
        Ok(docs)
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> AppResult<u64> {
        self.read(|collections| {
            collections
                .get(&collection)
                .map(|docs| docs.iter().filter(|(id, body)| filter_matches(id, body, filter)).count() as u64)
                .unwrap_or(0)
        })
    }

    async fn insert(&self, collection: Collection, body: Value) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        self.write(|collections| {
            collections.entry(collection).or_default().insert(id, body);
        })?;
        Ok(id)
    }

    async fn update(&self, collection: Collection, id: Uuid, body: Value) -> AppResult<bool> {
        self.write(|collections| {
            match collections.get_mut(&collection).and_then(|docs| docs.get_mut(&id)) {
                Some(existing) => {
                    *existing = body;
                    true
                }
                None => false,
            }
        })
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> AppResult<bool> {
        self.write(|collections| {
            collections
                .get_mut(&collection)
                .and_then(|docs| docs.shift_remove(&id))
                .is_some()
        })
    }

    async fn close(&self) {
        tracing::debug!("in-memory document store closed");
    }
}
