//! PostgreSQL document store
//!
//! Documents live in a single `documents` table as JSONB bodies keyed by
//! `(collection, id)`. Field names in filters, sorts and projections are
//! always bound as parameters.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter, FindQuery};
use crate::{config::DatabaseConfig, error::AppResult};

#[derive(FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Value>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            body: row.body.0,
        }
    }
}

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool and bring the schema up to date
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;

        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!("Database migrations completed");

        let ctype: String =
            sqlx::query_scalar("SELECT datctype FROM pg_database WHERE datname = current_database()")
                .fetch_one(&pool)
                .await?;
        if !folds_unicode_case(&ctype) {
            tracing::warn!(
                %ctype,
                "database LC_CTYPE only folds ASCII case; genre names with accented capitals will not match case-insensitively"
            );
        }

        Ok(Self::new(pool))
    }
}

/// Whether `lower()` under this LC_CTYPE case-maps beyond ASCII.
/// `C` and `POSIX` only map `A-Z`.
fn folds_unicode_case(ctype: &str) -> bool {
    let ctype = ctype.trim();
    !(ctype.is_empty() || ctype.eq_ignore_ascii_case("C") || ctype.eq_ignore_ascii_case("POSIX"))
}

/// `{ field: value }`, the shape used for JSONB containment
fn field_document(field: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(field.to_string(), value);
    Value::Object(map)
}

/// Append `AND <filter>` to a query already restricted to one collection
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::All => {}
        Filter::Eq(field, value) => {
            // Containment covers both scalar equality and array membership.
            builder
                .push(" AND (body @> ")
                .push_bind(Json(field_document(field, value.clone())))
                .push(" OR body @> ")
                .push_bind(Json(field_document(field, Value::Array(vec![value.clone()]))))
                .push(")");
        }
        Filter::EqIgnoreCase(field, value) => {
            builder
                .push(" AND lower(body ->> ")
                .push_bind(*field)
                .push("::text) = lower(")
                .push_bind(value.clone())
                .push(")");
        }
        Filter::IdIn(ids) => {
            builder.push(" AND id = ANY(").push_bind(ids.clone()).push(")");
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_by_id(&self, collection: Collection, id: Uuid) -> AppResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection.name())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Document::from))
    }

    async fn find(&self, collection: Collection, query: &FindQuery) -> AppResult<Vec<Document>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id, ");

        match &query.projection {
            Some(fields) => {
                builder.push("jsonb_strip_nulls(jsonb_build_object(");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        builder.push(", ");
                    }
                    builder
                        .push_bind(*field)
                        .push("::text, body -> ")
                        .push_bind(*field)
                        .push("::text");
                }
                builder.push(")) AS body");
            }
            None => {
                builder.push("body");
            }
        }

        builder
            .push(" FROM documents WHERE collection = ")
            .push_bind(collection.name());
        push_filter(&mut builder, &query.filter);

        builder.push(" ORDER BY ");
        for key in &query.sort {
            builder
                .push("(body ->> ")
                .push_bind(key.field)
                .push("::text)")
                .push(if key.descending {
                    r#" COLLATE "C" DESC NULLS LAST, "#
                } else {
                    r#" COLLATE "C" ASC NULLS FIRST, "#
                });
        }
        builder.push("created_at, id");

        let rows = builder
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> AppResult<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM documents WHERE collection = ");
        builder.push_bind(collection.name());
        push_filter(&mut builder, filter);

        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count as u64)
    }

    async fn insert(&self, collection: Collection, body: Value) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection.name())
            .bind(id)
            .bind(Json(body))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update(&self, collection: Collection, id: Uuid, body: Value) -> AppResult<bool> {
        let result = sqlx::query("UPDATE documents SET body = $3 WHERE collection = $1 AND id = $2")
            .bind(collection.name())
            .bind(id)
            .bind(Json(body))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.name())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connections closed");
    }
}
