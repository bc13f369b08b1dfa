//! Postgres document store tests
//!
//! Need a reachable database; the url comes from `DATABASE_URL` or the
//! default configuration. Every test works on freshly generated values so
//! they can share one database, and removes what it inserted.

use serde_json::json;
use uuid::Uuid;

use library_catalog::{
    config::DatabaseConfig,
    repository::{Collection, DocumentStore, Filter, FindQuery, PgDocumentStore},
};

async fn store() -> PgDocumentStore {
    let mut config = DatabaseConfig::default();
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.url = url;
    }
    PgDocumentStore::connect(&config)
        .await
        .expect("Failed to open the document store")
}

async fn cleanup(store: &PgDocumentStore, collection: Collection, ids: &[Uuid]) {
    for id in ids {
        store.delete(collection, *id).await.expect("Failed to delete document");
    }
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_eq_matches_scalar_and_array_membership() {
    let store = store().await;
    let author = Uuid::new_v4();
    let (fiction, poetry) = (Uuid::new_v4(), Uuid::new_v4());

    let ids = vec![
        store
            .insert(Collection::Books, json!({ "title": "b", "author": author, "genre": [fiction] }))
            .await
            .unwrap(),
        store
            .insert(Collection::Books, json!({ "title": "a", "author": author, "genre": [fiction, poetry] }))
            .await
            .unwrap(),
        store
            .insert(Collection::Books, json!({ "title": "c", "author": Uuid::new_v4(), "genre": [] }))
            .await
            .unwrap(),
    ];

    let count = |filter: Filter| {
        let store = store.clone();
        async move { store.count(Collection::Books, &filter).await.unwrap() }
    };
    assert_eq!(count(Filter::Eq("author", json!(author))).await, 2);
    assert_eq!(count(Filter::Eq("genre", json!(fiction))).await, 2);
    assert_eq!(count(Filter::Eq("genre", json!(poetry))).await, 1);
    assert_eq!(count(Filter::IdIn(vec![ids[0], ids[2]])).await, 2);

    cleanup(&store, Collection::Books, &ids).await;
}

#[tokio::test]
#[ignore]
async fn test_sort_is_bytewise_and_projection_keeps_listed_fields() {
    let store = store().await;
    let author = Uuid::new_v4();

    let mut ids = Vec::new();
    for title in ["alpha", "Zeta", "beta"] {
        let body = json!({ "title": title, "author": author, "summary": "s", "isbn": "1" });
        ids.push(store.insert(Collection::Books, body).await.unwrap());
    }

    let query = FindQuery::new(Filter::Eq("author", json!(author)))
        .sort_asc("title")
        .project(&["title"]);
    let found = store.find(Collection::Books, &query).await.unwrap();

    let titles: Vec<&str> = found.iter().filter_map(|d| d.body["title"].as_str()).collect();
    assert_eq!(titles, vec!["Zeta", "alpha", "beta"]);
    for document in &found {
        assert_eq!(document.body.as_object().map(|m| m.len()), Some(1));
    }

    cleanup(&store, Collection::Books, &ids).await;
}

#[tokio::test]
#[ignore]
async fn test_case_insensitive_name_lookup() {
    let store = store().await;
    let suffix = Uuid::new_v4().simple().to_string();
    let name = format!("Science Fiction {suffix}");
    let id = store
        .insert(Collection::Genres, json!({ "name": name }))
        .await
        .unwrap();

    let query = FindQuery::new(Filter::EqIgnoreCase("name", name.to_uppercase()));
    let found = store.find(Collection::Genres, &query).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);

    cleanup(&store, Collection::Genres, &[id]).await;
}

/// Needs a database whose LC_CTYPE is a UTF-8 locale (not `C`)
#[tokio::test]
#[ignore]
async fn test_case_insensitive_lookup_folds_accented_capitals() {
    let store = store().await;
    let suffix = Uuid::new_v4().simple().to_string();
    let id = store
        .insert(Collection::Genres, json!({ "name": format!("Été {suffix}") }))
        .await
        .unwrap();

    let query = FindQuery::new(Filter::EqIgnoreCase("name", format!("ÉTÉ {}", suffix.to_uppercase())));
    let found = store.find(Collection::Genres, &query).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);

    cleanup(&store, Collection::Genres, &[id]).await;
}

#[tokio::test]
#[ignore]
async fn test_update_and_delete_of_missing_document() {
    let store = store().await;
    let missing = Uuid::new_v4();

    assert!(!store.update(Collection::Authors, missing, json!({})).await.unwrap());
    assert!(!store.delete(Collection::Authors, missing).await.unwrap());
    assert!(store.find_by_id(Collection::Authors, missing).await.unwrap().is_none());

    let id = store
        .insert(Collection::Authors, json!({ "first_name": "Isaac", "family_name": "Asimov" }))
        .await
        .unwrap();
    assert!(store
        .update(Collection::Authors, id, json!({ "first_name": "Isaac", "family_name": "Azimov" }))
        .await
        .unwrap());
    let document = store.find_by_id(Collection::Authors, id).await.unwrap().unwrap();
    assert_eq!(document.body["family_name"], "Azimov");

    assert!(store.delete(Collection::Authors, id).await.unwrap());
    assert!(store.find_by_id(Collection::Authors, id).await.unwrap().is_none());
}
