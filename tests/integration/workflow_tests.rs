//! Catalog workflow tests against the in-memory document store

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use library_catalog::{
    error::AppError,
    models::BookInstanceStatus,
    repository::{MemoryDocumentStore, Repository},
    services::{
        authors::AUTHOR_LIST_URL, books::BOOK_LIST_URL, genres::{DUPLICATE_NAME, GENRE_LIST_URL}, DeleteOutcome, FormOutcome,
        Services,
    },
    validation::RawForm,
};

fn services() -> Services {
    Services::new(Repository::new(Arc::new(MemoryDocumentStore::new())))
}

/// Id at the end of a detail url
fn id_from(url: &str) -> Uuid {
    url.rsplit('/')
        .next()
        .and_then(|id| id.parse().ok())
        .unwrap_or_else(|| panic!("no id in {url}"))
}

fn redirect_url<P: std::fmt::Debug>(outcome: FormOutcome<P>) -> String {
    match outcome {
        FormOutcome::Redirect(url) => url,
        FormOutcome::Invalid(page) => panic!("expected redirect, form rejected: {page:?}"),
    }
}

async fn create_author(services: &Services, first: &str, family: &str) -> Uuid {
    let raw = RawForm::new()
        .with("first_name", first)
        .with("family_name", family)
        .with("date_of_birth", "1920-01-02");
    id_from(&redirect_url(services.authors.create_submit(&raw).await.unwrap()))
}

async fn create_genre(services: &Services, name: &str) -> Uuid {
    let raw = RawForm::new().with("name", name);
    id_from(&redirect_url(services.genres.create_submit(&raw).await.unwrap()))
}

async fn create_book(services: &Services, title: &str, author: Uuid, genres: &[Uuid]) -> Uuid {
    let mut raw = RawForm::new()
        .with("title", title)
        .with("author", author.to_string())
        .with("summary", "A summary")
        .with("isbn", "9780553293357");
    for genre in genres {
        raw = raw.with("genre", genre.to_string());
    }
    id_from(&redirect_url(services.books.create_submit(&raw).await.unwrap()))
}

async fn create_copy(services: &Services, book: Uuid, status: &str) -> Uuid {
    let raw = RawForm::new()
        .with("book", book.to_string())
        .with("imprint", "Gnome Press, 1951")
        .with("status", status);
    id_from(&redirect_url(services.book_instances.create_submit(&raw).await.unwrap()))
}

#[tokio::test]
async fn test_genre_create_redirects_to_existing_name_ignoring_case() {
    let services = services();
    let fantasy = create_genre(&services, "Fantasy").await;

    let outcome = services
        .genres
        .create_submit(&RawForm::new().with("name", "fantasy"))
        .await
        .unwrap();

    assert!(matches!(outcome, FormOutcome::Redirect(url) if url == format!("/catalog/genre/{fantasy}")));
    assert_eq!(services.genres.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_book_delete_refused_while_copies_exist() {
    let services = services();
    let author = create_author(&services, "Isaac", "Asimov").await;
    let book = create_book(&services, "Foundation", author, &[]).await;
    let copy = create_copy(&services, book, "Available").await;

    let outcome = services.books.delete_submit(book).await.unwrap();
    match outcome {
        DeleteOutcome::Blocked(page) => {
            assert_eq!(page.book.book.id, book);
            assert_eq!(page.book_instances.len(), 1);
            assert_eq!(page.book_instances[0].book_instance.id, copy);
        }
        other => panic!("expected blocked delete, got {other:?}"),
    }

    // Nothing was removed
    assert!(services.books.detail(book).await.is_ok());
    assert!(services.book_instances.detail(copy).await.is_ok());

    // Removing the copy unblocks the book
    services.book_instances.delete_submit(copy).await.unwrap();
    let outcome = services.books.delete_submit(book).await.unwrap();
    assert!(matches!(outcome, DeleteOutcome::Redirect(url) if url == BOOK_LIST_URL));
    assert!(services.books.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_author_delete_refused_then_allowed() {
    let services = services();
    let author = create_author(&services, "Isaac", "Asimov").await;
    let book = create_book(&services, "Foundation", author, &[]).await;

    let outcome = services.authors.delete_submit(author).await.unwrap();
    assert!(matches!(&outcome, DeleteOutcome::Blocked(page) if page.author_books.len() == 1));

    services.books.delete_submit(book).await.unwrap();
    let outcome = services.authors.delete_submit(author).await.unwrap();
    assert!(matches!(outcome, DeleteOutcome::Redirect(url) if url == AUTHOR_LIST_URL));
    assert!(services.authors.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_genre_delete_disappears_from_list() {
    let services = services();
    let poetry = create_genre(&services, "Poetry").await;
    let fantasy = create_genre(&services, "Fantasy").await;

    let outcome = services.genres.delete_submit(poetry).await.unwrap();
    assert!(matches!(outcome, DeleteOutcome::Redirect(url) if url == GENRE_LIST_URL));

    let names: Vec<Uuid> = services
        .genres
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.genre.id)
        .collect();
    assert_eq!(names, vec![fantasy]);
}

#[tokio::test]
async fn test_genre_delete_refused_while_books_use_it() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let fantasy = create_genre(&services, "Fantasy").await;
    let book = create_book(&services, "Earthsea", author, &[fantasy]).await;

    let outcome = services.genres.delete_submit(fantasy).await.unwrap();
    match outcome {
        DeleteOutcome::Blocked(page) => {
            assert_eq!(page.genre.genre.id, fantasy);
            assert_eq!(page.genre_books.len(), 1);
            assert_eq!(page.genre_books[0].book.id, book);
        }
        other => panic!("expected blocked delete, got {other:?}"),
    }

    let ids: Vec<Uuid> = services
        .genres
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.genre.id)
        .collect();
    assert_eq!(ids, vec![fantasy]);
    assert!(services.genres.detail(fantasy).await.is_ok());
}

#[tokio::test]
async fn test_genre_rename_onto_another_name_is_rejected() {
    let services = services();
    let fantasy = create_genre(&services, "Fantasy").await;
    let poetry = create_genre(&services, "Poetry").await;

    let outcome = services
        .genres
        .update_submit(poetry, &RawForm::new().with("name", "FANTASY"))
        .await
        .unwrap();
    let page = match outcome {
        FormOutcome::Invalid(page) => page,
        FormOutcome::Redirect(url) => panic!("duplicate rename was stored, redirected to {url}"),
    };
    assert_eq!(page.genre.id, Some(poetry));
    assert_eq!(page.genre.name, "FANTASY");
    assert_eq!(
        page.errors.for_field("name").next().map(|e| e.message.as_str()),
        Some(DUPLICATE_NAME)
    );

    let names: Vec<String> = services
        .genres
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.genre.name)
        .collect();
    assert_eq!(names, vec!["Fantasy".to_string(), "Poetry".to_string()]);

    // Changing the case of its own name is still a plain rename
    let outcome = services
        .genres
        .update_submit(fantasy, &RawForm::new().with("name", "FANTASY"))
        .await
        .unwrap();
    assert!(matches!(outcome, FormOutcome::Redirect(url) if url == format!("/catalog/genre/{fantasy}")));
    assert_eq!(services.genres.detail(fantasy).await.unwrap().genre.genre.name, "FANTASY");
}

#[tokio::test]
async fn test_invalid_author_echoes_sanitized_values() {
    let services = services();
    let raw = RawForm::new()
        .with("first_name", "")
        .with("family_name", "  <b>Asimov</b> ")
        .with("date_of_birth", "not a date");

    let outcome = services.authors.create_submit(&raw).await.unwrap();
    let page = match outcome {
        FormOutcome::Invalid(page) => page,
        FormOutcome::Redirect(url) => panic!("invalid form was stored, redirected to {url}"),
    };

    assert_eq!(page.author.family_name, "&lt;b&gt;Asimov&lt;&#x2F;b&gt;");
    assert_eq!(page.author.date_of_birth, "not a date");
    assert_eq!(page.errors.for_field("first_name").count(), 2);
    assert_eq!(page.errors.for_field("family_name").count(), 1);
    assert_eq!(
        page.errors.for_field("date_of_birth").next().map(|e| e.message.as_str()),
        Some("Invalid date of birth")
    );
    assert!(services.authors.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_book_round_trip() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let fantasy = create_genre(&services, "Fantasy").await;
    let book = create_book(&services, "A Wizard of Earthsea", author, &[fantasy]).await;

    let page = services.books.detail(book).await.unwrap();
    assert_eq!(page.title, "A Wizard of Earthsea");
    assert_eq!(page.book.book.author, author);
    assert_eq!(page.book.book.genre, vec![fantasy]);
    assert_eq!(page.book.url, format!("/catalog/book/{book}"));
    assert_eq!(page.author.map(|a| a.name), Some("LeGuin, Ursula".to_string()));
    assert_eq!(page.genres.len(), 1);
    assert!(page.book_instances.is_empty());

    let listed = services.books.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "A Wizard of Earthsea");
}

#[tokio::test]
async fn test_book_instance_defaults() {
    let services = services();
    let author = create_author(&services, "Isaac", "Asimov").await;
    let book = create_book(&services, "Foundation", author, &[]).await;

    let before = Utc::now();
    let copy = create_copy(&services, book, "").await;

    let page = services.book_instances.detail(copy).await.unwrap();
    let instance = &page.book_instance.book_instance.book_instance;
    assert_eq!(instance.status, BookInstanceStatus::Maintenance);
    assert!(instance.due_back >= before);
    assert_eq!(page.title, "Copy: Foundation");
}

#[tokio::test]
async fn test_book_instance_unknown_status_is_rejected() {
    let services = services();
    let author = create_author(&services, "Isaac", "Asimov").await;
    let book = create_book(&services, "Foundation", author, &[]).await;

    let raw = RawForm::new()
        .with("book", book.to_string())
        .with("imprint", "Gnome Press")
        .with("status", "Lost");
    let result = services.book_instances.create_submit(&raw).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(services.book_instances.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_book_instance_due_back_kept_and_counted() {
    let services = services();
    let author = create_author(&services, "Isaac", "Asimov").await;
    let book = create_book(&services, "Foundation", author, &[]).await;

    let raw = RawForm::new()
        .with("book", book.to_string())
        .with("imprint", "Gnome Press")
        .with("status", "Loaned")
        .with("due_back", "2030-06-01");
    let copy = id_from(&redirect_url(services.book_instances.create_submit(&raw).await.unwrap()));
    create_copy(&services, book, "Available").await;

    let page = services.book_instances.detail(copy).await.unwrap();
    assert_eq!(page.book_instance.book_instance.due_back_yyyy_mm_dd, "2030-06-01");
    assert_eq!(page.book_instance.book_instance.due_back_formatted, "Jun 1, 2030");

    let summary = services.catalog.summary().await.unwrap();
    assert_eq!(summary.book_count, 1);
    assert_eq!(summary.book_instance_count, 2);
    assert_eq!(summary.book_instance_available_count, 1);
    assert_eq!(summary.author_count, 1);
    assert_eq!(summary.genre_count, 0);
}

#[tokio::test]
async fn test_book_update_without_genres_clears_them() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let fantasy = create_genre(&services, "Fantasy").await;
    let book = create_book(&services, "A Wizard of Earthsea", author, &[fantasy]).await;

    let raw = RawForm::new()
        .with("title", "A Wizard of Earthsea")
        .with("author", author.to_string())
        .with("summary", "A summary")
        .with("isbn", "9780553293357");
    services.books.update_submit(book, &raw).await.unwrap();

    let page = services.books.detail(book).await.unwrap();
    assert!(page.book.book.genre.is_empty());
    assert!(page.genres.is_empty());
}

#[tokio::test]
async fn test_update_form_preselects_current_values() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    create_author(&services, "Isaac", "Asimov").await;
    let fantasy = create_genre(&services, "Fantasy").await;
    create_genre(&services, "Poetry").await;
    let book = create_book(&services, "A Wizard of Earthsea", author, &[fantasy]).await;

    let page = services.books.update_form(book).await.unwrap();
    let selected: Vec<Uuid> = page
        .authors
        .iter()
        .filter(|a| a.selected)
        .map(|a| a.author.author.id)
        .collect();
    let checked: Vec<Uuid> = page.genres.iter().filter(|g| g.checked).map(|g| g.genre.genre.id).collect();
    assert_eq!(selected, vec![author]);
    assert_eq!(checked, vec![fantasy]);
}

#[tokio::test]
async fn test_delete_form_of_deleted_author_redirects() {
    let services = services();
    let author = create_author(&services, "Isaac", "Asimov").await;
    services.authors.delete_submit(author).await.unwrap();

    let outcome = services.authors.delete_form(author).await.unwrap();
    assert!(matches!(outcome, DeleteOutcome::Redirect(url) if url == AUTHOR_LIST_URL));

    // Deleting twice is harmless
    let outcome = services.authors.delete_submit(author).await.unwrap();
    assert!(matches!(outcome, DeleteOutcome::Redirect(url) if url == AUTHOR_LIST_URL));
}

#[tokio::test]
async fn test_missing_record_on_read_paths_is_not_found() {
    let services = services();
    let missing = Uuid::new_v4();

    assert!(matches!(services.authors.detail(missing).await, Err(AppError::NotFound(_))));
    assert!(matches!(services.genres.update_form(missing).await, Err(AppError::NotFound(_))));
    assert!(matches!(services.book_instances.detail(missing).await, Err(AppError::NotFound(_))));

    let raw = RawForm::new().with("name", "Science Fiction");
    assert!(matches!(
        services.genres.update_submit(missing, &raw).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_author_update_keeps_identity() {
    let services = services();
    let author = create_author(&services, "Isaac", "Asimov").await;

    let raw = RawForm::new()
        .with("first_name", "Isaac")
        .with("family_name", "Azimov")
        .with("date_of_birth", "1920-01-02")
        .with("date_of_death", "1992-04-06");
    let url = redirect_url(services.authors.update_submit(author, &raw).await.unwrap());
    assert_eq!(id_from(&url), author);

    let page = services.authors.detail(author).await.unwrap();
    assert_eq!(page.author.name, "Azimov, Isaac");
    assert_eq!(
        page.author.author.date_of_death,
        Some(NaiveDate::from_ymd_opt(1992, 4, 6).unwrap())
    );
    assert_eq!(services.authors.list().await.unwrap().len(), 1);
}
