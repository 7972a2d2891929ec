//! Integration tests for the generic CRUD service.
//!
//! These run against an in-memory SQLite database so `cargo test` needs no
//! running server.  The statements the service builds use `$n` placeholders,
//! which SQLite accepts as well as Postgres, so the exact SQL exercised here
//! is the SQL production runs.

use service::{CrudEntity, CrudService, ServiceError, ValuesQuery};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Sqlite, SqlitePool};

// ---------------------------------------------------------------------------
// Test entity: the "Cat" example from the template docs, wired for SQLite.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
struct CatRow {
    id: i64,
    name: String,
    age: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CatCreate {
    name: String,
    age: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Cat {
    id: i64,
    name: String,
    age: i64,
}

impl From<CatRow> for Cat {
    fn from(row: CatRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            age: row.age,
        }
    }
}

impl CrudEntity<Sqlite> for CatRow {
    type Id = i64;
    type Create = CatCreate;
    type Read = Cat;

    fn table() -> &'static str {
        "cats"
    }

    fn id_column() -> &'static str {
        "id"
    }

    fn value_columns() -> &'static [&'static str] {
        &["name", "age"]
    }

    fn bind_values(
        query: ValuesQuery<'_, Sqlite, Self>,
        input: Self::Create,
    ) -> ValuesQuery<'_, Sqlite, Self> {
        query.bind(input.name).bind(input.age)
    }

    fn id(&self) -> i64 {
        self.id
    }
}

const CATS: CrudService<Sqlite, CatRow> = CrudService::new();

/// One-connection pool over a single in-memory database.  More than one
/// connection would mean more than one (empty) database.
async fn setup() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    sqlx::query(
        "CREATE TABLE cats (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            age  INTEGER NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .expect("create table");
    pool
}

fn tom() -> CatCreate {
    CatCreate {
        name: "Tom".into(),
        age: 3,
    }
}

// ---------------------------------------------------------------------------
// Round-trip and not-found properties
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_entity_is_immediately_retrievable() {
    let pool = setup().await;

    let created = CATS.create(&pool, tom()).await.unwrap();
    assert_eq!(created.name, "Tom");
    assert_eq!(created.age, 3);
    assert!(created.id > 0, "backend must assign the primary key");

    let fetched = CATS.get_by_id(&pool, created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn get_by_id_of_unknown_key_is_none() {
    let pool = setup().await;
    assert_eq!(CATS.get_by_id(&pool, 4711).await.unwrap(), None);
}

#[tokio::test]
async fn delete_returns_removed_shape_and_row_is_gone() {
    let pool = setup().await;
    let created = CATS.create(&pool, tom()).await.unwrap();

    let removed = CATS.delete(&pool, created.id).await.unwrap();
    assert_eq!(removed, Some(created.clone()));
    assert_eq!(CATS.get_by_id(&pool, created.id).await.unwrap(), None);
}

#[tokio::test]
async fn delete_of_unknown_key_is_none() {
    let pool = setup().await;
    assert_eq!(CATS.delete(&pool, 99).await.unwrap(), None);
}

// ---------------------------------------------------------------------------
// Update is a total overwrite
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_overwrites_every_attribute() {
    let pool = setup().await;
    let created = CATS.create(&pool, tom()).await.unwrap();

    let replacement = CatCreate {
        name: "Garfield".into(),
        age: 7,
    };
    let updated = CATS
        .update(&pool, created.id, replacement.clone())
        .await
        .unwrap()
        .expect("row exists");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, replacement.name);
    assert_eq!(updated.age, replacement.age);

    let fetched = CATS.get_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_of_unknown_key_is_none() {
    let pool = setup().await;
    assert_eq!(CATS.update(&pool, 12, tom()).await.unwrap(), None);
}

#[tokio::test]
async fn create_or_update_inserts_then_overwrites() {
    let pool = setup().await;

    // No row with this key yet: falls through to an insert.
    let inserted = CATS.create_or_update(&pool, 1, tom()).await.unwrap();
    assert_eq!(inserted.name, "Tom");

    let overwritten = CATS
        .create_or_update(
            &pool,
            inserted.id,
            CatCreate {
                name: "Old Tom".into(),
                age: 4,
            },
        )
        .await
        .unwrap();
    assert_eq!(overwritten.id, inserted.id);
    assert_eq!(overwritten.name, "Old Tom");
    assert_eq!(overwritten.age, 4);

    // Still exactly one row.
    assert_eq!(CATS.get_all(&pool).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_all_is_exactly_the_set_of_live_rows() {
    let pool = setup().await;

    let a = CATS.create(&pool, tom()).await.unwrap();
    let b = CATS
        .create(
            &pool,
            CatCreate {
                name: "Jerry".into(),
                age: 2,
            },
        )
        .await
        .unwrap();
    let c = CATS
        .create(
            &pool,
            CatCreate {
                name: "Spike".into(),
                age: 5,
            },
        )
        .await
        .unwrap();
    CATS.delete(&pool, b.id).await.unwrap();

    let mut all = CATS.get_all(&pool).await.unwrap();
    all.sort_by_key(|cat| cat.id);
    assert_eq!(all, vec![a, c]);
}

#[tokio::test]
async fn get_page_limits_and_offsets_in_the_query() {
    let pool = setup().await;
    for age in 0..10 {
        CATS.create(
            &pool,
            CatCreate {
                name: format!("cat-{age}"),
                age,
            },
        )
        .await
        .unwrap();
    }

    let page = CATS.get_page(&pool, 3, 4).await.unwrap();
    assert_eq!(page.len(), 3);
    assert_eq!(page[0].name, "cat-4");
    assert_eq!(page[2].name, "cat-6");

    let tail = CATS.get_page(&pool, 100, 8).await.unwrap();
    assert_eq!(tail.len(), 2);
}

#[tokio::test]
async fn negative_page_arguments_clamp_to_an_empty_page() {
    let pool = setup().await;
    CATS.create(&pool, tom()).await.unwrap();

    // Clamped to LIMIT 0 OFFSET 0 rather than reaching the backend, where
    // Postgres would error and SQLite would read -1 as unbounded.
    assert!(CATS.get_page(&pool, -1, -5).await.unwrap().is_empty());
}

#[tokio::test]
async fn unbounded_limit_pages_by_offset_alone() {
    let pool = setup().await;
    for age in 0..5 {
        CATS.create(
            &pool,
            CatCreate {
                name: format!("cat-{age}"),
                age,
            },
        )
        .await
        .unwrap();
    }

    let tail = CATS.get_page(&pool, i64::MAX, 3).await.unwrap();
    assert_eq!(tail.len(), 2);
    assert_eq!(tail[0].name, "cat-3");
}

// ---------------------------------------------------------------------------
// Equality filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn find_by_column_matches_on_equality() {
    let pool = setup().await;
    CATS.create(&pool, tom()).await.unwrap();
    CATS.create(
        &pool,
        CatCreate {
            name: "Tom".into(),
            age: 9,
        },
    )
    .await
    .unwrap();
    CATS.create(
        &pool,
        CatCreate {
            name: "Jerry".into(),
            age: 3,
        },
    )
    .await
    .unwrap();

    let toms = CATS.find_all_by(&pool, "name", "Tom".to_string()).await.unwrap();
    assert_eq!(toms.len(), 2);
    assert!(toms.iter().all(|cat| cat.name == "Tom"));

    let jerry = CATS
        .find_one_by(&pool, "name", "Jerry".to_string())
        .await
        .unwrap()
        .expect("Jerry exists");
    assert_eq!(jerry.age, 3);

    assert_eq!(
        CATS.find_one_by(&pool, "name", "Butch".to_string())
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn unknown_filter_column_is_rejected_before_any_sql() {
    let pool = setup().await;
    let err = CATS
        .find_all_by(&pool, "color; DROP TABLE cats", "red".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::UnknownColumn { .. }));

    // Table untouched.
    assert_eq!(CATS.get_all(&pool).await.unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Key-only entity: a model with zero value columns is still fully served
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
struct SessionRow {
    id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Session {
    id: i64,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self { id: row.id }
    }
}

impl CrudEntity<Sqlite> for SessionRow {
    type Id = i64;
    type Create = ();
    type Read = Session;

    fn table() -> &'static str {
        "sessions"
    }

    fn id_column() -> &'static str {
        "id"
    }

    fn value_columns() -> &'static [&'static str] {
        &[]
    }

    fn bind_values(
        query: ValuesQuery<'_, Sqlite, Self>,
        _input: Self::Create,
    ) -> ValuesQuery<'_, Sqlite, Self> {
        query
    }

    fn id(&self) -> i64 {
        self.id
    }
}

const SESSIONS: CrudService<Sqlite, SessionRow> = CrudService::new();

#[tokio::test]
async fn key_only_entity_supports_the_full_lifecycle() {
    let pool = setup().await;
    sqlx::query("CREATE TABLE sessions (id INTEGER PRIMARY KEY AUTOINCREMENT)")
        .execute(&pool)
        .await
        .unwrap();

    let created = SESSIONS.create(&pool, ()).await.unwrap();
    assert!(created.id > 0);

    // With nothing to overwrite, update degenerates to a re-fetch but keeps
    // its not-found contract.
    let updated = SESSIONS.update(&pool, created.id, ()).await.unwrap();
    assert_eq!(updated, Some(created.clone()));
    assert_eq!(SESSIONS.update(&pool, created.id + 1, ()).await.unwrap(), None);

    let removed = SESSIONS.delete(&pool, created.id).await.unwrap();
    assert_eq!(removed, Some(created.clone()));
    assert_eq!(SESSIONS.get_by_id(&pool, created.id).await.unwrap(), None);
}

// ---------------------------------------------------------------------------
// Failure propagation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn constraint_violation_surfaces_as_persistence_error() {
    let pool = setup().await;
    sqlx::query("CREATE UNIQUE INDEX cats_name_unique ON cats (name)")
        .execute(&pool)
        .await
        .unwrap();

    CATS.create(&pool, tom()).await.unwrap();
    let err = CATS.create(&pool, tom()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Persistence(_)));

    // The failed insert left exactly the first row behind.
    assert_eq!(CATS.get_all(&pool).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// The documented end-to-end scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tom_scenario() {
    let pool = setup().await;

    let created = CATS.create(&pool, tom()).await.unwrap();
    assert!(created.id > 0);
    assert_eq!((created.name.as_str(), created.age), ("Tom", 3));

    let fetched = CATS.get_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    CATS.delete(&pool, created.id).await.unwrap();
    assert_eq!(CATS.get_by_id(&pool, created.id).await.unwrap(), None);
}
