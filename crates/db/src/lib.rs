//! `db` crate — pure persistence layer.
//!
//! Provides a connection pool, the migrations runner, typed row structs, and
//! the schema shapes for every table in the starter's example domain.  No
//! HTTP or business logic lives here.

pub mod error;
pub mod models;
pub mod pool;
pub mod schemas;

pub use error::DbError;
pub use pool::{create_pool, ping, run_migrations, DbPool};

/// CRUD service specialized for the example `cats` table.
pub type CatService = service::CrudService<sqlx::Postgres, models::CatRow>;
