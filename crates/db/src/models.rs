//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models — they carry no domain behaviour.  The
//! shapes exchanged with API callers live in [`crate::schemas`].

use serde::{Deserialize, Serialize};
use service::{CrudEntity, ValuesQuery};
use sqlx::{FromRow, Postgres};

use crate::schemas::{Cat, CatCreate};

// ---------------------------------------------------------------------------
// cats
// ---------------------------------------------------------------------------

/// A persisted cat row — the template's worked example entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CatRow {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

impl CrudEntity<Postgres> for CatRow {
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
        query: ValuesQuery<'_, Postgres, Self>,
        input: Self::Create,
    ) -> ValuesQuery<'_, Postgres, Self> {
        query.bind(input.name).bind(input.age)
    }

    fn id(&self) -> i64 {
        self.id
    }
}
