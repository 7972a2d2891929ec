//! Schema shapes for the example `cats` table.
//!
//! Two shapes per entity: the create shape (what a caller must supply, no
//! primary key — the backend assigns it) and the read shape (what a caller
//! gets back, primary key always present).  serde does the validation before
//! anything reaches the service layer.

use serde::{Deserialize, Serialize};

use crate::models::CatRow;

/// Input shape for creating (or fully overwriting) a cat.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatCreate {
    pub name: String,
    pub age: i64,
}

/// Output shape describing a persisted cat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cat {
    pub id: i64,
    pub name: String,
    pub age: i64,
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
