//! `service` crate — the generic CRUD service layer.
//!
//! One `CrudService` implementation serves any entity: a table-backed row
//! struct describes itself through the [`CrudEntity`] trait (table name,
//! primary-key column, value columns, bind order) and pairs itself with a
//! create shape (validated input, no primary key) and a read shape
//! (response output, primary key always present).  The service translates
//! between those shapes and the database, and nothing else — transactions,
//! pooling, and validation all belong to its collaborators.

pub mod crud;
pub mod entity;
pub mod error;
pub mod sql;

pub use crud::CrudService;
pub use entity::{CrudEntity, ValuesQuery};
pub use error::ServiceError;
