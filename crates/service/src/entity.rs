//! The `CrudEntity` trait — the contract every managed entity must fulfil.

use sqlx::query::QueryAs;
use sqlx::{Database, Encode, FromRow, Type};

/// A partially-built `query_as` for entity `E`, awaiting value binds.
pub type ValuesQuery<'q, DB, E> = QueryAs<'q, DB, E, <DB as Database>::Arguments<'q>>;

/// Ties a persistence row to its create and read shapes.
///
/// The implementor is the row struct itself (it must derive
/// [`sqlx::FromRow`]); the associated types carry the two schema shapes:
///
/// - [`Create`](CrudEntity::Create) — the fields a caller supplies to make
///   a new row.  Never contains the primary key; the backend assigns it.
/// - [`Read`](CrudEntity::Read) — the fields returned to a caller.  Always
///   contains the primary key, converted from a fetched row via `From`.
///
/// `id_column` is the primary-key accessor: one generic service can manage
/// any table without hardcoding a key name.
pub trait CrudEntity<DB: Database>:
    for<'r> FromRow<'r, DB::Row> + Send + Unpin + Sized + 'static
{
    /// Primary key type (e.g. `i64` for a serial column).
    type Id: for<'q> Encode<'q, DB> + Type<DB> + Send + Sync + 'static;
    /// Create-input shape: everything needed to insert a row, minus the key.
    type Create: Send;
    /// Read-output shape returned to callers.
    type Read: From<Self> + Send;

    /// Table this entity is stored in.
    fn table() -> &'static str;

    /// Name of the primary-key column.
    fn id_column() -> &'static str;

    /// Non-key columns, in the order `bind_values` binds them.
    fn value_columns() -> &'static [&'static str];

    /// Bind the create shape's fields onto `query`, one `.bind()` per
    /// entry of [`value_columns`](CrudEntity::value_columns), same order.
    fn bind_values(query: ValuesQuery<'_, DB, Self>, input: Self::Create)
        -> ValuesQuery<'_, DB, Self>;

    /// The generated primary key of a fetched row.
    fn id(&self) -> Self::Id;

    /// Convert a fetched row into its read shape.
    fn into_read(self) -> Self::Read {
        self.into()
    }
}
