//! `CrudService` — entity-agnostic create/read/update/delete operations.
//!
//! The service is a zero-sized, type-parameterized handle: construct one per
//! entity (`CrudService::<Postgres, CatRow>::new()`) and pass the session
//! (`&Pool`) into every call.  The service never opens, pools, or closes
//! sessions and keeps no state across calls; each operation is a single
//! request-response against the caller-supplied handle.

use std::marker::PhantomData;

use sqlx::{Database, Encode, Executor, IntoArguments, Pool, Type};
use tracing::debug;

use crate::entity::CrudEntity;
use crate::error::ServiceError;
use crate::sql;

/// Generic CRUD operations over one entity type.
pub struct CrudService<DB, E> {
    _marker: PhantomData<fn() -> (DB, E)>,
}

impl<DB, E> CrudService<DB, E> {
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<DB, E> Clone for CrudService<DB, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<DB, E> Copy for CrudService<DB, E> {}

impl<DB, E> Default for CrudService<DB, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<DB, E> CrudService<DB, E>
where
    DB: Database,
    E: CrudEntity<DB>,
    for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
    for<'q> DB::Arguments<'q>: IntoArguments<'q, DB>,
{
    /// Insert a new row built from `input` and return its read shape.
    ///
    /// The `RETURNING` clause forces backend-generated columns (the primary
    /// key) into the returned shape.  Constraint violations surface as
    /// [`ServiceError::Persistence`] and are never retried here.
    pub async fn create(&self, db: &Pool<DB>, input: E::Create) -> Result<E::Read, ServiceError> {
        let stmt = sql::insert(E::table(), E::id_column(), E::value_columns());
        debug!(table = E::table(), "inserting row");
        let row: E = E::bind_values(sqlx::query_as(&stmt), input)
            .fetch_one(db)
            .await?;
        Ok(row.into_read())
    }

    /// Fetch a single row by primary key.
    ///
    /// `None` is the not-found signal; mapping it to a 404 (or anything
    /// else) is the caller's concern.
    pub async fn get_by_id(
        &self,
        db: &Pool<DB>,
        id: E::Id,
    ) -> Result<Option<E::Read>, ServiceError> {
        let stmt = sql::select_by_id(E::table(), E::id_column(), E::value_columns());
        let row: Option<E> = sqlx::query_as::<DB, E>(&stmt)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row.map(E::into_read))
    }

    /// Fetch every row, in backend-determined order.
    pub async fn get_all(&self, db: &Pool<DB>) -> Result<Vec<E::Read>, ServiceError> {
        let stmt = sql::select_all(E::table(), E::id_column(), E::value_columns());
        let rows: Vec<E> = sqlx::query_as::<DB, E>(&stmt).fetch_all(db).await?;
        Ok(rows.into_iter().map(E::into_read).collect())
    }

    /// Fetch one page of rows, with LIMIT/OFFSET pushed into the query so
    /// the table is never materialized in full.
    pub async fn get_page(
        &self,
        db: &Pool<DB>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<E::Read>, ServiceError> {
        let stmt = sql::select_page(E::table(), E::id_column(), E::value_columns(), limit, offset);
        let rows: Vec<E> = sqlx::query_as::<DB, E>(&stmt).fetch_all(db).await?;
        Ok(rows.into_iter().map(E::into_read).collect())
    }

    /// Overwrite every value column of the row with key `id`.
    ///
    /// Total overwrite, not a partial merge: all of the entity's value
    /// columns are set from `input`.  Returns `None` when no such row
    /// exists.  For a key-only entity this degenerates to a re-fetch.
    pub async fn update(
        &self,
        db: &Pool<DB>,
        id: E::Id,
        input: E::Create,
    ) -> Result<Option<E::Read>, ServiceError> {
        let stmt = sql::update(E::table(), E::id_column(), E::value_columns());
        debug!(table = E::table(), "updating row");
        let row: Option<E> = E::bind_values(sqlx::query_as(&stmt), input)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row.map(E::into_read))
    }

    /// Remove the row with key `id`, returning its read shape.
    ///
    /// Fetches before deleting so the caller gets the removed record back;
    /// `None` when the row was already absent.
    pub async fn delete(&self, db: &Pool<DB>, id: E::Id) -> Result<Option<E::Read>, ServiceError> {
        let select = sql::select_by_id(E::table(), E::id_column(), E::value_columns());
        let row: Option<E> = sqlx::query_as::<DB, E>(&select)
            .bind(id)
            .fetch_optional(db)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let stmt = sql::delete(E::table(), E::id_column());
        debug!(table = E::table(), "deleting row");
        sqlx::query(&stmt).bind(row.id()).execute(db).await?;
        Ok(Some(row.into_read()))
    }

    /// Update the row with key `id` when it exists, insert otherwise.
    pub async fn create_or_update(
        &self,
        db: &Pool<DB>,
        id: E::Id,
        input: E::Create,
    ) -> Result<E::Read, ServiceError>
    where
        E::Create: Clone,
    {
        if let Some(updated) = self.update(db, id, input.clone()).await? {
            return Ok(updated);
        }
        self.create(db, input).await
    }

    /// Fetch the first row whose `column` equals `value`.
    pub async fn find_one_by<V>(
        &self,
        db: &Pool<DB>,
        column: &str,
        value: V,
    ) -> Result<Option<E::Read>, ServiceError>
    where
        V: for<'q> Encode<'q, DB> + Type<DB> + Send + 'static,
    {
        Self::check_column(column)?;
        let stmt = sql::select_by_column(E::table(), E::id_column(), E::value_columns(), column);
        let row: Option<E> = sqlx::query_as::<DB, E>(&stmt)
            .bind(value)
            .fetch_optional(db)
            .await?;
        Ok(row.map(E::into_read))
    }

    /// Fetch every row whose `column` equals `value`.
    pub async fn find_all_by<V>(
        &self,
        db: &Pool<DB>,
        column: &str,
        value: V,
    ) -> Result<Vec<E::Read>, ServiceError>
    where
        V: for<'q> Encode<'q, DB> + Type<DB> + Send + 'static,
    {
        Self::check_column(column)?;
        let stmt = sql::select_by_column(E::table(), E::id_column(), E::value_columns(), column);
        let rows: Vec<E> = sqlx::query_as::<DB, E>(&stmt)
            .bind(value)
            .fetch_all(db)
            .await?;
        Ok(rows.into_iter().map(E::into_read).collect())
    }

    /// Reject filter columns the entity does not declare, before any SQL
    /// reaches the backend.
    fn check_column(column: &str) -> Result<(), ServiceError> {
        if column == E::id_column() || E::value_columns().contains(&column) {
            Ok(())
        } else {
            Err(ServiceError::UnknownColumn {
                column: column.to_string(),
            })
        }
    }
}
