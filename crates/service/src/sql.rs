//! SQL text builders — pure string assembly, no database access.
//!
//! Placeholders are `$n`, which both Postgres and SQLite accept, and every
//! placeholder appears exactly once in ascending order so positional binds
//! line up on either backend.  Column and table names come from
//! [`CrudEntity`](crate::CrudEntity) implementations (compile-time string
//! literals), never from request input.

/// `id, col_a, col_b` — the full select list, key first.
fn select_list(id_column: &str, value_columns: &[&str]) -> String {
    let mut list = String::from(id_column);
    for col in value_columns {
        list.push_str(", ");
        list.push_str(col);
    }
    list
}

/// `SELECT … FROM table`
pub fn select_all(table: &str, id_column: &str, value_columns: &[&str]) -> String {
    format!(
        "SELECT {} FROM {table}",
        select_list(id_column, value_columns)
    )
}

/// `SELECT … FROM table LIMIT n OFFSET m`
///
/// `limit`/`offset` are integers formatted directly into the text, so no
/// extra bind parameters are needed.  Negative values are clamped to zero
/// before formatting: Postgres rejects a negative LIMIT outright while
/// SQLite reads `-1` as "unbounded", so neither may reach the backend.
pub fn select_page(
    table: &str,
    id_column: &str,
    value_columns: &[&str],
    limit: i64,
    offset: i64,
) -> String {
    format!(
        "{} LIMIT {} OFFSET {}",
        select_all(table, id_column, value_columns),
        limit.max(0),
        offset.max(0)
    )
}

/// `SELECT … FROM table WHERE id = $1`
pub fn select_by_id(table: &str, id_column: &str, value_columns: &[&str]) -> String {
    format!(
        "SELECT {} FROM {table} WHERE {id_column} = $1",
        select_list(id_column, value_columns)
    )
}

/// `SELECT … FROM table WHERE col = $1`
pub fn select_by_column(
    table: &str,
    id_column: &str,
    value_columns: &[&str],
    column: &str,
) -> String {
    format!(
        "SELECT {} FROM {table} WHERE {column} = $1",
        select_list(id_column, value_columns)
    )
}

/// `INSERT INTO table (cols…) VALUES ($1…) RETURNING …`
///
/// The `RETURNING` clause forces generated columns (the primary key) back
/// into the row the caller gets.
pub fn insert(table: &str, id_column: &str, value_columns: &[&str]) -> String {
    // A key-only entity has nothing to bind; let the backend fill in every
    // generated column.  `INSERT INTO t () VALUES ()` is not valid SQL.
    if value_columns.is_empty() {
        return format!(
            "INSERT INTO {table} DEFAULT VALUES RETURNING {}",
            select_list(id_column, value_columns)
        );
    }
    let placeholders = (1..=value_columns.len())
        .map(|n| format!("${n}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders}) RETURNING {}",
        value_columns.join(", "),
        select_list(id_column, value_columns)
    )
}

/// `UPDATE table SET col_a = $1, … WHERE id = $n RETURNING …`
///
/// Every value column is overwritten; the key bind comes last.
pub fn update(table: &str, id_column: &str, value_columns: &[&str]) -> String {
    // Overwriting zero attributes is a no-op: re-fetch the row instead so
    // the caller still gets its shape back, or `None` when it is absent.
    if value_columns.is_empty() {
        return select_by_id(table, id_column, value_columns);
    }
    let assignments = value_columns
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{col} = ${}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {table} SET {assignments} WHERE {id_column} = ${} RETURNING {}",
        value_columns.len() + 1,
        select_list(id_column, value_columns)
    )
}

/// `DELETE FROM table WHERE id = $1`
pub fn delete(table: &str, id_column: &str) -> String {
    format!("DELETE FROM {table} WHERE {id_column} = $1")
}
