//! A SQLite implementation of [ExpenseBackend].

use std::{
    future::Future,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, params_from_iter, types::Value};
use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{
    Error,
    expense::{ExpenseBackend, ExpenseQuery, ExpenseRow, QueryError},
    user::UserID,
};

/// Storage format for `created_at`, always in UTC, e.g. "2024-03-01T00:00:00.000000Z".
///
/// The width is fixed so that comparing the text compares the instants.
const CREATED_AT_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
);

/// Reads expenses from a shared SQLite connection.
#[derive(Debug, Clone)]
pub struct SqliteExpenseBackend {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteExpenseBackend {
    /// Create a backend that reads from `connection`.
    ///
    /// The `expense` table must already exist, see [create_expense_table].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Arc<Mutex<Connection>> {
        &self.connection
    }
}

impl ExpenseBackend for SqliteExpenseBackend {
    fn select_expenses(
        &self,
        query: &ExpenseQuery,
    ) -> impl Future<Output = Result<Vec<ExpenseRow>, QueryError>> + Send {
        let connection = self.connection.clone();
        let query = query.clone();

        async move {
            let connection = connection
                .lock()
                .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
                .map_err(|_| QueryError::DatabaseLock)?;

            select_expenses(&query, &connection)
        }
    }
}

/// Create the expense table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                price REAL NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_user_created_at
            ON expense(user_id, created_at)",
        (),
    )?;

    Ok(())
}

/// Insert an expense for `user_id` and return its row ID.
///
/// Rows are written by the platform that hosts the table, this exists for
/// seeding test databases.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred, or a
/// [Error::Query] if `created_at` cannot be formatted.
pub fn create_expense(
    user_id: UserID,
    price: f64,
    created_at: OffsetDateTime,
    connection: &Connection,
) -> Result<i64, Error> {
    let created_at = format_created_at(created_at)?;

    connection.execute(
        "INSERT INTO expense (user_id, price, created_at) VALUES (?1, ?2, ?3)",
        (user_id.as_i64(), price, created_at),
    )?;

    Ok(connection.last_insert_rowid())
}

fn select_expenses(
    query: &ExpenseQuery,
    connection: &Connection,
) -> Result<Vec<ExpenseRow>, QueryError> {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    if let Some(user_id) = query.user_id() {
        params.push(Value::Integer(user_id.as_i64()));
        conditions.push(format!("user_id = ?{}", params.len()));
    }

    if let Some(lower) = query.created_at_gte() {
        params.push(Value::Text(format_created_at(lower)?));
        conditions.push(format!("created_at >= ?{}", params.len()));
    }

    if let Some(upper) = query.created_at_lt() {
        params.push(Value::Text(format_created_at(upper)?));
        conditions.push(format!("created_at < ?{}", params.len()));
    }

    let selection = query.selection();
    let mut sql = format!("SELECT {} FROM expense", selection.columns());
    if !conditions.is_empty() {
        sql = format!("{sql} WHERE {}", conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at, id");

    let mut stmt = connection.prepare(&sql)?;
    let raw_rows = stmt
        .query_map(params_from_iter(params), |row| {
            let created_at: Option<String> = if selection.includes_created_at() {
                Some(row.get(1)?)
            } else {
                None
            };

            Ok((row.get::<_, f64>(0)?, created_at))
        })?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    raw_rows
        .into_iter()
        .map(|(price, created_at)| {
            Ok(ExpenseRow {
                price,
                created_at: created_at.as_deref().map(parse_created_at).transpose()?,
            })
        })
        .collect()
}

fn format_created_at(created_at: OffsetDateTime) -> Result<String, QueryError> {
    created_at
        .to_offset(UtcOffset::UTC)
        .format(CREATED_AT_FORMAT)
        .map_err(|_| QueryError::InvalidTimestamp(created_at.to_string()))
}

fn parse_created_at(text: &str) -> Result<OffsetDateTime, QueryError> {
    PrimitiveDateTime::parse(text, CREATED_AT_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|_| QueryError::InvalidTimestamp(text.to_owned()))
}
