use std::future::Future;

use crate::expense::{ExpenseQuery, ExpenseRow};

/// Errors reported by an [ExpenseBackend] read.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum QueryError {
    /// The backend rejected or failed to run the query.
    #[error("the expense query failed: {0}")]
    Sql(String),

    /// A stored or requested timestamp could not be converted.
    #[error("invalid expense timestamp \"{0}\"")]
    InvalidTimestamp(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLock,
}

impl From<rusqlite::Error> for QueryError {
    fn from(value: rusqlite::Error) -> Self {
        QueryError::Sql(value.to_string())
    }
}

/// An authenticated client for the hosted `expense` table.
///
/// Implementations run the filtered read described by an [ExpenseQuery] and
/// return the matching rows with the selected columns populated.
pub trait ExpenseBackend {
    /// Read the rows matching `query`.
    fn select_expenses(
        &self,
        query: &ExpenseQuery,
    ) -> impl Future<Output = Result<Vec<ExpenseRow>, QueryError>> + Send;
}

impl<B: ExpenseBackend> ExpenseBackend for &B {
    fn select_expenses(
        &self,
        query: &ExpenseQuery,
    ) -> impl Future<Output = Result<Vec<ExpenseRow>, QueryError>> + Send {
        (**self).select_expenses(query)
    }
}
