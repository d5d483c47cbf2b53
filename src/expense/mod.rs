//! Expense rows and the boundary to the backend that stores them.
//!
//! The backend owns the `expense` table. This crate only reads from it through
//! [ExpenseBackend], building filters with [ExpenseQuery].

mod backend;
mod query;
mod sqlite;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub use backend::{ExpenseBackend, QueryError};
pub use query::{ExpenseQuery, Selection};
pub use sqlite::{SqliteExpenseBackend, create_expense, create_expense_table};

/// A row read from the `expense` table.
///
/// `created_at` is only populated when the query selected it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    /// The amount spent.
    pub price: f64,
    /// When the expense was recorded.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

/// Add up the prices of `rows`, zero for no rows.
pub fn total_price(rows: &[ExpenseRow]) -> f64 {
    rows.iter().map(|row| row.price).sum()
}
