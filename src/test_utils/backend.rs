use std::{future::Future, sync::Mutex};

use crate::expense::{ExpenseBackend, ExpenseQuery, ExpenseRow, QueryError};

/// A backend that records every query and answers with a canned result.
pub(crate) struct RecordingBackend {
    queries: Mutex<Vec<ExpenseQuery>>,
    response: Mutex<Result<Vec<ExpenseRow>, QueryError>>,
}

impl RecordingBackend {
    pub(crate) fn returning(rows: Vec<ExpenseRow>) -> Self {
        Self {
            queries: Mutex::new(Vec::new()),
            response: Mutex::new(Ok(rows)),
        }
    }

    pub(crate) fn failing(error: QueryError) -> Self {
        Self {
            queries: Mutex::new(Vec::new()),
            response: Mutex::new(Err(error)),
        }
    }

    pub(crate) fn prices(prices: &[f64]) -> Self {
        Self::returning(
            prices
                .iter()
                .map(|&price| ExpenseRow {
                    price,
                    created_at: None,
                })
                .collect(),
        )
    }

    /// Change what the next queries return.
    pub(crate) fn set_response(&self, response: Result<Vec<ExpenseRow>, QueryError>) {
        *self.response.lock().unwrap() = response;
    }

    pub(crate) fn queries(&self) -> Vec<ExpenseQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl ExpenseBackend for RecordingBackend {
    fn select_expenses(
        &self,
        query: &ExpenseQuery,
    ) -> impl Future<Output = Result<Vec<ExpenseRow>, QueryError>> + Send {
        self.queries.lock().unwrap().push(query.clone());
        let response = self.response.lock().unwrap().clone();

        std::future::ready(response)
    }
}
