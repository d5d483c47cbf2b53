//! The monthly spend aggregator and the API endpoints that expose it.

mod aggregator;
mod handlers;

pub use aggregator::MonthlySpend;
pub use handlers::{add_spent, get_spent, refresh_spent};
