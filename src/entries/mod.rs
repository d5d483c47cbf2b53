//! Fetching the current user's expense entries for this month and last month.

mod fetcher;
mod handlers;

pub use fetcher::{EntryFetcher, FetchResult};
pub use handlers::{get_entries_last_month, get_entries_this_month};
