//! The API endpoints URIs.

/// The current user's cached total for this month. GET reads it, POST adds to it.
pub const SPENT: &str = "/api/spent";
/// Recompute the current user's total for this month from the backend.
pub const SPENT_REFRESH: &str = "/api/spent/refresh";
/// The current user's expense entries for this month.
pub const ENTRIES_THIS_MONTH: &str = "/api/entries/this_month";
/// The current user's expense entries for last month.
pub const ENTRIES_LAST_MONTH: &str = "/api/entries/last_month";
/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/coffee";
