//! The URIs of the pages and API endpoints.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page.
pub const DASHBOARD_VIEW: &str = "/dashboard";

/// The route for loading a month of transactions from the remote dataset.
pub const INITIALIZE_DB: &str = "/api/initialize-db";
/// The route for searching and paging through transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for a month's sales totals.
pub const STATISTICS_API: &str = "/api/transactions/statistics";
/// The route for a month's price range histogram.
pub const BAR_CHART_API: &str = "/api/transactions/bar-chart";
/// The route for a month's category distribution.
pub const PIE_CHART_API: &str = "/api/transactions/pie-chart";
/// The route for the statistics, histogram and categories together.
pub const COMBINED_API: &str = "/api/transactions/combined";
