//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the transactions table, statistics and charts.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The route for reloading the transactions from the dashboard.
pub const DASHBOARD_INITIALIZE: &str = "/dashboard/initialize";

/// The route to reload every transaction from the seed source.
pub const INITIALIZE_API: &str = "/api/transactions/initialize";
/// The route to search and page through a month's transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for a month's sales totals.
pub const STATISTICS_API: &str = "/api/transactions/statistics";
/// The route for a month's price histogram.
pub const PRICE_RANGE_API: &str = "/api/transactions/price-range";
/// The route for a month's category histogram.
pub const CATEGORY_COUNT_API: &str = "/api/transactions/category-count";
/// The route for all of a month's summaries in one response.
pub const COMBINED_API: &str = "/api/transactions/combined";

// These tests are here so that we know when we call `Uri::from_static` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_INITIALIZE);

        assert_endpoint_is_valid_uri(endpoints::INITIALIZE_API);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::STATISTICS_API);
        assert_endpoint_is_valid_uri(endpoints::PRICE_RANGE_API);
        assert_endpoint_is_valid_uri(endpoints::CATEGORY_COUNT_API);
        assert_endpoint_is_valid_uri(endpoints::COMBINED_API);
    }
}
