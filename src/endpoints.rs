//! The API endpoints URIs.

/// The root route which responds with a welcome message.
pub const ROOT: &str = "/";
/// The route for seeding the database from the seed document.
pub const INIT_DB: &str = "/api/initDB";
/// The route for listing a page of a month's transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for a month's sales totals.
pub const STATISTICS: &str = "/api/statistics";
/// An alias of [STATISTICS] kept for existing clients.
pub const MONTHLY_STATISTICS: &str = "/api/monthly-statistics";
/// The route for a month's price histogram.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for a month's category distribution.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The route for seeding the database and getting every monthly report at once.
pub const COMBINED_DATA: &str = "/api/combined-data";

// These tests are here so that we know the routes will not panic when parsed.
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
        assert_endpoint_is_valid_uri(endpoints::INIT_DB);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::STATISTICS);
        assert_endpoint_is_valid_uri(endpoints::MONTHLY_STATISTICS);
        assert_endpoint_is_valid_uri(endpoints::BAR_CHART);
        assert_endpoint_is_valid_uri(endpoints::PIE_CHART);
        assert_endpoint_is_valid_uri(endpoints::COMBINED_DATA);
    }
}
