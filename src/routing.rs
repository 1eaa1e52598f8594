//! Application router configuration for the JSON API and the dashboard.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    dashboard::{get_dashboard_page, initialize_dashboard},
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        get_category_count_endpoint, get_combined_endpoint, get_price_range_endpoint,
        get_statistics_endpoint, get_transactions_endpoint, initialize_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(endpoints::INITIALIZE_API, get(initialize_endpoint))
        .route(endpoints::TRANSACTIONS_API, get(get_transactions_endpoint))
        .route(endpoints::STATISTICS_API, get(get_statistics_endpoint))
        .route(endpoints::PRICE_RANGE_API, get(get_price_range_endpoint))
        .route(
            endpoints::CATEGORY_COUNT_API,
            get(get_category_count_endpoint),
        )
        .route(endpoints::COMBINED_API, get(get_combined_endpoint));

    let dashboard_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::DASHBOARD_INITIALIZE, post(initialize_dashboard));

    api_routes
        .merge(dashboard_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, endpoints, pagination::PaginationConfig, test_utils::march_scenario,
        transaction::{SeedConfig, replace_all_transactions},
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            SeedConfig::new("http://127.0.0.1:1/seed"),
            PaginationConfig::default(),
        )
        .unwrap();
        replace_all_transactions(&march_scenario(), &mut state.db_connection.lock().unwrap())
            .unwrap();

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn serves_api_and_dashboard() {
        let server = get_test_server();

        server
            .get(endpoints::STATISTICS_API)
            .add_query_param("month", "March")
            .await
            .assert_json(&json!({"totalAmount": 50.0, "soldItems": 1, "notSoldItems": 1}));

        let dashboard = server.get(endpoints::DASHBOARD_VIEW).await;
        dashboard.assert_status_ok();
        assert!(dashboard.text().contains("Transactions Dashboard"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        server
            .get("/api/transactions/nope")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unreachable_seed_source_is_bad_gateway() {
        let server = get_test_server();

        let response = server.get(endpoints::INITIALIZE_API).await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        response.assert_json(&json!({"error": "Failed to initialize database"}));
    }
}
