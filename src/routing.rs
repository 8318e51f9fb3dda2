//! Application router configuration for the JSON API and the dashboard page.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState, Error,
    api::{
        get_bar_chart, get_combined, get_pie_chart, get_statistics_summary, get_transactions,
        initialize_db,
    },
    dashboard::get_dashboard_page,
    endpoints,
    logging::logging_middleware,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(endpoints::INITIALIZE_DB, post(initialize_db))
        .route(endpoints::TRANSACTIONS_API, get(get_transactions))
        .route(endpoints::STATISTICS_API, get(get_statistics_summary))
        .route(endpoints::BAR_CHART_API, get(get_bar_chart))
        .route(endpoints::PIE_CHART_API, get(get_pie_chart))
        .route(endpoints::COMBINED_API, get(get_combined));

    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page));

    api_routes
        .merge(view_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page, test_utils::get_header};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        assert_eq!(get_header(&response, "location"), endpoints::DASHBOARD_VIEW);
    }
}
