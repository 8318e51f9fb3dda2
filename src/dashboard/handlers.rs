//! Dashboard HTTP handler and view rendering.
//!
//! The page shows one month at a time: the statistics card, the price range and
//! category charts, and a searchable, paginated table. Each panel is loaded
//! independently, so a failed query only replaces its own panel with a
//! placeholder.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Month;

use crate::{
    AppState,
    aggregation::MonthlyAggregates,
    api::optional_month,
    dashboard::{
        cards::statistics_card,
        charts::{
            DashboardChart, category_chart, chart_container, charts_script, price_range_chart,
        },
        tables::{TABLE_TARGET_ID, transactions_table},
    },
    db::lock_connection,
    endpoints,
    html::{
        ECHARTS_SCRIPT_URL, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, base, placeholder,
    },
    month::MONTHS,
    pagination::PaginationConfig,
    transaction::{ListQuery, TransactionPage, list_transactions},
};

/// The month shown when the request does not name a valid one.
pub const DEFAULT_MONTH: Month = Month::March;

const PRICE_RANGE_CHART_ID: &str = "price-range-chart";
const CATEGORY_CHART_ID: &str = "category-chart";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls the table's page size and page links.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query string of the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The English name of the month to show.
    pub month: Option<String>,
    /// Text to look for in the transactions table.
    pub search: Option<String>,
    /// The page of the transactions table to show. Starts from 1.
    pub page: Option<u64>,
}

/// Display the dashboard for the requested month.
///
/// htmx requests only get the transactions table, for in-place search and paging.
/// A query string that cannot be read shows the default month.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::warn!("Showing the default dashboard: {}", rejection.body_text());
            DashboardQuery::default()
        }
    };
    let month = resolve_month(query.month.as_deref());
    let search = query.search.as_deref().unwrap_or_default().trim();
    let page = query
        .page
        .filter(|page| *page > 0)
        .unwrap_or(state.pagination_config.default_page);

    let transactions = get_transactions_page(&state, month, search, page);
    let table = transactions_table(
        month,
        search,
        transactions.as_ref(),
        state.pagination_config.max_pages,
    );

    if is_htmx_request {
        return table.into_response();
    }

    let statistics = state
        .db_connection
        .statistics(month)
        .inspect_err(|error| tracing::warn!("Could not load statistics for {month}: {error}"))
        .ok();
    let price_range_chart = state
        .db_connection
        .price_ranges(month)
        .inspect_err(|error| tracing::warn!("Could not load price ranges for {month}: {error}"))
        .ok()
        .map(|price_ranges| DashboardChart {
            id: PRICE_RANGE_CHART_ID,
            options: price_range_chart(month, &price_ranges).to_string(),
        });
    let category_chart = state
        .db_connection
        .categories(month)
        .inspect_err(|error| tracing::warn!("Could not load categories for {month}: {error}"))
        .ok()
        .map(|categories| DashboardChart {
            id: CATEGORY_CHART_ID,
            options: category_chart(month, &categories).to_string(),
        });

    dashboard_view(
        month,
        search,
        statistics_card(month, statistics.as_ref()),
        [price_range_chart, category_chart],
        table,
    )
    .into_response()
}

/// The month named by `month`, or [DEFAULT_MONTH] if it is missing or not a month.
fn resolve_month(month: Option<&str>) -> Month {
    match optional_month(month) {
        Ok(Some(month)) => month,
        Ok(None) => DEFAULT_MONTH,
        Err(error) => {
            tracing::warn!("Showing {DEFAULT_MONTH} instead: {error}");
            DEFAULT_MONTH
        }
    }
}

fn get_transactions_page(
    state: &DashboardState,
    month: Month,
    search: &str,
    page: u64,
) -> Option<TransactionPage> {
    let query = ListQuery {
        search,
        month: Some(month),
        page,
        per_page: state.pagination_config.default_page_size,
    };

    lock_connection(&state.db_connection)
        .and_then(|connection| list_transactions(query, &connection))
        .inspect_err(|error| tracing::warn!("Could not load transactions for {month}: {error}"))
        .ok()
}

fn dashboard_view(
    month: Month,
    search: &str,
    statistics: Markup,
    charts: [Option<DashboardChart>; 2],
    table: Markup,
) -> Markup {
    let table_target = format!("#{TABLE_TARGET_ID}");

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-3xl font-bold mb-6" { "Transactions Dashboard" }

            form
                method="get"
                action=(endpoints::DASHBOARD_VIEW)
                class="w-full grid grid-cols-1 md:grid-cols-2 gap-4 mb-6"
            {
                div
                {
                    label for="search" class=(FORM_LABEL_STYLE) { "Search transaction" }
                    input
                        type="search"
                        id="search"
                        name="search"
                        value=(search)
                        placeholder="Title, description or price"
                        class=(FORM_TEXT_INPUT_STYLE)
                        hx-get=(endpoints::DASHBOARD_VIEW)
                        hx-trigger="input changed delay:300ms, search"
                        hx-include="closest form"
                        hx-target=(table_target)
                        hx-swap="outerHTML"
                        hx-push-url="true";
                }

                div
                {
                    label for="month" class=(FORM_LABEL_STYLE) { "Month" }
                    select
                        id="month"
                        name="month"
                        class=(FORM_TEXT_INPUT_STYLE)
                        onchange="this.form.submit()"
                    {
                        @for choice in MONTHS {
                            option value=(choice) selected[choice == month] { (choice) }
                        }
                    }
                }
            }

            div class="w-full mb-6" { (statistics) }

            section id="charts" class="w-full mb-6"
            {
                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    @for (chart, name) in charts.iter().zip(["Price ranges", "Categories"]) {
                        @match chart {
                            Some(chart) => { (chart_container(chart)) }
                            None => { (placeholder(&format!("{name} are unavailable right now."))) }
                        }
                    }
                }
            }

            (table)
        }
    );

    let loaded_charts: Vec<DashboardChart> = charts.into_iter().flatten().collect();
    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(&loaded_charts),
    ];

    base("Dashboard", &scripts, &content)
}
