use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    aggregation::{
        CategoryCount, CombinedView, MonthlyAggregates, PriceRangeCount, Statistics,
        get_combined_view,
    },
};

use super::{MonthQuery, required_month};

/// The state needed for the monthly aggregates.
#[derive(Debug, Clone)]
pub struct AggregatesState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AggregatesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Total sales and the number of sold and unsold items for a month.
pub async fn get_statistics_summary(
    State(state): State<AggregatesState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Statistics>, Error> {
    let Query(query) = query?;
    let month = required_month(query.month.as_deref())?;

    state.db_connection.statistics(month).map(Json)
}

/// The number of items in each price bucket for a month.
pub async fn get_bar_chart(
    State(state): State<AggregatesState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<PriceRangeCount>>, Error> {
    let Query(query) = query?;
    let month = required_month(query.month.as_deref())?;

    state.db_connection.price_ranges(month).map(Json)
}

/// The number of items in each category for a month.
pub async fn get_pie_chart(
    State(state): State<AggregatesState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    let Query(query) = query?;
    let month = required_month(query.month.as_deref())?;

    state.db_connection.categories(month).map(Json)
}

/// The statistics, price buckets and categories for a month in one response.
pub async fn get_combined(
    State(state): State<AggregatesState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<CombinedView>, Error> {
    let Query(query) = query?;
    let month = required_month(query.month.as_deref())?;

    get_combined_view(month, state.db_connection.as_ref()).map(Json)
}
