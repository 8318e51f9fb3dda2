use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    db::lock_connection,
    pagination::PaginationConfig,
    transaction::{ListQuery, TransactionPage, list_transactions},
};

use super::optional_month;

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct TransactionsApiState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The page defaults used when the request does not specify them.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query string for listing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsParams {
    /// Text to look for in the title, description or price.
    pub search: Option<String>,
    /// The page number to return. Starts from 1.
    pub page: Option<u64>,
    /// The maximum number of transactions per page.
    #[serde(rename = "perPage")]
    pub per_page: Option<u64>,
    /// Only list transactions sold in this month.
    pub month: Option<String>,
}

/// Search the stored transactions and return one page of the matches.
pub async fn get_transactions(
    State(state): State<TransactionsApiState>,
    query: Result<Query<TransactionsParams>, QueryRejection>,
) -> Result<Json<TransactionPage>, Error> {
    let Query(params) = query?;
    let query = ListQuery {
        search: params.search.as_deref().unwrap_or_default(),
        month: optional_month(params.month.as_deref())?,
        page: params.page.unwrap_or(state.pagination_config.default_page),
        per_page: params
            .per_page
            .unwrap_or(state.pagination_config.default_page_size),
    };

    let connection = lock_connection(&state.db_connection)?;

    list_transactions(query, &connection).map(Json)
}
