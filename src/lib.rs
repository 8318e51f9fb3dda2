//! A dashboard for a month of product transactions.
//!
//! The library loads a fixed JSON dataset of product transactions into a
//! SQLite store and serves a JSON API with paginated search and monthly
//! aggregates (sales statistics, a price-range histogram and a category
//! distribution), plus an HTML dashboard that renders the same data.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

mod aggregation;
mod api;
mod app_state;
mod dashboard;
mod db;
mod endpoints;
mod html;
mod loader;
mod logging;
mod month;
mod pagination;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use aggregation::{
    CategoryCount, CombinedView, MonthlyAggregates, PriceRangeCount, Statistics,
    get_category_counts, get_combined_view, get_price_range_counts, get_statistics,
};
pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use loader::{DEFAULT_DATA_URL, DataSource, initialize_month};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::parse_month;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use transaction::{ListQuery, Transaction, TransactionPage, list_transactions};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required request parameter was not provided.
    ///
    /// The string is the human readable name of the parameter, e.g. "Month".
    #[error("{0} is required")]
    MissingParameter(&'static str),

    /// The string is not the English name of a month.
    #[error("\"{0}\" is not a valid month name")]
    InvalidMonth(String),

    /// A page number or page size of zero was requested.
    #[error("page and perPage must be at least 1")]
    InvalidPagination,

    /// The query string could not be read, e.g. a page number that is not a number.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// The transaction dataset could not be downloaded.
    ///
    /// Covers connection failures and non-success HTTP statuses.
    #[error("could not fetch the transaction dataset: {0}")]
    UpstreamFetchError(String),

    /// The transaction dataset was downloaded but could not be understood.
    #[error("the transaction dataset is malformed: {0}")]
    UpstreamFormatError(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQuery(rejection.body_text())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// A description of what went wrong.
    pub error: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingParameter(_)
            | Error::InvalidMonth(_)
            | Error::InvalidPagination
            | Error::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::UpstreamFetchError(_)
            | Error::UpstreamFormatError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            // The cause is only for the server logs.
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, ErrorBody};

    async fn get_error_body(error: Error) -> (StatusCode, ErrorBody) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn missing_month_is_a_client_error() {
        let (status, body) = get_error_body(Error::MissingParameter("Month")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Month is required");
    }

    #[tokio::test]
    async fn invalid_month_names_the_month() {
        let (status, body) = get_error_body(Error::InvalidMonth("Marchh".to_owned())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("Marchh"), "got {}", body.error);
    }

    #[tokio::test]
    async fn server_errors_hide_the_cause() {
        let (status, body) =
            get_error_body(Error::UpstreamFetchError("connection refused".to_owned())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.error.contains("connection refused"));
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }
}
