use std::sync::{Arc, Mutex};

use axum::{
    Json,
    body::Bytes,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    loader::{DataSource, initialize_month},
};

use super::required_month;

/// The state needed for loading a month of transactions.
#[derive(Debug, Clone)]
pub struct InitializeState {
    /// The database connection that receives the transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Where the transactions are downloaded from.
    pub data_source: DataSource,
}

impl FromRef<AppState> for InitializeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            data_source: state.data_source.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct InitializeRequest {
    month: Option<String>,
}

/// The reply to a successful load.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct InitializeResponse {
    /// A human readable confirmation.
    pub message: String,
    /// The month that was loaded, e.g. "March".
    pub month: String,
    /// The number of transactions stored.
    pub count: usize,
}

/// Replace the stored transactions with the given month from the remote dataset.
///
/// The body is a JSON object with a `month` field. A missing, empty or
/// unreadable body is treated as a missing month.
pub async fn initialize_db(
    State(state): State<InitializeState>,
    body: Bytes,
) -> Result<Json<InitializeResponse>, Error> {
    let request: InitializeRequest = serde_json::from_slice(&body)
        .inspect_err(|error| tracing::debug!("Could not parse initialize request: {error}"))
        .unwrap_or_default();
    let month = required_month(request.month.as_deref())?;

    let count = initialize_month(month, &state.data_source, &state.db_connection).await?;

    Ok(Json(InitializeResponse {
        message: "Database initialized successfully".to_owned(),
        month: month.to_string(),
        count,
    }))
}
