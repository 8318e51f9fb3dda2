//! Loads one month of transactions from the remote dataset into the store.

use std::{sync::Mutex, time::Duration};

use rusqlite::Connection;
use time::Month;

use crate::{
    Error,
    db::lock_connection,
    month::sale_month,
    transaction::{Transaction, replace_transactions},
};

/// Where the product transaction dataset is published.
pub const DEFAULT_DATA_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// The remote JSON dataset of product transactions.
#[derive(Debug, Clone)]
pub struct DataSource {
    client: reqwest::Client,
    url: String,
}

impl DataSource {
    /// Create a data source that downloads the dataset from `url`.
    ///
    /// # Errors
    /// Returns [Error::UpstreamFetchError] if the HTTP client cannot be created.
    pub fn new(url: impl Into<String>) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|error| Error::UpstreamFetchError(error.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The URL the dataset is downloaded from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and parse every transaction in the dataset.
    ///
    /// # Errors
    /// Returns a:
    /// - [Error::UpstreamFetchError] if the request fails or the response status is not a success,
    /// - or [Error::UpstreamFormatError] if the body is not a JSON array of transactions or a
    ///   transaction has a negative price.
    pub async fn fetch(&self) -> Result<Vec<Transaction>, Error> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| Error::UpstreamFetchError(error.to_string()))
            .inspect_err(|error| tracing::error!("Could not fetch {}: {error}", self.url))?
            .bytes()
            .await
            .map_err(|error| Error::UpstreamFetchError(error.to_string()))?;

        let transactions: Vec<Transaction> = serde_json::from_slice(&body)
            .map_err(|error| Error::UpstreamFormatError(error.to_string()))
            .inspect_err(|error| tracing::error!("Could not parse {}: {error}", self.url))?;

        if let Some(bad) = transactions
            .iter()
            .find(|transaction| !transaction.price.is_finite() || transaction.price < 0.0)
        {
            let error = Error::UpstreamFormatError(format!(
                "transaction {} has the invalid price {}",
                bad.id, bad.price
            ));
            tracing::error!("{error}");
            return Err(error);
        }

        tracing::debug!(
            "Fetched {} transactions from {}",
            transactions.len(),
            self.url
        );

        Ok(transactions)
    }
}

/// Keep only the transactions sold in `month`, in any year.
pub fn filter_by_month(transactions: Vec<Transaction>, month: Month) -> Vec<Transaction> {
    transactions
        .into_iter()
        .filter(|transaction| sale_month(transaction.date_of_sale) == month)
        .collect()
}

/// Replace the stored transactions with the ones from `source` sold in `month`.
///
/// The download happens before the store is locked. The old transactions are
/// only removed if every new transaction is inserted.
///
/// Returns the number of transactions stored.
///
/// # Errors
/// Returns a:
/// - [Error::UpstreamFetchError] or [Error::UpstreamFormatError] if the dataset cannot be fetched,
/// - [Error::DatabaseLockError] if the store lock is poisoned,
/// - or [Error::SqlError] if the transactions cannot be stored.
pub async fn initialize_month(
    month: Month,
    source: &DataSource,
    store: &Mutex<Connection>,
) -> Result<usize, Error> {
    let transactions = filter_by_month(source.fetch().await?, month);

    let connection = lock_connection(store)?;
    let count = replace_transactions(&transactions, &connection)?;

    tracing::info!("Loaded {count} transactions for {month}");

    Ok(count)
}
