use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{Error, db::get_count};

/// Sales totals for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the prices of every item, sold or not.
    pub total_sales: f64,
    /// The number of items that sold.
    pub total_sold: u64,
    /// The number of items that did not sell.
    pub total_not_sold: u64,
}

/// Get the sales totals for the transactions in `month`.
///
/// A month without transactions has zero for every total.
///
/// # Errors
/// Returns [Error::SqlError] if there is some SQL error.
pub fn get_statistics(month: Month, connection: &Connection) -> Result<Statistics, Error> {
    connection
        .query_row(
            "SELECT
                COALESCE(SUM(price), 0.0),
                COALESCE(SUM(sold), 0),
                COALESCE(SUM(1 - sold), 0)
            FROM product_transaction
            WHERE sale_month = ?1",
            [u8::from(month)],
            |row| {
                Ok(Statistics {
                    total_sales: row.get(0)?,
                    total_sold: get_count(row, 1)?,
                    total_not_sold: get_count(row, 2)?,
                })
            },
        )
        .map_err(Error::from)
}
