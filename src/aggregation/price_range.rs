use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Month;

use crate::Error;

/// The labels of the price buckets, in ascending order.
///
/// The buckets are contiguous: the first holds prices up to and including 100,
/// each of the next eight holds prices above the previous bucket's upper bound
/// up to and including its own, and the last holds everything above 900.
pub const PRICE_RANGE_LABELS: [&str; 10] = [
    "0-100",
    "101-200",
    "201-300",
    "301-400",
    "401-500",
    "501-600",
    "601-700",
    "701-800",
    "801-900",
    "901-above",
];

const BUCKET_WIDTH: f64 = 100.0;

/// The number of items in one price bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    /// The bucket label, e.g. "101-200".
    pub range: String,
    /// The number of items priced within the bucket.
    pub count: u64,
}

/// Get the number of items in `month` for each price bucket.
///
/// Always returns one entry per bucket, in ascending order, including empty
/// buckets.
///
/// # Errors
/// Returns [Error::SqlError] if there is some SQL error.
pub fn get_price_range_counts(
    month: Month,
    connection: &Connection,
) -> Result<Vec<PriceRangeCount>, Error> {
    let mut counts = [0u64; PRICE_RANGE_LABELS.len()];

    let mut statement =
        connection.prepare("SELECT price FROM product_transaction WHERE sale_month = ?1")?;
    let prices = statement.query_map([u8::from(month)], |row| row.get::<_, f64>(0))?;

    for price in prices {
        counts[bucket_index(price?)] += 1;
    }

    Ok(PRICE_RANGE_LABELS
        .iter()
        .zip(counts)
        .map(|(label, count)| PriceRangeCount {
            range: (*label).to_owned(),
            count,
        })
        .collect())
}

/// The index into [PRICE_RANGE_LABELS] of the bucket holding `price`.
fn bucket_index(price: f64) -> usize {
    let last = PRICE_RANGE_LABELS.len() - 1;

    if price <= BUCKET_WIDTH {
        return 0;
    }

    // (100, 200] -> 1, (200, 300] -> 2, ...
    let index = (price / BUCKET_WIDTH).ceil() as usize - 1;
    index.min(last)
}
