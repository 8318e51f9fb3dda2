use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{Error, db::get_count};

/// The number of items in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category label. Serialized as `_id`, the grouping key clients expect.
    #[serde(rename = "_id")]
    pub category: String,
    /// The number of items in the category.
    pub count: u64,
}

/// Get the number of items in `month` for each category that has any.
///
/// Categories are ordered by name.
///
/// # Errors
/// Returns [Error::SqlError] if there is some SQL error.
pub fn get_category_counts(
    month: Month,
    connection: &Connection,
) -> Result<Vec<CategoryCount>, Error> {
    connection
        .prepare(
            "SELECT category, COUNT(*) FROM product_transaction
            WHERE sale_month = ?1
            GROUP BY category
            ORDER BY category ASC",
        )?
        .query_map([u8::from(month)], |row| {
            Ok(CategoryCount {
                category: row.get(0)?,
                count: get_count(row, 1)?,
            })
        })?
        .map(|count_result| count_result.map_err(Error::SqlError))
        .collect()
}
