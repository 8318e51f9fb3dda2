use std::sync::Mutex;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{Error, db::lock_connection};

use super::{
    CategoryCount, PriceRangeCount, Statistics, get_category_counts, get_price_range_counts,
    get_statistics,
};

/// The statistics, price histogram and category counts for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedView {
    /// Sales totals.
    pub statistics: Statistics,
    /// Item counts per price bucket.
    pub price_range_data: Vec<PriceRangeCount>,
    /// Item counts per category.
    pub category_data: Vec<CategoryCount>,
}

/// A source of the monthly aggregates.
///
/// Each method is a separate read of the store.
pub trait MonthlyAggregates {
    /// Sales totals for `month`.
    fn statistics(&self, month: Month) -> Result<Statistics, Error>;

    /// Item counts per price bucket for `month`.
    fn price_ranges(&self, month: Month) -> Result<Vec<PriceRangeCount>, Error>;

    /// Item counts per category for `month`.
    fn categories(&self, month: Month) -> Result<Vec<CategoryCount>, Error>;
}

/// The shared connection takes its lock separately for each aggregate.
impl MonthlyAggregates for Mutex<Connection> {
    fn statistics(&self, month: Month) -> Result<Statistics, Error> {
        get_statistics(month, &*lock_connection(self)?)
    }

    fn price_ranges(&self, month: Month) -> Result<Vec<PriceRangeCount>, Error> {
        get_price_range_counts(month, &*lock_connection(self)?)
    }

    fn categories(&self, month: Month) -> Result<Vec<CategoryCount>, Error> {
        get_category_counts(month, &*lock_connection(self)?)
    }
}

/// Read the three aggregates for `month` and put them together.
///
/// The aggregates are read one after the other, not as one snapshot. If the
/// store is reloaded between two reads, the parts describe different data.
///
/// # Errors
/// Returns the first error from any of the reads.
pub fn get_combined_view(
    month: Month,
    aggregates: &impl MonthlyAggregates,
) -> Result<CombinedView, Error> {
    let statistics = aggregates.statistics(month)?;
    let price_range_data = aggregates.price_ranges(month)?;
    let category_data = aggregates.categories(month)?;

    Ok(CombinedView {
        statistics,
        price_range_data,
        category_data,
    })
}
