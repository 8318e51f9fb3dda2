//! Monthly aggregates over the stored transactions.
//!
//! Every aggregate is a read-only query restricted to the transactions sold in
//! one calendar month, of any year:
//! - **Statistics**: total sales and the number of sold and unsold items
//! - **Price ranges**: a histogram over ten fixed price buckets
//! - **Categories**: the number of items in each category
//! - **Combined view**: the three above, read one after the other

mod category;
mod combined;
mod price_range;
mod statistics;

pub use category::{CategoryCount, get_category_counts};
pub use combined::{CombinedView, MonthlyAggregates, get_combined_view};
#[cfg(test)]
pub use price_range::PRICE_RANGE_LABELS;
pub use price_range::{PriceRangeCount, get_price_range_counts};
pub use statistics::{Statistics, get_statistics};
