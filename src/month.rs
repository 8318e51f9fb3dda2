//! Resolving English month names and the sale month of a timestamp.
//!
//! Months are matched without regard to the year, so "March" selects sales
//! made in March of any year.

use time::{Month, OffsetDateTime, UtcOffset};

use crate::Error;

/// Every month, in calendar order.
pub(crate) const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Resolve the English name of a month, e.g. "march", "March" or "MARCH".
///
/// Leading and trailing whitespace is ignored.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `name` is not the full name of a month.
pub fn parse_month(name: &str) -> Result<Month, Error> {
    let name = name.trim();

    MONTHS
        .into_iter()
        .find(|month| month.to_string().eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::InvalidMonth(name.to_owned()))
}

/// The calendar month a sale falls in, taken in UTC.
pub fn sale_month(date_of_sale: OffsetDateTime) -> Month {
    date_of_sale.to_offset(UtcOffset::UTC).month()
}
