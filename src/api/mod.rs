//! The JSON API.
//!
//! Every handler is a thin wrapper around a loader or query function: it
//! resolves the request parameters, takes the database lock for the duration
//! of one query and returns the result as JSON.

mod aggregates;
mod initialize;
mod transactions;

use serde::Deserialize;
use time::Month;

use crate::{Error, month::parse_month};

pub use aggregates::{get_bar_chart, get_combined, get_pie_chart, get_statistics_summary};
pub use initialize::initialize_db;
pub use transactions::get_transactions;

/// The query string of the month-filtered endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The English name of a month, e.g. "March".
    pub month: Option<String>,
}

/// Resolve a month parameter that must be present.
///
/// A blank value counts as missing.
///
/// # Errors
/// Returns a:
/// - [Error::MissingParameter] if `month` is `None` or blank,
/// - or [Error::InvalidMonth] if `month` is not the name of a month.
pub(crate) fn required_month(month: Option<&str>) -> Result<Month, Error> {
    match month.map(str::trim) {
        None | Some("") => Err(Error::MissingParameter("Month")),
        Some(name) => parse_month(name),
    }
}

/// Resolve a month parameter that may be left out.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `month` is given but is not the name of a month.
pub(crate) fn optional_month(month: Option<&str>) -> Result<Option<Month>, Error> {
    match month.map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => parse_month(name).map(Some),
    }
}
