//! The transactions dashboard page.
//!
//! Shows the statistics, charts and transactions table for one month.

mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
