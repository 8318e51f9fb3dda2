//! The statistics card at the top of the dashboard.

use maud::{Markup, html};
use time::Month;

use crate::{
    aggregation::Statistics,
    html::{format_currency, placeholder},
};

const CARD_STYLE: &str = "w-full p-6 bg-white rounded-lg shadow dark:bg-gray-800";
const STAT_LABEL_STYLE: &str = "text-sm text-gray-500 dark:text-gray-400";
const STAT_VALUE_STYLE: &str = "text-2xl font-bold";

/// Renders the total sales and sold/unsold counts for `month`.
///
/// Shows a placeholder when the statistics could not be loaded.
pub(super) fn statistics_card(month: Month, statistics: Option<&Statistics>) -> Markup {
    html! {
        section id="statistics" class=(CARD_STYLE)
        {
            h3 class="text-xl font-semibold mb-4" { "Statistics - " (month) }

            @if let Some(statistics) = statistics {
                dl class="grid grid-cols-1 sm:grid-cols-3 gap-4"
                {
                    div data-stat="total-sales"
                    {
                        dt class=(STAT_LABEL_STYLE) { "Total sale" }
                        dd class=(STAT_VALUE_STYLE) { (format_currency(statistics.total_sales)) }
                    }
                    div data-stat="total-sold"
                    {
                        dt class=(STAT_LABEL_STYLE) { "Total sold items" }
                        dd class=(STAT_VALUE_STYLE) { (statistics.total_sold) }
                    }
                    div data-stat="total-not-sold"
                    {
                        dt class=(STAT_LABEL_STYLE) { "Total not sold items" }
                        dd class=(STAT_VALUE_STYLE) { (statistics.total_not_sold) }
                    }
                }
            } @else {
                (placeholder("Statistics are unavailable right now."))
            }
        }
    }
}
