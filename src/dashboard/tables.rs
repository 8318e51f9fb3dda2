//! The transactions table and its pagination controls.
//!
//! The table is swapped in place by htmx when the search text or page changes,
//! so every link here targets the `#transactions-table` section.

use maud::{Markup, html};
use serde::Serialize;
use time::Month;

use crate::{
    endpoints,
    html::{
        CATEGORY_BADGE_STYLE, LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency, placeholder,
    },
    pagination::{PaginationIndicator, create_pagination_indicators},
    transaction::{Transaction, TransactionPage},
};

/// The ID of the element replaced by partial updates.
pub(super) const TABLE_TARGET_ID: &str = "transactions-table";

/// The query string of a dashboard URL.
#[derive(Debug, Serialize)]
pub(super) struct DashboardLink<'a> {
    pub month: String,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub search: &'a str,
    pub page: u64,
}

impl DashboardLink<'_> {
    pub(super) fn to_url(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) => format!("{}?{query}", endpoints::DASHBOARD_VIEW),
            Err(error) => {
                tracing::error!("Could not encode dashboard link {self:?}: {error}");
                endpoints::DASHBOARD_VIEW.to_owned()
            }
        }
    }
}

/// Renders the transactions table section for one page of results.
///
/// `page` is `None` when the transactions could not be loaded.
pub(super) fn transactions_table(
    month: Month,
    search: &str,
    page: Option<&TransactionPage>,
    max_pages: u64,
) -> Markup {
    html! {
        section id=(TABLE_TARGET_ID) class="w-full"
        {
            @match page {
                Some(page) => {
                    div class="overflow-x-auto rounded-lg shadow"
                    {
                        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                        {
                            thead class=(TABLE_HEADER_STYLE)
                            {
                                tr
                                {
                                    @for heading in ["ID", "Title", "Description", "Price", "Category", "Sold", "Image"] {
                                        th scope="col" class=(TABLE_CELL_STYLE) { (heading) }
                                    }
                                }
                            }
                            tbody
                            {
                                @for transaction in &page.data {
                                    (transaction_row(transaction))
                                }

                                @if page.data.is_empty() {
                                    tr class=(TABLE_ROW_STYLE)
                                    {
                                        td colspan="7" class={(TABLE_CELL_STYLE) " text-center"}
                                        {
                                            "No transactions found."
                                        }
                                    }
                                }
                            }
                        }
                    }

                    div class="flex flex-col items-center gap-2 mt-4"
                    {
                        p class="text-sm text-gray-600 dark:text-gray-400"
                        {
                            "Page " (page.current_page) " of " (page.total_pages.max(1))
                        }

                        (pagination_nav(month, search, page.current_page, page.total_pages, max_pages))
                    }
                }
                None => {
                    (placeholder("Transactions are unavailable right now."))
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE) { (transaction.id) }
            td class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"} { (transaction.title) }
            td class=(TABLE_CELL_STYLE) title=(transaction.description)
            {
                p class="line-clamp-2" { (transaction.description) }
            }
            td class={(TABLE_CELL_STYLE) " text-right whitespace-nowrap"} { (format_currency(transaction.price)) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
            }
            td class=(TABLE_CELL_STYLE) { @if transaction.sold { "Yes" } @else { "No" } }
            td class=(TABLE_CELL_STYLE)
            {
                img
                    src=(transaction.image)
                    alt=(transaction.title)
                    loading="lazy"
                    class="h-12 w-12 object-contain";
            }
        }
    }
}

fn pagination_nav(
    month: Month,
    search: &str,
    current_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Markup {
    let indicators = create_pagination_indicators(current_page, page_count, max_pages);
    let href = |page: u64| {
        DashboardLink {
            month: month.to_string(),
            search,
            page,
        }
        .to_url()
    };
    let target = format!("#{TABLE_TARGET_ID}");

    html! {
        nav class="pagination flex justify-center" aria-label="Pagination"
        {
            ul class="pagination flex items-center gap-1"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::Page(page) => {
                                a
                                    href=(href(page))
                                    hx-get=(href(page))
                                    hx-target=(target)
                                    hx-swap="outerHTML"
                                    hx-push-url="true"
                                    class="block px-3 py-2 rounded-sm text-blue-600 hover:underline"
                                { (page) }
                            }
                            PaginationIndicator::CurrPage(page) => {
                                span
                                    aria-current="page"
                                    class="block px-3 py-2 rounded-sm font-bold text-black dark:text-white"
                                { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="px-3 py-2 text-gray-500" { "..." }
                            }
                            PaginationIndicator::BackButton(page) => {
                                a
                                    href=(href(page))
                                    hx-get=(href(page))
                                    hx-target=(target)
                                    hx-swap="outerHTML"
                                    hx-push-url="true"
                                    role="button"
                                    class=(LINK_STYLE)
                                { "Previous" }
                            }
                            PaginationIndicator::NextButton(page) => {
                                a
                                    href=(href(page))
                                    hx-get=(href(page))
                                    hx-target=(target)
                                    hx-swap="outerHTML"
                                    hx-push-url="true"
                                    role="button"
                                    class=(LINK_STYLE)
                                { "Next" }
                            }
                        }
                    }
                }
            }
        }
    }
}
