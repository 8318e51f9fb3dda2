//! Page size defaults and the page links shown under the transactions table.

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions per page when not specified in a request.
    pub default_page_size: u64,
    /// The maximum number of consecutive page numbers in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_pages: 5,
        }
    }
}

/// One item in the pagination indicator.
#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    /// A link to another page.
    Page(u64),
    /// The page being shown.
    CurrPage(u64),
    /// A gap in the page numbers.
    Ellipsis,
    /// A link to the next page.
    NextButton(u64),
    /// A link to the previous page.
    BackButton(u64),
}

/// Lay out the pagination indicator for `curr_page` out of `page_count` pages.
///
/// At most `max_pages` consecutive page numbers are shown around the current
/// page. The first and last pages are always reachable, with an ellipsis
/// standing in for any pages skipped between them and the window.
/// A current page past the end gets a back button to the last page.
pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    if page_count == 0 {
        return Vec::new();
    }

    let max_pages = max_pages.max(1);
    let (first, last) = if page_count <= max_pages {
        (1, page_count)
    } else {
        let start = curr_page
            .saturating_sub(max_pages / 2)
            .clamp(1, page_count - max_pages + 1);
        (start, start + max_pages - 1)
    };

    let mut indicators = Vec::new();

    if curr_page > 1 {
        indicators.push(PaginationIndicator::BackButton(
            (curr_page - 1).min(page_count),
        ));
    }

    if first > 1 {
        indicators.push(PaginationIndicator::Page(1));
        if first > 2 {
            indicators.push(PaginationIndicator::Ellipsis);
        }
    }

    indicators.extend((first..=last).map(|page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    }));

    if last < page_count {
        if last < page_count - 1 {
            indicators.push(PaginationIndicator::Ellipsis);
        }
        indicators.push(PaginationIndicator::Page(page_count));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}
