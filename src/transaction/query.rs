//! Paginated search over the stored transactions.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    db::{FOLD_CASE_FUNCTION, get_count},
};

use super::core::{TRANSACTION_COLUMNS, Transaction, map_transaction_row};

/// Selects one page of transactions.
#[derive(Debug, Clone, Copy)]
pub struct ListQuery<'a> {
    /// Case-insensitive text to find in the title, description or price.
    /// An empty string matches every transaction.
    pub search: &'a str,
    /// Only include transactions sold in this month, if set.
    pub month: Option<Month>,
    /// The page number to return. Starts from 1.
    pub page: u64,
    /// The maximum number of transactions per page.
    pub per_page: u64,
}

/// One page of transactions and where it sits among the other pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The transactions on the requested page.
    pub data: Vec<Transaction>,
    /// The number of pages needed to show every matching transaction.
    pub total_pages: u64,
    /// The requested page number.
    pub current_page: u64,
}

/// Get the page of transactions described by `query`.
///
/// Transactions are ordered by their upstream ID, then by insertion order.
/// A page past the last page is empty rather than an error.
///
/// # Errors
/// Returns a:
/// - [Error::InvalidPagination] if `page` or `per_page` is zero,
/// - or [Error::SqlError] if there is some SQL error.
pub fn list_transactions(
    query: ListQuery,
    connection: &Connection,
) -> Result<TransactionPage, Error> {
    if query.page == 0 || query.per_page == 0 {
        return Err(Error::InvalidPagination);
    }

    // Folded in Rust and in SQL with the same rules, so non-ASCII letters match.
    let needle = query.search.to_lowercase();
    let month = query.month.map(u8::from);

    let filter = format!(
        "WHERE (?1 = '' \
            OR instr({FOLD_CASE_FUNCTION}(title), ?1) > 0 \
            OR instr({FOLD_CASE_FUNCTION}(description), ?1) > 0 \
            OR instr(CAST(price AS TEXT), ?1) > 0) \
        AND (?2 IS NULL OR sale_month = ?2)"
    );

    let match_count = connection.query_row(
        &format!("SELECT COUNT(*) FROM product_transaction {filter}"),
        (&needle, month),
        |row| get_count(row, 0),
    )?;

    let limit = i64::try_from(query.per_page).unwrap_or(i64::MAX);
    let offset = i64::try_from((query.page - 1).saturating_mul(query.per_page)).unwrap_or(i64::MAX);

    let data = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM product_transaction {filter} \
            ORDER BY id ASC, row_id ASC LIMIT ?3 OFFSET ?4"
        ))?
        .query_map((&needle, month, limit, offset), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransactionPage {
        data,
        total_pages: match_count.div_ceil(query.per_page),
        current_page: query.page,
    })
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::datetime};

    use crate::{
        Error,
        test_utils::{get_test_connection, test_transaction},
        transaction::{Transaction, replace_transactions},
    };

    use super::{ListQuery, list_transactions};

    fn query(search: &str, page: u64, per_page: u64) -> ListQuery<'_> {
        ListQuery {
            search,
            month: None,
            page,
            per_page,
        }
    }

    fn insert_numbered_transactions(count: i64, conn: &rusqlite::Connection) {
        let transactions: Vec<_> = (1..=count)
            .map(|id| test_transaction(id, id as f64, datetime!(2021-03-01 09:00 UTC)))
            .collect();
        replace_transactions(&transactions, conn).unwrap();
    }

    #[test]
    fn pages_through_matches() {
        let conn = get_test_connection();
        insert_numbered_transactions(25, &conn);

        let first = list_transactions(query("", 1, 10), &conn).unwrap();
        let third = list_transactions(query("", 3, 10), &conn).unwrap();
        let fourth = list_transactions(query("", 4, 10), &conn).unwrap();

        assert_eq!(first.total_pages, 3);
        assert_eq!(first.data.len(), 10);
        assert_eq!(third.data.len(), 5);
        assert_eq!(third.current_page, 3);
        assert!(fourth.data.is_empty());
        assert_eq!(fourth.total_pages, 3);
        assert_eq!(fourth.current_page, 4);
    }

    #[test]
    fn pages_are_ordered_by_id() {
        let conn = get_test_connection();
        let transactions: Vec<_> = [3, 1, 2]
            .into_iter()
            .map(|id| test_transaction(id, 1.0, datetime!(2021-03-01 09:00 UTC)))
            .collect();
        replace_transactions(&transactions, &conn).unwrap();

        let page = list_transactions(query("", 1, 10), &conn).unwrap();

        let ids: Vec<_> = page.data.iter().map(|transaction| transaction.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn empty_store_has_no_pages() {
        let conn = get_test_connection();

        let page = list_transactions(query("", 1, 10), &conn).unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn rejects_zero_page_or_page_size() {
        let conn = get_test_connection();

        assert_eq!(
            list_transactions(query("", 0, 10), &conn),
            Err(Error::InvalidPagination)
        );
        assert_eq!(
            list_transactions(query("", 1, 0), &conn),
            Err(Error::InvalidPagination)
        );
    }

    #[test]
    fn search_is_case_insensitive_on_title() {
        let conn = get_test_connection();
        let widget = Transaction {
            title: "Acme Widget".to_owned(),
            ..test_transaction(1, 5.0, datetime!(2021-03-01 09:00 UTC))
        };
        let other = test_transaction(2, 6.0, datetime!(2021-03-01 09:00 UTC));
        replace_transactions(&[widget.clone(), other], &conn).unwrap();

        let page = list_transactions(query("widget", 1, 10), &conn).unwrap();

        assert_eq!(page.data, vec![widget]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn search_matches_description() {
        let conn = get_test_connection();
        let backpack = Transaction {
            description: "Fits a 15 inch LAPTOP".to_owned(),
            ..test_transaction(1, 5.0, datetime!(2021-03-01 09:00 UTC))
        };
        let other = test_transaction(2, 6.0, datetime!(2021-03-01 09:00 UTC));
        replace_transactions(&[backpack.clone(), other], &conn).unwrap();

        let page = list_transactions(query("laptop", 1, 10), &conn).unwrap();

        assert_eq!(page.data, vec![backpack]);
    }

    #[test]
    fn search_matches_price_text() {
        let conn = get_test_connection();
        let expensive = test_transaction(1, 329.85, datetime!(2021-03-01 09:00 UTC));
        let cheap = test_transaction(2, 9.99, datetime!(2021-03-01 09:00 UTC));
        replace_transactions(&[expensive.clone(), cheap], &conn).unwrap();

        let page = list_transactions(query("329.8", 1, 10), &conn).unwrap();

        assert_eq!(page.data, vec![expensive]);
    }

    #[test]
    fn search_treats_wildcards_literally() {
        let conn = get_test_connection();
        let discounted = Transaction {
            title: "50% off".to_owned(),
            ..test_transaction(1, 5.0, datetime!(2021-03-01 09:00 UTC))
        };
        let other = Transaction {
            title: "500 off".to_owned(),
            ..test_transaction(2, 5.0, datetime!(2021-03-01 09:00 UTC))
        };
        replace_transactions(&[discounted.clone(), other], &conn).unwrap();

        let page = list_transactions(query("50%", 1, 10), &conn).unwrap();

        assert_eq!(page.data, vec![discounted]);
    }

    #[test]
    fn search_counts_only_matches() {
        let conn = get_test_connection();
        let mut transactions: Vec<_> = (1..=25)
            .map(|id| Transaction {
                title: format!("Widget #{id}"),
                ..test_transaction(id, 1.0, datetime!(2021-03-01 09:00 UTC))
            })
            .collect();
        transactions.push(test_transaction(100, 1.0, datetime!(2021-03-01 09:00 UTC)));
        replace_transactions(&transactions, &conn).unwrap();

        let page = list_transactions(query("widget", 3, 10), &conn).unwrap();

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data.len(), 5);
    }

    #[test]
    fn filters_by_month() {
        let conn = get_test_connection();
        let march = test_transaction(1, 1.0, datetime!(2021-03-01 09:00 UTC));
        let april = test_transaction(2, 1.0, datetime!(2022-04-01 09:00 UTC));
        replace_transactions(&[march, april.clone()], &conn).unwrap();

        let page = list_transactions(
            ListQuery {
                search: "",
                month: Some(Month::April),
                page: 1,
                per_page: 10,
            },
            &conn,
        )
        .unwrap();

        assert_eq!(page.data, vec![april]);
    }

    #[test]
    fn search_folds_non_ascii_letters() {
        let conn = get_test_connection();
        let screen = Transaction {
            title: "ÉCRAN Déluxe".to_owned(),
            ..test_transaction(1, 5.0, datetime!(2021-03-01 09:00 UTC))
        };
        let other = test_transaction(2, 6.0, datetime!(2021-03-01 09:00 UTC));
        replace_transactions(&[screen.clone(), other], &conn).unwrap();

        let page = list_transactions(query("écran", 1, 10), &conn).unwrap();

        assert_eq!(page.data, vec![screen]);
        assert_eq!(page.total_pages, 1);
    }
}
