//! Defines the core data model and database functions for product transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, month::sale_month};

#[cfg(test)]
use crate::db::get_count;

// ============================================================================
// MODELS
// ============================================================================

/// A catalog item and whether it sold.
///
/// The field names match the upstream dataset, so the same type is used to
/// decode the dataset, store it and send it to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The identifier from the upstream dataset. Not guaranteed to be unique.
    pub id: i64,
    /// The product name.
    pub title: String,
    /// The sale price, never negative.
    pub price: f64,
    /// A longer description of the product.
    pub description: String,
    /// A short label such as "electronics" or "jewelery".
    pub category: String,
    /// A URL to a picture of the product.
    pub image: String,
    /// Whether the product sold.
    pub sold: bool,
    /// When the product was sold. Only the month is used for filtering.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Replace every stored transaction with `transactions`.
///
/// The delete and the inserts run in one database transaction, so if any
/// insert fails the previously stored transactions are kept.
///
/// Returns the number of transactions inserted.
///
/// # Errors
/// Returns [Error::SqlError] if a transaction cannot be inserted, e.g. because
/// it has a negative price.
pub fn replace_transactions(
    transactions: &[Transaction],
    connection: &Connection,
) -> Result<usize, Error> {
    // Using unchecked_transaction because we only have &Connection from the MutexGuard.
    let tx = connection.unchecked_transaction()?;

    tx.execute("DELETE FROM product_transaction", ())?;

    {
        let mut statement = tx.prepare(
            "INSERT INTO product_transaction
                (id, title, price, description, category, image, sold, date_of_sale, sale_month)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;

        for transaction in transactions {
            statement.execute((
                transaction.id,
                &transaction.title,
                transaction.price,
                &transaction.description,
                &transaction.category,
                &transaction.image,
                transaction.sold,
                transaction.date_of_sale,
                u8::from(sale_month(transaction.date_of_sale)),
            ))?;
        }
    }

    tx.commit()?;

    Ok(transactions.len())
}

/// Get the total number of stored transactions.
#[cfg(test)]
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(*) FROM product_transaction;", [], |row| {
            get_count(row, 0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// `row_id` is the storage key; `id` comes from the upstream dataset and is
/// not unique. `sale_month` is derived from `date_of_sale` on insert.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS product_transaction (
                row_id INTEGER PRIMARY KEY AUTOINCREMENT,
                id INTEGER NOT NULL,
                title TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0),
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                image TEXT NOT NULL,
                sold INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL,
                sale_month INTEGER NOT NULL CHECK (sale_month BETWEEN 1 AND 12)
                )",
        (),
    )?;

    // Every aggregate filters on the month.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_product_transaction_sale_month
            ON product_transaction(sale_month);",
        (),
    )?;

    Ok(())
}

/// The columns read by [map_transaction_row], in order.
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, title, price, description, category, image, sold, date_of_sale";

/// Map a database row selected with [TRANSACTION_COLUMNS] to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        price: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        image: row.get(5)?,
        sold: row.get(6)?,
        date_of_sale: row.get(7)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use time::macros::datetime;

    use crate::{
        Error,
        test_utils::{get_test_connection, test_transaction},
        transaction::{count_transactions, replace_transactions},
    };

    use super::{TRANSACTION_COLUMNS, map_transaction_row};

    #[test]
    fn replace_inserts_all_transactions() {
        let conn = get_test_connection();
        let transactions: Vec<_> = (1..=5)
            .map(|id| test_transaction(id, 10.0 * id as f64, datetime!(2021-03-10 10:00 UTC)))
            .collect();

        let inserted = replace_transactions(&transactions, &conn).unwrap();

        assert_eq!(inserted, 5);
        assert_eq!(count_transactions(&conn).unwrap(), 5);
    }

    #[test]
    fn replace_discards_previous_transactions() {
        let conn = get_test_connection();
        let march = test_transaction(1, 10.0, datetime!(2021-03-10 10:00 UTC));
        let april = test_transaction(2, 20.0, datetime!(2021-04-10 10:00 UTC));
        replace_transactions(&[march.clone(), march], &conn).unwrap();

        replace_transactions(std::slice::from_ref(&april), &conn).unwrap();

        let stored: Vec<_> = conn
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM product_transaction"
            ))
            .unwrap()
            .query_map([], map_transaction_row)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(stored, vec![april]);
    }

    #[test]
    fn replace_with_nothing_empties_store() {
        let conn = get_test_connection();
        replace_transactions(
            &[test_transaction(1, 10.0, datetime!(2021-03-10 10:00 UTC))],
            &conn,
        )
        .unwrap();

        replace_transactions(&[], &conn).unwrap();

        assert_eq!(count_transactions(&conn).unwrap(), 0);
    }

    #[test]
    fn duplicate_upstream_ids_are_kept() {
        let conn = get_test_connection();
        let transaction = test_transaction(7, 10.0, datetime!(2021-03-10 10:00 UTC));

        replace_transactions(&[transaction.clone(), transaction], &conn).unwrap();

        assert_eq!(count_transactions(&conn).unwrap(), 2);
    }

    #[test]
    fn failed_replace_keeps_previous_transactions() {
        let conn = get_test_connection();
        let existing = test_transaction(1, 10.0, datetime!(2021-03-10 10:00 UTC));
        replace_transactions(std::slice::from_ref(&existing), &conn).unwrap();
        let invalid = test_transaction(2, -1.0, datetime!(2021-04-10 10:00 UTC));

        let result = replace_transactions(&[invalid], &conn);

        assert!(matches!(result, Err(Error::SqlError(_))), "got {result:?}");
        assert_eq!(count_transactions(&conn).unwrap(), 1);
    }

    #[test]
    fn round_trips_date_of_sale_with_offset() {
        let conn = get_test_connection();
        let transaction = test_transaction(1, 10.0, datetime!(2021-11-27 20:29:54 +05:30));
        replace_transactions(std::slice::from_ref(&transaction), &conn).unwrap();

        let stored = conn
            .query_row(
                &format!("SELECT {TRANSACTION_COLUMNS} FROM product_transaction"),
                [],
                map_transaction_row,
            )
            .unwrap();

        assert_eq!(stored.date_of_sale, transaction.date_of_sale);
    }
}
