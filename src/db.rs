//! Database set up and access to the shared connection.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{
    Connection, Row, Transaction as SqlTransaction, TransactionBehavior, functions::FunctionFlags,
};

use crate::{Error, transaction::create_transaction_table};

/// The SQL function that lowercases text with Unicode rules.
///
/// SQLite's own `lower` and `LIKE` only fold ASCII letters.
pub(crate) const FOLD_CASE_FUNCTION: &str = "fold_case";

/// Create the tables for the domain models and register the SQL functions
/// the queries use.
///
/// Safe to call on a database that has already been initialized. Functions
/// belong to the connection, so every connection must be initialized.
///
/// # Errors
/// Returns an error if a table or function cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.create_scalar_function(
        FOLD_CASE_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| Ok(context.get::<String>(0)?.to_lowercase()),
    )?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Acquire the lock on the shared database connection.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock is poisoned.
pub(crate) fn lock_connection(
    connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}

/// Read a `COUNT(*)` or `SUM` of flags from column `index` of `row`.
///
/// SQLite only has signed integers, so the value is read as `i64`.
pub(crate) fn get_count(row: &Row, index: usize) -> Result<u64, rusqlite::Error> {
    let count: i64 = row.get(index)?;

    u64::try_from(count).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(index, count))
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::{get_count, initialize};

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("first initialization failed");
        initialize(&conn).expect("second initialization failed");
    }

    #[test]
    fn creates_transaction_table() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let table_count: u32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'product_transaction'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(table_count, 1);
    }

    #[test]
    fn reads_counts_as_unsigned() {
        let conn = Connection::open_in_memory().unwrap();

        let count = conn
            .query_row("SELECT 42", [], |row| get_count(row, 0))
            .unwrap();

        assert_eq!(count, 42);
    }

    #[test]
    fn negative_count_is_out_of_range() {
        let conn = Connection::open_in_memory().unwrap();

        let result = conn.query_row("SELECT -1", [], |row| get_count(row, 0));

        assert!(
            matches!(result, Err(rusqlite::Error::IntegralValueOutOfRange(0, -1))),
            "got {result:?}"
        );
    }

    #[test]
    fn fold_case_lowercases_non_ascii_text() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let folded: String = conn
            .query_row("SELECT fold_case('ÉCRAN Déluxe')", [], |row| row.get(0))
            .unwrap();

        assert_eq!(folded, "écran déluxe");
    }
}
