//! Product transactions and the store that holds them.
//!
//! This module contains:
//! - The `Transaction` model, shared by the upstream dataset, the store and the API
//! - Database functions for replacing and counting the stored transactions
//! - The paginated search used by the transactions listing

mod core;
mod query;

pub use core::{Transaction, create_transaction_table, replace_transactions};
#[cfg(test)]
pub use core::count_transactions;
pub use query::{ListQuery, TransactionPage, list_transactions};
