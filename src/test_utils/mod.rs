#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod http;

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{db::initialize, transaction::Transaction};

pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment, selected_text};
pub(crate) use http::{assert_content_type, get_header, serve_json_fixture, serve_router};

/// An in-memory database with the transaction table.
pub(crate) fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("Could not open database in memory");
    initialize(&connection).expect("Could not initialize database");
    connection
}

/// A transaction with placeholder text fields.
///
/// The title and description avoid the words that search tests look for.
pub(crate) fn test_transaction(id: i64, price: f64, date_of_sale: OffsetDateTime) -> Transaction {
    Transaction {
        id,
        title: format!("Product {id}"),
        price,
        description: "A test product".to_owned(),
        category: "electronics".to_owned(),
        image: format!("https://example.com/images/{id}.jpg"),
        sold: false,
        date_of_sale,
    }
}
