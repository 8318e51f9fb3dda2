//! Replace the transactions in a database file with one month of the dataset.

use std::{error::Error, sync::Mutex};

use clap::Parser;
use rusqlite::Connection;

use transaction_dashboard::{
    DEFAULT_DATA_URL, DataSource, initialize_db, initialize_month, parse_month,
};

/// Load one month of transactions into the dashboard's database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The English name of the month to load, e.g. "March".
    #[arg(long)]
    month: String,

    /// The URL of the JSON transaction dataset.
    #[arg(long, env = "DATA_URL", default_value = DEFAULT_DATA_URL)]
    data_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().pretty().init();

    let args = Args::parse();
    let month = parse_month(&args.month)?;

    let conn = Connection::open(&args.db_path)?;
    initialize_db(&conn)?;
    let conn = Mutex::new(conn);

    let data_source = DataSource::new(args.data_url)?;
    let count = initialize_month(month, &data_source, &conn).await?;

    println!(
        "Loaded {count} transactions for {month} from {} into {}",
        data_source.url(),
        args.db_path
    );

    Ok(())
}
