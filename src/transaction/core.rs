//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::{Month, OffsetDateTime, UtcOffset};

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// A product listing and whether it has been sold.
///
/// The JSON representation matches the seed source, e.g.
/// `{"id": 1, "title": "Mouse", "price": 50, "dateOfSale": "2022-03-05T00:00:00Z", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The product name.
    pub title: String,
    /// Free text about the product, searched along with the title.
    pub description: String,
    /// The listed price. Expected to be non-negative, but this is not enforced.
    pub price: f64,
    /// A free-form category label, e.g. "electronics".
    pub category: String,
    /// Whether the item has been sold.
    pub sold: bool,
    /// A URL to an image of the product.
    #[serde(default)]
    pub image: Option<String>,
    /// When the item was sold. Only the month is used for filtering.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(id: TransactionId, price: f64, date_of_sale: OffsetDateTime) -> TransactionBuilder {
        TransactionBuilder {
            id,
            title: String::new(),
            description: String::new(),
            price,
            category: String::new(),
            sold: false,
            image: None,
            date_of_sale,
        }
    }

    /// The calendar month the item was sold in, in UTC.
    pub fn sale_month(&self) -> Month {
        self.date_of_sale.to_offset(UtcOffset::UTC).month()
    }
}

/// A builder for creating [Transaction] instances with sensible defaults.
///
/// # Examples
///
/// ```ignore
/// use time::macros::datetime;
///
/// let mouse = Transaction::build(1, 50.0, datetime!(2022-03-05 0:00 UTC))
///     .title("Mouse")
///     .category("Electronics")
///     .sold(true)
///     .finalise();
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    id: TransactionId,
    title: String,
    description: String,
    price: f64,
    category: String,
    sold: bool,
    image: Option<String>,
    date_of_sale: OffsetDateTime,
}

impl TransactionBuilder {
    /// Set the product name.
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    /// Set the product description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category label.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set whether the item has been sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }

    /// Set the image URL.
    pub fn image(mut self, image: Option<&str>) -> Self {
        self.image = image.map(ToOwned::to_owned);
        self
    }

    /// Build the transaction.
    pub fn finalise(self) -> Transaction {
        Transaction {
            id: self.id,
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            sold: self.sold,
            image: self.image,
            date_of_sale: self.date_of_sale,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                category TEXT NOT NULL,
                sold INTEGER NOT NULL,
                image TEXT,
                date_of_sale TEXT NOT NULL,
                sale_month INTEGER NOT NULL CHECK (sale_month BETWEEN 1 AND 12)
                )",
        (),
    )?;

    // Every read query filters on the month of sale.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_sale_month ON \"transaction\"(sale_month, id);",
        (),
    )?;

    Ok(())
}

/// Insert `transaction` into the database.
///
/// The date of sale is stored in UTC so that the stored month of sale agrees
/// with [Transaction::sale_month].
///
/// # Errors
/// Returns an [Error::StoreUnavailable] if the ID already exists or there is
/// some other SQL error.
pub fn insert_transaction(transaction: &Transaction, connection: &Connection) -> Result<(), Error> {
    connection
        .prepare_cached(
            "INSERT INTO \"transaction\"
                (id, title, description, price, category, sold, image, date_of_sale, sale_month)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?
        .execute(params![
            transaction.id,
            transaction.title,
            transaction.description,
            transaction.price,
            transaction.category,
            transaction.sold,
            transaction.image,
            transaction.date_of_sale.to_offset(UtcOffset::UTC),
            u8::from(transaction.sale_month()),
        ])?;

    Ok(())
}

/// Get every transaction sold in `month` of any year, ordered by ID.
///
/// This is the single month filter shared by every view of the data, so that
/// the table, statistics and charts always agree on which transactions belong
/// to a month.
///
/// # Errors
/// This function will return a [Error::StoreUnavailable] if there is an SQL error.
pub fn get_transactions_in_month(
    month: Month,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare_cached(
            "SELECT id, title, description, price, category, sold, image, date_of_sale
             FROM \"transaction\"
             WHERE sale_month = :month
             ORDER BY id ASC",
        )?
        .query_map(&[(":month", &u8::from(month))], map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::StoreUnavailable] if there is an SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    let count: i64 = connection.query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
        row.get(0)
    })?;

    u64::try_from(count)
        .map_err(|error| Error::StoreUnavailable(format!("invalid transaction count {count}: {error}")))
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let description = row.get(2)?;
    let price = row.get(3)?;
    let category = row.get(4)?;
    let sold = row.get(5)?;
    let image = row.get(6)?;
    let date_of_sale = row.get(7)?;

    Ok(Transaction {
        id,
        title,
        description,
        price,
        category,
        sold,
        image,
        date_of_sale,
    })
}

// ============================================================================
// TESTS
// ============================================================================
