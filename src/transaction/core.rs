//! Defines the core data model and database queries for sale transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::Error;

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// A product sale record.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The name of the product.
    pub title: String,
    /// A longer text description of the product.
    pub description: Option<String>,
    /// The price the product was listed at. Never negative.
    pub price: f64,
    /// The product category, e.g. "electronics" or "jewelery".
    pub category: String,
    /// Whether the product was actually sold.
    pub sold: bool,
    /// A URL to an image of the product.
    pub image: Option<String>,
    /// When the sale happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// The ID of the record in the seed document this transaction was imported from.
    pub import_id: Option<i64>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        title: &str,
        price: f64,
        category: &str,
        date_of_sale: OffsetDateTime,
    ) -> TransactionBuilder {
        TransactionBuilder {
            title: title.to_owned(),
            description: None,
            price,
            category: category.to_owned(),
            sold: false,
            image: None,
            date_of_sale,
            import_id: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Optional fields default to `None` and `sold` defaults to `false`.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The name of the product.
    pub title: String,

    /// A longer text description of the product.
    pub description: Option<String>,

    /// The listed price. Must not be negative, see [check_price].
    pub price: f64,

    /// The product category.
    pub category: String,

    /// Whether the product was sold.
    pub sold: bool,

    /// A URL to an image of the product.
    pub image: Option<String>,

    /// When the sale happened.
    ///
    /// Stored in UTC so that timestamps compare correctly as text in SQLite.
    pub date_of_sale: OffsetDateTime,

    /// Optional unique identifier from the seed document.
    ///
    /// The database enforces uniqueness on this field, which is what makes
    /// importing the same seed document twice a no-op.
    pub import_id: Option<i64>,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Set whether the product was sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }

    /// Set the image URL for the transaction.
    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    /// Set the import ID for the transaction.
    pub fn import_id(mut self, import_id: Option<i64>) -> Self {
        self.import_id = import_id;
        self
    }
}

/// Check that `price` is a valid sale price.
///
/// # Errors
/// Returns [Error::NegativePrice] if `price` is below zero or not a number.
pub fn check_price(price: f64) -> Result<(), Error> {
    // `NaN >= 0.0` is false, so NaN is rejected too.
    if price >= 0.0 {
        Ok(())
    } else {
        Err(Error::NegativePrice(price))
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns of the transaction table in the order [map_transaction_row] expects.
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, category, sold, image, date_of_sale, import_id";

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativePrice] if the price is negative,
/// - or [Error::DuplicateImportId] if a transaction with the specified import ID already exists,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    check_price(builder.price)?;

    let transaction = connection
        .prepare_cached(&format!(
            "INSERT INTO \"transaction\" (title, description, price, category, sold, image, date_of_sale, import_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            (
                builder.title,
                builder.description,
                builder.price,
                builder.category,
                builder.sold,
                builder.image,
                builder.date_of_sale.to_offset(UtcOffset::UTC),
                builder.import_id,
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateImportId,
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                price REAL NOT NULL CHECK (price >= 0),
                category TEXT NOT NULL,
                sold INTEGER NOT NULL,
                image TEXT,
                date_of_sale TEXT NOT NULL,
                import_id INTEGER UNIQUE
                )",
        (),
    )?;

    // Every statistic is scoped to a month of sales.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_of_sale ON \"transaction\"(date_of_sale);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        sold: row.get(5)?,
        image: row.get(6)?,
        date_of_sale: row.get(7)?,
        import_id: row.get(8)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
