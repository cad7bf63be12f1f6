//! Database queries for listing and searching transactions within a date range.

use std::ops::Range;

use rusqlite::{Connection, ToSql, params_from_iter};
use time::{OffsetDateTime, UtcOffset};

use crate::{Error, pagination::Page};

use super::core::{TRANSACTION_COLUMNS, Transaction, map_transaction_row};

/// A free-text search over transactions.
///
/// Matches a transaction when its title or description contains the term,
/// ignoring ASCII case, or when the term is a number equal to its price.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm {
    text: String,
    price: Option<f64>,
}

impl SearchTerm {
    /// Create a search from `term`, or `None` if `term` is empty.
    ///
    /// Only a term that parses as a finite number is matched against prices.
    pub fn new(term: &str) -> Option<Self> {
        if term.is_empty() {
            return None;
        }

        let price = term
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite());

        Some(Self {
            text: term.to_owned(),
            price,
        })
    }

    /// The LIKE pattern matching the term anywhere in a string.
    fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.text.len() + 2);
        pattern.push('%');

        for character in self.text.chars() {
            if matches!(character, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(character);
        }

        pattern.push('%');
        pattern
    }
}

/// Filters for querying transactions.
#[derive(Debug, Clone)]
pub struct TransactionQuery {
    /// Only include transactions sold within this half-open range.
    pub date_range: Range<OffsetDateTime>,
    /// Only include transactions matching this search.
    pub search: Option<SearchTerm>,
}

impl TransactionQuery {
    /// Query every transaction in `date_range`.
    pub fn in_range(date_range: Range<OffsetDateTime>) -> Self {
        Self {
            date_range,
            search: None,
        }
    }

    /// Build the WHERE clause and its parameters.
    fn where_clause(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut clause_parts = vec!["date_of_sale >= ?1 AND date_of_sale < ?2".to_owned()];
        let mut parameters: Vec<Box<dyn ToSql>> = vec![
            Box::new(self.date_range.start.to_offset(UtcOffset::UTC)),
            Box::new(self.date_range.end.to_offset(UtcOffset::UTC)),
        ];

        if let Some(search) = &self.search {
            parameters.push(Box::new(search.like_pattern()));
            let pattern_index = parameters.len();

            let mut search_parts = vec![
                format!("title LIKE ?{pattern_index} ESCAPE '\\'"),
                format!("description LIKE ?{pattern_index} ESCAPE '\\'"),
            ];

            if let Some(price) = search.price {
                parameters.push(Box::new(price));
                search_parts.push(format!("price = ?{}", parameters.len()));
            }

            clause_parts.push(format!("({})", search_parts.join(" OR ")));
        }

        (
            format!("WHERE {}", clause_parts.join(" AND ")),
            parameters,
        )
    }
}

/// Query for transactions in the database, in the order they were stored.
///
/// If `page` is given, only the transactions on that page are returned.
///
/// # Errors
/// This function will return a [Error::SqlError] there is a SQL error.
pub fn query_transactions(
    query: &TransactionQuery,
    page: Option<Page>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let (where_clause, parameters) = query.where_clause();

    let mut query_string =
        format!("SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" {where_clause} ORDER BY id ASC");

    if let Some(page) = page {
        query_string.push_str(&format!(" LIMIT {} OFFSET {}", page.size, page.offset()));
    }

    connection
        .prepare(&query_string)?
        .query_map(params_from_iter(parameters.iter()), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}

/// Count the transactions matching `query`.
///
/// Uses exactly the same filters as [query_transactions], so the count agrees
/// with the listing.
///
/// # Errors
/// This function will return a [Error::SqlError] there is a SQL error.
pub fn count_matching_transactions(
    query: &TransactionQuery,
    connection: &Connection,
) -> Result<u64, Error> {
    let (where_clause, parameters) = query.where_clause();

    let count: i64 = connection.query_row(
        &format!("SELECT COUNT(id) FROM \"transaction\" {where_clause}"),
        params_from_iter(parameters.iter()),
        |row| row.get(0),
    )?;

    count_to_u64(count)
}

fn count_to_u64(count: i64) -> Result<u64, Error> {
    u64::try_from(count)
        .map_err(|_| Error::SqlError(rusqlite::Error::IntegralValueOutOfRange(0, count)))
}

/// Get every transaction sold within `date_range`.
///
/// # Errors
/// This function will return a [Error::SqlError] there is a SQL error.
pub fn get_transactions_in_range(
    date_range: Range<OffsetDateTime>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    query_transactions(&TransactionQuery::in_range(date_range), None, connection)
}
