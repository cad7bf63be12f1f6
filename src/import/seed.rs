//! Parsing, fetching and storing the seed document of sale records.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    transaction::{Transaction, TransactionBuilder, create_transaction},
};

/// A sale record as it appears in the seed document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    /// The record's identifier in the seed document. Stored as the import ID.
    #[serde(default)]
    pub id: Option<i64>,
    /// The product name.
    pub title: String,
    /// The product description.
    #[serde(default)]
    pub description: Option<String>,
    /// The sale price.
    pub price: f64,
    /// The product category.
    pub category: String,
    /// Whether the product was sold.
    pub sold: bool,
    /// A URL to an image of the product.
    #[serde(default)]
    pub image: Option<String>,
    /// When the sale happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

impl From<SeedRecord> for TransactionBuilder {
    fn from(record: SeedRecord) -> Self {
        Transaction::build(
            &record.title,
            record.price,
            &record.category,
            record.date_of_sale,
        )
        .description(record.description)
        .sold(record.sold)
        .image(record.image)
        .import_id(record.id)
    }
}

/// The outcome of importing a seed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    /// The number of records inserted.
    pub imported: u64,
    /// The number of records whose ID was already in the database.
    pub duplicates: u64,
    /// The number of records rejected because of an invalid price.
    pub skipped: u64,
}

/// Parse a seed document: a JSON array of sale records.
///
/// # Errors
/// Returns [Error::SeedParseError] if `text` is not a JSON array of sale records.
pub fn parse_seed_document(text: &str) -> Result<Vec<SeedRecord>, Error> {
    serde_json::from_str(text).map_err(|error| Error::SeedParseError(error.to_string()))
}

/// Download and parse the seed document at `url`.
///
/// # Errors
/// Returns [Error::SeedFetchError] if the request fails or the server responds
/// with an error status, or [Error::SeedParseError] if the body is not a seed document.
pub async fn fetch_seed_records(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<SeedRecord>, Error> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|error| Error::SeedFetchError(error.to_string()))?;

    let body = response
        .text()
        .await
        .map_err(|error| Error::SeedFetchError(error.to_string()))?;

    parse_seed_document(&body)
}

/// Store `records` in a single database transaction.
///
/// Records whose ID was already imported are left untouched, so importing the
/// same document twice does not duplicate any sales. Records with a negative
/// price are skipped.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an unexpected SQL error, in which
/// case nothing is stored.
pub fn import_seed_records(
    records: Vec<SeedRecord>,
    connection: &Connection,
) -> Result<ImportSummary, Error> {
    let tx = connection.unchecked_transaction()?;
    let mut summary = ImportSummary::default();

    for record in records {
        let import_id = record.id;

        match create_transaction(record.into(), &tx) {
            Ok(_) => summary.imported += 1,
            Err(Error::DuplicateImportId) => summary.duplicates += 1,
            Err(error @ Error::NegativePrice(_)) => {
                tracing::warn!("Skipping seed record {import_id:?}: {error}");
                summary.skipped += 1;
            }
            Err(error) => return Err(error),
        }
    }

    tx.commit()?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        Error,
        test_utils::get_test_connection,
        transaction::{TransactionQuery, count_transactions, query_transactions},
    };

    use super::{ImportSummary, SeedRecord, import_seed_records, parse_seed_document};

    const SEED_DOCUMENT: &str = r#"[
        {
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 329.85,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://example.com/backpack.jpg",
            "sold": false,
            "dateOfSale": "2021-11-27T20:29:54+05:30"
        },
        {
            "id": 2,
            "title": "Silver Dragon Bracelet",
            "price": 695,
            "description": "From our Legends Collection",
            "category": "jewelery",
            "image": "https://example.com/bracelet.jpg",
            "sold": true,
            "dateOfSale": "2022-03-27T20:29:54+05:30"
        },
        {
            "title": "Unlabelled Hard Drive",
            "price": 64.0,
            "category": "electronics",
            "sold": true,
            "dateOfSale": "2022-03-02T09:00:00Z"
        }
    ]"#;

    fn record(id: Option<i64>, price: f64) -> SeedRecord {
        SeedRecord {
            id,
            title: "Item".to_owned(),
            description: None,
            price,
            category: "electronics".to_owned(),
            sold: true,
            image: None,
            date_of_sale: datetime!(2022-03-02 9:00 UTC),
        }
    }

    #[test]
    fn parses_seed_document() {
        let records = parse_seed_document(SEED_DOCUMENT).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, Some(1));
        assert_eq!(records[0].date_of_sale, datetime!(2021-11-27 20:29:54 +05:30));
        assert_eq!(records[1].price, 695.0);
        assert_eq!(records[2].id, None);
        assert_eq!(records[2].description, None);
        assert_eq!(records[2].image, None);
    }

    #[test]
    fn rejects_malformed_documents() {
        for document in ["", "{}", "[{\"title\": \"no price\"}]", "not json"] {
            let result = parse_seed_document(document);

            assert!(
                matches!(result, Err(Error::SeedParseError(_))),
                "want parse error for {document:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn imports_all_records() {
        let conn = get_test_connection();
        let records = parse_seed_document(SEED_DOCUMENT).unwrap();

        let summary = import_seed_records(records, &conn).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                imported: 3,
                duplicates: 0,
                skipped: 0
            }
        );
        let stored = query_transactions(
            &TransactionQuery::in_range(
                datetime!(2022-03-01 0:00 UTC)..datetime!(2022-04-01 0:00 UTC),
            ),
            None,
            &conn,
        )
        .unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].title, "Silver Dragon Bracelet");
        assert_eq!(stored[0].import_id, Some(2));
        assert!(stored[0].sold);
    }

    #[test]
    fn importing_twice_does_not_duplicate_records() {
        let conn = get_test_connection();

        import_seed_records(parse_seed_document(SEED_DOCUMENT).unwrap(), &conn).unwrap();
        let second =
            import_seed_records(parse_seed_document(SEED_DOCUMENT).unwrap(), &conn).unwrap();

        // The record without an ID cannot be matched, so it is stored again.
        assert_eq!(
            second,
            ImportSummary {
                imported: 1,
                duplicates: 2,
                skipped: 0
            }
        );
        assert_eq!(count_transactions(&conn).unwrap(), 4);
    }

    #[test]
    fn skips_negative_prices() {
        let conn = get_test_connection();

        let summary =
            import_seed_records(vec![record(Some(1), 10.0), record(Some(2), -5.0)], &conn).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                imported: 1,
                duplicates: 0,
                skipped: 1
            }
        );
        assert_eq!(count_transactions(&conn).unwrap(), 1);
    }

    #[test]
    fn summary_serializes_counts() {
        let summary = ImportSummary {
            imported: 58,
            duplicates: 2,
            skipped: 0,
        };

        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            serde_json::json!({ "imported": 58, "duplicates": 2, "skipped": 0 })
        );
    }
}
