//! Reductions over a month of transactions.
//!
//! Provides functions to total sales, bucket prices into a fixed histogram and
//! count transactions per category.

use std::{collections::HashMap, ops::RangeInclusive};

use serde::Serialize;

use crate::transaction::Transaction;

/// Sales totals for a set of transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatistics {
    /// The sum of the prices of all transactions, sold or not.
    pub total_sale: f64,
    /// The number of transactions that were sold.
    pub sold_count: u64,
    /// The number of transactions that were not sold.
    pub not_sold_count: u64,
}

/// Totals the prices and counts sold and unsold transactions.
pub fn summarize(transactions: &[Transaction]) -> SummaryStatistics {
    let total_sale: f64 = transactions.iter().map(|transaction| transaction.price).sum();
    let sold_count = transactions
        .iter()
        .filter(|transaction| transaction.sold)
        .count() as u64;

    SummaryStatistics {
        total_sale,
        sold_count,
        not_sold_count: transactions.len() as u64 - sold_count,
    }
}

/// The closed price ranges of the histogram, tested in ascending order.
const BOUNDED_PRICE_RANGES: [(&str, RangeInclusive<f64>); 9] = [
    ("0-100", 0.0..=100.0),
    ("101-200", 101.0..=200.0),
    ("201-300", 201.0..=300.0),
    ("301-400", 301.0..=400.0),
    ("401-500", 401.0..=500.0),
    ("501-600", 501.0..=600.0),
    ("601-700", 601.0..=700.0),
    ("701-800", 701.0..=800.0),
    ("801-900", 801.0..=900.0),
];

/// The bucket for every price outside the bounded ranges.
const OPEN_PRICE_RANGE: &str = "901+";

/// Counts transactions per price range.
///
/// # Returns
/// One `(label, count)` pair for each of the ten ranges, in ascending order,
/// including ranges with no transactions.
///
/// A price that falls in none of the closed ranges is counted under `901+`.
/// This includes fractional prices between two ranges, e.g. `100.5`.
pub fn price_histogram(transactions: &[Transaction]) -> Vec<(&'static str, u64)> {
    let mut counts = [0u64; BOUNDED_PRICE_RANGES.len() + 1];

    for transaction in transactions {
        let bucket = BOUNDED_PRICE_RANGES
            .iter()
            .position(|(_, range)| range.contains(&transaction.price))
            .unwrap_or(BOUNDED_PRICE_RANGES.len());

        counts[bucket] += 1;
    }

    BOUNDED_PRICE_RANGES
        .iter()
        .map(|(label, _)| *label)
        .chain([OPEN_PRICE_RANGE])
        .zip(counts)
        .collect()
}

/// Counts transactions per category.
///
/// # Returns
/// One `(category, count)` pair per distinct category, ordered by where the
/// category first appears in `transactions`.
pub fn group_by_category(transactions: &[Transaction]) -> Vec<(String, u64)> {
    let mut groups: Vec<(String, u64)> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions {
        match group_index.get(transaction.category.as_str()) {
            Some(&index) => groups[index].1 += 1,
            None => {
                group_index.insert(&transaction.category, groups.len());
                groups.push((transaction.category.clone(), 1));
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::transaction::Transaction;

    use super::{SummaryStatistics, group_by_category, price_histogram, summarize};

    fn create_test_transaction(price: f64, sold: bool, category: &str) -> Transaction {
        Transaction {
            id: 0,
            title: "Item".to_owned(),
            description: None,
            price,
            category: category.to_owned(),
            sold,
            image: None,
            date_of_sale: datetime!(2024-03-10 12:00 UTC),
            import_id: None,
        }
    }

    fn histogram_count(histogram: &[(&str, u64)], label: &str) -> u64 {
        histogram
            .iter()
            .find(|(bucket, _)| *bucket == label)
            .map(|(_, count)| *count)
            .unwrap_or_else(|| panic!("no bucket labelled {label}"))
    }

    #[test]
    fn summarize_march_scenario() {
        let transactions = vec![
            create_test_transaction(50.0, true, "electronics"),
            create_test_transaction(150.0, false, "jewelery"),
            create_test_transaction(950.0, true, "electronics"),
        ];

        let got = summarize(&transactions);

        assert_eq!(
            got,
            SummaryStatistics {
                total_sale: 1150.0,
                sold_count: 2,
                not_sold_count: 1,
            }
        );
    }

    #[test]
    fn summarize_handles_empty_input() {
        let got = summarize(&[]);

        assert_eq!(
            got,
            SummaryStatistics {
                total_sale: 0.0,
                sold_count: 0,
                not_sold_count: 0,
            }
        );
    }

    #[test]
    fn histogram_march_scenario() {
        let transactions = vec![
            create_test_transaction(50.0, true, "electronics"),
            create_test_transaction(150.0, false, "jewelery"),
            create_test_transaction(950.0, true, "electronics"),
        ];

        let got = price_histogram(&transactions);

        assert_eq!(
            got,
            vec![
                ("0-100", 1),
                ("101-200", 1),
                ("201-300", 0),
                ("301-400", 0),
                ("401-500", 0),
                ("501-600", 0),
                ("601-700", 0),
                ("701-800", 0),
                ("801-900", 0),
                ("901+", 1),
            ]
        );
    }

    #[test]
    fn histogram_bucket_edges_are_inclusive() {
        let prices = [0.0, 100.0, 101.0, 200.0, 900.0, 901.0, 5000.0];
        let transactions: Vec<_> = prices
            .iter()
            .map(|&price| create_test_transaction(price, true, "electronics"))
            .collect();

        let got = price_histogram(&transactions);

        assert_eq!(histogram_count(&got, "0-100"), 2);
        assert_eq!(histogram_count(&got, "101-200"), 2);
        assert_eq!(histogram_count(&got, "801-900"), 1);
        assert_eq!(histogram_count(&got, "901+"), 2);
    }

    #[test]
    fn histogram_counts_prices_between_ranges_as_open_range() {
        let transactions = vec![
            create_test_transaction(100.5, true, "electronics"),
            create_test_transaction(-1.0, true, "electronics"),
        ];

        let got = price_histogram(&transactions);

        assert_eq!(histogram_count(&got, "0-100"), 0);
        assert_eq!(histogram_count(&got, "101-200"), 0);
        assert_eq!(histogram_count(&got, "901+"), 2);
    }

    #[test]
    fn histogram_counts_sum_to_transaction_count() {
        let transactions: Vec<_> = (0..57)
            .map(|i| create_test_transaction(i as f64 * 23.7, i % 3 == 0, "electronics"))
            .collect();

        let got = price_histogram(&transactions);

        assert_eq!(got.len(), 10);
        assert_eq!(
            got.iter().map(|(_, count)| count).sum::<u64>(),
            transactions.len() as u64
        );
    }

    #[test]
    fn groups_categories_in_first_seen_order() {
        let transactions = vec![
            create_test_transaction(10.0, true, "jewelery"),
            create_test_transaction(20.0, false, "electronics"),
            create_test_transaction(30.0, true, "jewelery"),
            create_test_transaction(40.0, true, "women's clothing"),
            create_test_transaction(50.0, true, "electronics"),
        ];

        let got = group_by_category(&transactions);

        assert_eq!(
            got,
            vec![
                ("jewelery".to_owned(), 2),
                ("electronics".to_owned(), 2),
                ("women's clothing".to_owned(), 1),
            ]
        );
    }

    #[test]
    fn grouping_omits_absent_categories() {
        let transactions = vec![create_test_transaction(10.0, true, "jewelery")];

        let got = group_by_category(&transactions);

        assert_eq!(got, vec![("jewelery".to_owned(), 1)]);
        assert!(group_by_category(&[]).is_empty());
    }
}
