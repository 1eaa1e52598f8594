//! Summaries of a month of transactions: sales totals, a price histogram and
//! a category histogram.
//!
//! Every function here takes the month-filtered transactions from
//! [super::core::get_transactions_in_month] and makes a single pass over them.

use std::collections::BTreeMap;

use serde::Serialize;

use super::core::Transaction;

/// Sales totals for a month.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the prices of sold items.
    pub total_amount: f64,
    /// The number of items that were sold.
    pub sold_items: u64,
    /// The number of items that were not sold.
    pub not_sold_items: u64,
}

/// The number of transactions whose price falls in a price range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRangeCount {
    /// The bucket label, e.g. "101-200".
    pub range: &'static str,
    /// The number of transactions in the range.
    pub count: u64,
}

/// The number of transactions in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// The category label as it appears in the transactions.
    pub category: String,
    /// The number of transactions with this category.
    pub count: u64,
}

/// The labels of the price histogram buckets, in display order.
pub const PRICE_RANGE_LABELS: [&str; PRICE_BUCKET_COUNT] = [
    "0-100", "101-200", "201-300", "301-400", "401-500", "501-600", "601-700", "701-800",
    "801-900", "901+",
];

const PRICE_BUCKET_COUNT: usize = 10;
const PRICE_BUCKET_WIDTH: f64 = 100.0;

/// Calculate the sales totals for `transactions`.
///
/// An empty slice gives all zeros.
pub fn calculate_statistics(transactions: &[Transaction]) -> Statistics {
    transactions
        .iter()
        .fold(Statistics::default(), |mut statistics, transaction| {
            if transaction.sold {
                statistics.total_amount += transaction.price;
                statistics.sold_items += 1;
            } else {
                statistics.not_sold_items += 1;
            }

            statistics
        })
}

/// The index of the price bucket that `price` falls in.
///
/// Bucket `i` holds prices in `[100 * i, 100 * (i + 1))` and the last bucket
/// holds everything from 900 upwards. Negative prices (and NaN) are not in
/// any bucket.
fn price_bucket(price: f64) -> Option<usize> {
    if price.is_nan() || price < 0.0 {
        return None;
    }

    let bucket = (price / PRICE_BUCKET_WIDTH).floor();

    if bucket >= (PRICE_BUCKET_COUNT - 1) as f64 {
        Some(PRICE_BUCKET_COUNT - 1)
    } else {
        Some(bucket as usize)
    }
}

/// Count `transactions` by price range.
///
/// Always returns one entry per label in [PRICE_RANGE_LABELS], in that order,
/// including ranges with a count of zero.
pub fn count_by_price_range(transactions: &[Transaction]) -> Vec<PriceRangeCount> {
    let mut counts = [0u64; PRICE_BUCKET_COUNT];

    for bucket in transactions
        .iter()
        .filter_map(|transaction| price_bucket(transaction.price))
    {
        counts[bucket] += 1;
    }

    PRICE_RANGE_LABELS
        .into_iter()
        .zip(counts)
        .map(|(range, count)| PriceRangeCount { range, count })
        .collect()
}

/// Count `transactions` by category, sorted by category name.
///
/// Only categories that appear in `transactions` are included.
pub fn count_by_category(transactions: &[Transaction]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();

    for transaction in transactions {
        *counts.entry(transaction.category.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_owned(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::transaction::Transaction;

    use super::{
        CategoryCount, PRICE_RANGE_LABELS, Statistics, calculate_statistics, count_by_category,
        count_by_price_range, price_bucket,
    };

    fn create_test_transaction(id: i64, price: f64, sold: bool, category: &str) -> Transaction {
        Transaction::build(id, price, datetime!(2022-03-05 0:00 UTC))
            .sold(sold)
            .category(category)
            .finalise()
    }

    fn create_mixed_transactions() -> Vec<Transaction> {
        vec![
            create_test_transaction(1, 50.0, true, "Electronics"),
            create_test_transaction(2, 250.0, false, "Furniture"),
            create_test_transaction(3, 99.99, true, "Electronics"),
            create_test_transaction(4, 100.0, false, "Clothing"),
            create_test_transaction(5, 900.0, true, "Jewelery"),
            create_test_transaction(6, 12_000.0, false, "Jewelery"),
            create_test_transaction(7, -5.0, true, "Refunds"),
            create_test_transaction(8, 0.0, false, "Electronics"),
        ]
    }

    #[test]
    fn statistics_sum_sold_items_only() {
        let transactions = vec![
            create_test_transaction(1, 50.0, true, "Electronics"),
            create_test_transaction(2, 250.0, false, "Furniture"),
        ];

        let got = calculate_statistics(&transactions);

        assert_eq!(
            got,
            Statistics {
                total_amount: 50.0,
                sold_items: 1,
                not_sold_items: 1
            }
        );
    }

    #[test]
    fn statistics_of_nothing_are_zero() {
        assert_eq!(calculate_statistics(&[]), Statistics::default());
    }

    #[test]
    fn sold_and_not_sold_add_up_to_total() {
        let transactions = create_mixed_transactions();

        let got = calculate_statistics(&transactions);

        assert_eq!(
            got.sold_items + got.not_sold_items,
            transactions.len() as u64
        );
    }

    #[test]
    fn statistics_serialise_with_camel_case_keys() {
        let json = serde_json::to_value(Statistics {
            total_amount: 50.0,
            sold_items: 1,
            not_sold_items: 1,
        })
        .unwrap();

        assert_eq!(
            json,
            serde_json::json!({"totalAmount": 50.0, "soldItems": 1, "notSoldItems": 1})
        );
    }

    #[test]
    fn price_buckets_are_half_open() {
        assert_eq!(price_bucket(0.0), Some(0));
        assert_eq!(price_bucket(99.99), Some(0));
        assert_eq!(price_bucket(100.0), Some(1));
        assert_eq!(price_bucket(100.5), Some(1));
        assert_eq!(price_bucket(250.0), Some(2));
        assert_eq!(price_bucket(899.99), Some(8));
        assert_eq!(price_bucket(900.0), Some(9));
        assert_eq!(price_bucket(901.0), Some(9));
        assert_eq!(price_bucket(1e12), Some(9));
        assert_eq!(price_bucket(-0.01), None);
        assert_eq!(price_bucket(f64::NAN), None);
    }

    #[test]
    fn price_ranges_are_always_in_fixed_order() {
        let got = count_by_price_range(&[create_test_transaction(1, 950.0, true, "A")]);
        let labels: Vec<_> = got.iter().map(|range| range.range).collect();

        assert_eq!(labels, PRICE_RANGE_LABELS);
        assert_eq!(got[9].count, 1);
        assert!(got[..9].iter().all(|range| range.count == 0));
    }

    #[test]
    fn price_ranges_of_nothing_are_zero() {
        let got = count_by_price_range(&[]);

        assert_eq!(got.len(), 10);
        assert!(got.iter().all(|range| range.count == 0));
    }

    #[test]
    fn price_ranges_cover_every_non_negative_price() {
        let transactions = create_mixed_transactions();
        let non_negative = transactions.iter().filter(|t| t.price >= 0.0).count() as u64;

        let got: u64 = count_by_price_range(&transactions)
            .iter()
            .map(|range| range.count)
            .sum();

        assert_eq!(got, non_negative);
    }

    #[test]
    fn counts_categories_in_name_order() {
        let transactions = create_mixed_transactions();

        let got = count_by_category(&transactions);

        let want = [
            ("Clothing", 1),
            ("Electronics", 3),
            ("Furniture", 1),
            ("Jewelery", 2),
            ("Refunds", 1),
        ]
        .map(|(category, count)| CategoryCount {
            category: category.to_owned(),
            count,
        });
        assert_eq!(got, want);
    }

    #[test]
    fn category_counts_add_up_to_total() {
        let transactions = create_mixed_transactions();

        let got: u64 = count_by_category(&transactions)
            .iter()
            .map(|category| category.count)
            .sum();

        assert_eq!(got, transactions.len() as u64);
    }

    #[test]
    fn categories_of_nothing_are_empty() {
        assert!(count_by_category(&[]).is_empty());
    }
}
