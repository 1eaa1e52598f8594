//! Transaction querying and aggregation.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and database functions for storing and reading it
//! - Month-filtered search, pagination and summaries
//! - Reseeding the store from the seed source
//! - JSON route handlers for the above

mod aggregation;
mod api;
mod core;
mod query;
mod seed;

pub use aggregation::{
    CategoryCount, PriceRangeCount, Statistics, calculate_statistics, count_by_category,
    count_by_price_range,
};
pub use api::{
    get_category_count_endpoint, get_combined_endpoint, get_price_range_endpoint,
    get_statistics_endpoint, get_transactions_endpoint, initialize_endpoint,
};
pub(crate) use api::summarise_month;
pub use core::{Transaction, TransactionBuilder, count_transactions, create_transaction_table};
pub use query::{PageRequest, count_matching, search_transactions};
pub use seed::{SeedConfig, parse_seed_transactions, replace_all_transactions, reseed};
