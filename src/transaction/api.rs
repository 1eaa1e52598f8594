//! JSON route handlers for querying and reseeding transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, month::parse_month, pagination::PaginationConfig};

use super::{
    aggregation::{
        CategoryCount, PriceRangeCount, Statistics, calculate_statistics, count_by_category,
        count_by_price_range,
    },
    core::{Transaction, get_transactions_in_month},
    query::{PageRequest, search_transactions},
    seed::{SeedConfig, reseed},
};

/// The state needed by the transaction API.
#[derive(Debug, Clone)]
pub struct TransactionApiState {
    /// The database connection for reading and replacing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The defaults for paging through transactions.
    pub pagination_config: PaginationConfig,
    /// Where to fetch seed data from.
    pub seed_config: SeedConfig,
}

impl FromRef<AppState> for TransactionApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
            seed_config: state.seed_config.clone(),
        }
    }
}

/// Query parameters for the paginated transactions list.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    pub month: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
    #[serde(default)]
    pub search: String,
}

/// Query parameters for the month summaries.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

/// All three month summaries, computed from the same set of transactions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedSummary {
    pub statistics: Statistics,
    pub price_range: Vec<PriceRangeCount>,
    pub category_count: Vec<CategoryCount>,
}

/// Load the transactions for the month named `month` and pass them to `summarise`.
///
/// The database lock is released before `summarise` runs.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `month` is missing or not a month name, or
/// [Error::StoreUnavailable] if the transactions could not be read.
pub(crate) fn summarise_month<T>(
    month: Option<&str>,
    db_connection: &Mutex<Connection>,
    summarise: impl FnOnce(&[Transaction]) -> T,
) -> Result<T, Error> {
    let month = parse_month(month.unwrap_or_default())?;

    let transactions = {
        let connection = db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| {
                Error::StoreUnavailable("could not acquire the database lock".to_owned())
            })?;

        get_transactions_in_month(month, &connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    Ok(summarise(&transactions))
}

/// Reload every transaction from the seed source.
pub async fn initialize_endpoint(
    State(state): State<TransactionApiState>,
) -> Result<String, Error> {
    let count = reseed(&state.seed_config, &state.db_connection).await?;

    Ok(format!("Database initialized with {count} transactions"))
}

/// Get a page of the month's transactions that match the search text.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionApiState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let page = PageRequest::parse(
        query.page.as_deref(),
        query.per_page.as_deref(),
        &state.pagination_config,
    )?;

    summarise_month(query.month.as_deref(), &state.db_connection, |transactions| {
        search_transactions(transactions, &query.search, page)
    })
    .map(Json)
}

/// Get the sales totals for a month.
pub async fn get_statistics_endpoint(
    State(state): State<TransactionApiState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Statistics>, Error> {
    summarise_month(
        query.month.as_deref(),
        &state.db_connection,
        calculate_statistics,
    )
    .map(Json)
}

/// Get the price histogram for a month.
pub async fn get_price_range_endpoint(
    State(state): State<TransactionApiState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<PriceRangeCount>>, Error> {
    summarise_month(
        query.month.as_deref(),
        &state.db_connection,
        count_by_price_range,
    )
    .map(Json)
}

/// Get the number of transactions in each category for a month.
pub async fn get_category_count_endpoint(
    State(state): State<TransactionApiState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    summarise_month(
        query.month.as_deref(),
        &state.db_connection,
        count_by_category,
    )
    .map(Json)
}

/// Get the statistics, price histogram and category counts for a month in one response.
pub async fn get_combined_endpoint(
    State(state): State<TransactionApiState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CombinedSummary>, Error> {
    summarise_month(query.month.as_deref(), &state.db_connection, |transactions| {
        CombinedSummary {
            statistics: calculate_statistics(transactions),
            price_range: count_by_price_range(transactions),
            category_count: count_by_category(transactions),
        }
    })
    .map(Json)
}
