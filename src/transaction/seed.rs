//! Replaces the stored transactions with a fresh copy from the seed source.
//!
//! The seed source is fetched and validated before the store is touched, and
//! the replacement itself runs in a single SQL transaction under the
//! connection lock. Readers therefore see either the old or the new set of
//! transactions, never a mix of both.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
    time::Duration,
};

use rusqlite::Connection;

use crate::Error;

use super::core::{Transaction, insert_transaction};

/// Where to fetch seed data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    /// The URL of a JSON array of transactions.
    pub url: String,
    /// How long to wait for the seed source before giving up.
    pub timeout: Duration,
}

impl SeedConfig {
    /// The timeout used when none is configured.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Fetch seed data from `url` with the default timeout.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// Download the transactions from the seed source.
///
/// This function blocks the current thread, call it from a blocking task.
///
/// # Errors
/// Returns [Error::UpstreamFetchFailed] if the request fails, the response
/// status is not a success, or the body is not a valid list of transactions.
pub fn fetch_seed_transactions(config: &SeedConfig) -> Result<Vec<Transaction>, Error> {
    let agent_config = ureq::Agent::config_builder()
        .timeout_global(Some(config.timeout))
        .build();
    let agent = ureq::Agent::new_with_config(agent_config);

    let mut response = agent
        .get(&config.url)
        .call()
        .map_err(|error| Error::UpstreamFetchFailed(format!("GET {}: {error}", config.url)))?;

    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|error| Error::UpstreamFetchFailed(format!("could not read response: {error}")))?;

    parse_seed_transactions(&body)
}

/// Parse and validate the seed source's response body.
///
/// # Errors
/// Returns [Error::UpstreamFetchFailed] if `body` is not a JSON array of
/// transactions or if two transactions share an ID.
pub fn parse_seed_transactions(body: &str) -> Result<Vec<Transaction>, Error> {
    let transactions: Vec<Transaction> = serde_json::from_str(body)
        .map_err(|error| Error::UpstreamFetchFailed(format!("invalid seed data: {error}")))?;

    let mut seen_ids = HashSet::with_capacity(transactions.len());
    if let Some(duplicate) = transactions
        .iter()
        .find(|transaction| !seen_ids.insert(transaction.id))
    {
        return Err(Error::UpstreamFetchFailed(format!(
            "invalid seed data: the ID {} appears more than once",
            duplicate.id
        )));
    }

    Ok(transactions)
}

/// Delete every stored transaction and insert `transactions` in their place.
///
/// Either all of `transactions` are stored or, on error, the previously
/// stored transactions are kept.
///
/// # Errors
/// Returns [Error::StoreUnavailable] if there is an SQL error.
pub fn replace_all_transactions(
    transactions: &[Transaction],
    connection: &mut Connection,
) -> Result<(), Error> {
    let sql_transaction = connection.transaction()?;

    sql_transaction.execute("DELETE FROM \"transaction\"", ())?;

    for transaction in transactions {
        insert_transaction(transaction, &sql_transaction)?;
    }

    sql_transaction.commit()?;

    Ok(())
}

/// Fetch the seed data and replace the stored transactions with it.
///
/// Returns the number of transactions now in the store.
///
/// # Errors
/// Returns [Error::UpstreamFetchFailed] if the seed data could not be fetched
/// or is malformed, in which case the store is left untouched, or
/// [Error::StoreUnavailable] if the store could not be updated.
pub async fn reseed(
    config: &SeedConfig,
    db_connection: &Arc<Mutex<Connection>>,
) -> Result<usize, Error> {
    let fetch_config = config.clone();
    let transactions = tokio::task::spawn_blocking(move || fetch_seed_transactions(&fetch_config))
        .await
        .map_err(|error| Error::UpstreamFetchFailed(format!("seed task failed: {error}")))??;

    tracing::info!(
        "Fetched {} transactions from {}",
        transactions.len(),
        config.url
    );

    let mut connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::StoreUnavailable("could not acquire the database lock".to_owned()))?;

    replace_all_transactions(&transactions, &mut connection)
        .inspect_err(|error| tracing::error!("could not replace transactions: {error}"))?;

    Ok(transactions.len())
}
