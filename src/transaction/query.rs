//! Free-text search and pagination over a month of transactions.

use crate::{Error, pagination::PaginationConfig};

use super::core::Transaction;

/// A validated page request, both numbers are at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The 1-based page number.
    pub page: u64,
    /// The maximum number of transactions on a page.
    pub per_page: u64,
}

impl PageRequest {
    /// Create a page request, checking that both numbers are positive.
    ///
    /// # Errors
    /// Returns [Error::InvalidPagination] if `page` or `per_page` is zero or negative.
    pub fn new(page: i64, per_page: i64) -> Result<Self, Error> {
        if page < 1 {
            return Err(Error::InvalidPagination(format!(
                "page must be a positive integer, got {page}"
            )));
        }

        if per_page < 1 {
            return Err(Error::InvalidPagination(format!(
                "page size must be a positive integer, got {per_page}"
            )));
        }

        Ok(Self {
            page: page as u64,
            per_page: per_page as u64,
        })
    }

    /// Parse a page request from raw query parameters.
    ///
    /// Missing or blank values fall back to the defaults in `config`.
    ///
    /// # Errors
    /// Returns [Error::InvalidPagination] if a value is not an integer or is
    /// not positive.
    pub fn parse(
        page: Option<&str>,
        per_page: Option<&str>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let page = parse_or_default(page, "page", config.default_page)?;
        let per_page = parse_or_default(per_page, "page size", config.default_page_size)?;

        Self::new(page, per_page)
    }

    /// The number of pages needed to show `total` transactions.
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page)
    }
}

fn parse_or_default(value: Option<&str>, name: &str, default: u64) -> Result<i64, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(default as i64),
        Some(text) => text.parse().map_err(|_| {
            Error::InvalidPagination(format!("{name} must be a positive integer, got \"{text}\""))
        }),
    }
}

/// Whether `transaction` matches the free-text `search`.
///
/// A transaction matches if the search text appears in its title or
/// description, ignoring case, or in its price written as a number, e.g. "50"
/// matches a price of 250. An empty search matches every transaction.
pub fn matches_search(transaction: &Transaction, search: &str) -> bool {
    let search = search.trim();

    if search.is_empty() {
        return true;
    }

    let search = search.to_lowercase();

    transaction.title.to_lowercase().contains(&search)
        || transaction.description.to_lowercase().contains(&search)
        || transaction.price.to_string().contains(&search)
}

/// Count the transactions that match `search`.
pub fn count_matching(transactions: &[Transaction], search: &str) -> u64 {
    transactions
        .iter()
        .filter(|transaction| matches_search(transaction, search))
        .count() as u64
}

/// Get one page of the transactions that match `search`.
///
/// `transactions` must already be in a stable order (by ID) so that pages
/// neither overlap nor skip transactions. Pages past the end are empty.
pub fn search_transactions(
    transactions: &[Transaction],
    search: &str,
    page: PageRequest,
) -> Vec<Transaction> {
    let offset = (page.page - 1)
        .checked_mul(page.per_page)
        .and_then(|offset| usize::try_from(offset).ok());
    let Some(offset) = offset else {
        return Vec::new();
    };
    let limit = usize::try_from(page.per_page).unwrap_or(usize::MAX);

    transactions
        .iter()
        .filter(|transaction| matches_search(transaction, search))
        .skip(offset)
        .take(limit)
        .cloned()
        .collect()
}
