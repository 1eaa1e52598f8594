//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig, transaction::SeedConfig};

/// The state of the REST server.
///
/// Every request handler receives the parts of this state it needs through
/// [axum::extract::FromRef], there is no global state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,

    /// Where to fetch seed data from when reseeding the database.
    pub seed_config: SeedConfig,

    /// The database connection.
    ///
    /// Reads and reseeds both take this lock, so a reseed is never observed
    /// half way through.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        seed_config: SeedConfig,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            pagination_config,
            seed_config,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
