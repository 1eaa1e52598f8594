use std::sync::{Arc, Mutex};

use rusqlite::Connection;

/// Poison the lock on `db_connection` by panicking on another thread while it is held.
pub(crate) fn poison_lock(db_connection: &Arc<Mutex<Connection>>) {
    let db_connection = db_connection.clone();

    let result = std::thread::spawn(move || {
        let _connection = db_connection.lock().unwrap();
        panic!("panicking while holding the database lock");
    })
    .join();

    assert!(result.is_err(), "the lock holder should have panicked");
}
