//! Dashboard module
//!
//! Provides a page for browsing a month of transactions with its sales
//! statistics, price range histogram and category breakdown.

mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::{get_dashboard_page, initialize_dashboard};
