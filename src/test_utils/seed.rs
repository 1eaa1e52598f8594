use axum::{Router, routing::get};
use time::macros::datetime;

use crate::transaction::Transaction;

/// Two March sales and one April sale.
///
/// March has one sold item for $50 and one unsold item for $250.
pub(crate) fn march_scenario() -> Vec<Transaction> {
    vec![
        Transaction::build(1, 50.0, datetime!(2022-03-05 0:00 UTC))
            .title("Mouse")
            .sold(true)
            .category("Electronics")
            .finalise(),
        Transaction::build(2, 250.0, datetime!(2022-03-15 0:00 UTC))
            .title("Desk")
            .sold(false)
            .category("Furniture")
            .finalise(),
        Transaction::build(3, 50.0, datetime!(2022-04-01 0:00 UTC))
            .title("Lamp")
            .sold(true)
            .category("Electronics")
            .finalise(),
    ]
}

/// Serve `body` as JSON from a local server and return its URL.
pub(crate) async fn serve_seed_data(body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test listener");
    let address = listener.local_addr().unwrap();
    let app = Router::new().route(
        "/seed",
        get(move || async move { ([("content-type", "application/json")], body) }),
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{address}/seed")
}
