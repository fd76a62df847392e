//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;

use rusqlite::{params, Connection};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use urlshort::{HandlerChain, HttpServer};
use urlshort::config::TimeoutConfig;

/// Create a SQLite database with the `urls` table and the given rows.
pub fn seed_database(path: &Path, rows: &[(&str, &str)]) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch("CREATE TABLE urls (path TEXT PRIMARY KEY, url TEXT NOT NULL);")
        .unwrap();
    for (p, u) in rows {
        conn.execute("INSERT INTO urls (path, url) VALUES (?1, ?2)", params![p, u])
            .unwrap();
    }
}

/// Serve `chain` on an ephemeral port.
///
/// Returns the bound address and a sender that stops the server when used or dropped.
pub async fn start_server(chain: HandlerChain) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(chain, &TimeoutConfig::default());
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = server
            .run(listener, async move {
                let _ = rx.await;
            })
            .await;
    });

    (addr, tx)
}

/// HTTP client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
