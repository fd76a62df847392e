//! End-to-end tests: route sources on disk, a real listener, a real client.

use std::fs;
use std::process::Command;

use reqwest::StatusCode;
use urlshort::config::{ShortenerConfig, SourceConfig};
use urlshort::lifecycle::build_chain;

mod common;

#[tokio::test]
async fn test_full_chain_precedence() {
    let dir = tempfile::tempdir().unwrap();

    let db = dir.path().join("urls.db");
    common::seed_database(
        &db,
        &[
            ("/db", "https://db.example.com/"),
            ("/shared", "https://db.example.com/shared"),
        ],
    );

    let yaml = dir.path().join("routes.yaml");
    fs::write(
        &yaml,
        "- path: /yaml\n  url: https://yaml.example.com/\n- path: /shared\n  url: https://yaml.example.com/shared\n",
    )
    .unwrap();

    let json = dir.path().join("routes.json");
    fs::write(&json, r#"[{"path": "/shared", "url": "https://json.example.com/shared"}]"#).unwrap();

    let mut config = ShortenerConfig::default();
    config.database.path = db;
    config.sources.push(SourceConfig::new(&yaml, None));
    config.sources.push(SourceConfig::new(&json, None));

    let chain = build_chain(&config).unwrap();
    let (addr, stop) = common::start_server(chain).await;
    let client = common::client();

    let cases = [
        ("/db", "https://db.example.com/"),
        ("/yaml", "https://yaml.example.com/"),
        ("/shared", "https://json.example.com/shared"),
    ];
    for (path, expected) in cases {
        let res = client.get(format!("http://{addr}{path}")).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY, "{path}");
        assert_eq!(res.headers()["location"], expected, "{path}");
    }

    let res = client.get(format!("http://{addr}/unknown")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Hello, world!\n");

    let _ = stop.send(());
}

#[tokio::test]
async fn test_serves_without_database() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ShortenerConfig::default();
    config.database.path = dir.path().join("missing.db");

    let chain = build_chain(&config).unwrap();
    assert!(chain.stages().is_empty());

    let (addr, stop) = common::start_server(chain).await;

    let res = common::client()
        .get(format!("http://{addr}/anything"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let _ = stop.send(());
}

#[test]
fn test_malformed_file_prevents_startup() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("broken.json");
    fs::write(&json, "[{\"path\": \"/a\", ").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_urlshort"))
        .arg("--json")
        .arg(&json)
        .arg("--db")
        .arg(dir.path().join("missing.db"))
        .arg("--bind")
        .arg("127.0.0.1:0")
        .env("RUST_LOG", "urlshort=error")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("broken.json"), "{stdout}");
}

#[test]
fn test_invalid_bind_address_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_urlshort"))
        .arg("--bind")
        .arg("not-an-address")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("listener.bind_address"), "{stderr}");
}
