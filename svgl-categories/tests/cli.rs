//! End-to-end tests for svgl-categories against a mock catalog

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn svgl_categories(server: &MockServer, temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("svgl-categories").unwrap();
    cmd.env("SVGL_API_URL", server.uri())
        .env("SVGL_CONFIG", temp_dir.path().join("missing.toml"));
    cmd
}

async fn mount_categories(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "category": "Software", "total": 120 },
            { "category": "Hosting", "total": 9 }
        ])))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_text_listing() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    mount_categories(&server).await;

    svgl_categories(&server, &temp_dir)
        .assert()
        .success()
        .stdout("Software (120)\nHosting (9)\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_json_listing() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    mount_categories(&server).await;

    let output = svgl_categories(&server, &temp_dir)
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let categories: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(categories[1]["name"], "Hosting");
    assert_eq!(categories[1]["total_count"], 9);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_is_empty_listing() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    svgl_categories(&server, &temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No categories available."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rate_limited() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    svgl_categories(&server, &temp_dir).assert().code(2);
}
