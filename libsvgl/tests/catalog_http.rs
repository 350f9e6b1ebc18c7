//! Integration tests for the HTTP catalog against a mock server

use libsvgl::catalog::{Catalog, HttpCatalog, IconQuery};
use libsvgl::config::ApiConfig;
use libsvgl::error::CatalogError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_for(server: &MockServer) -> HttpCatalog {
    HttpCatalog::new(&ApiConfig {
        base_url: server.uri(),
        ..ApiConfig::default()
    })
    .expect("Failed to build catalog")
}

fn icons_payload() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "title": "GitHub",
            "category": "Software",
            "route": {
                "light": "https://svgl.app/library/github_light.svg",
                "dark": "https://svgl.app/library/github_dark.svg"
            },
            "url": "https://github.com"
        },
        {
            "id": 2,
            "title": "Vercel",
            "category": ["Hosting", "Software"],
            "route": "https://svgl.app/library/vercel.svg",
            "url": "https://vercel.com"
        }
    ])
}

#[tokio::test]
async fn test_full_listing_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(icons_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let icons = catalog_for(&server).list_icons(&IconQuery::All).await.unwrap();

    assert_eq!(icons.len(), 2);
    assert_eq!(icons[0].name, "GitHub");
    assert_eq!(
        icons[0].asset_location,
        "https://svgl.app/library/github_light.svg"
    );
    assert_eq!(icons[1].category, "Hosting, Software");
    assert_eq!(icons[1].asset_location, "https://svgl.app/library/vercel.svg");
}

#[tokio::test]
async fn test_search_sends_encoded_term() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("search", "next js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let icons = catalog_for(&server)
        .list_icons(&IconQuery::Search("next js".to_string()))
        .await
        .unwrap();

    assert!(icons.is_empty());
}

#[tokio::test]
async fn test_category_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/category/Software"))
        .respond_with(ResponseTemplate::new(200).set_body_json(icons_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let icons = catalog_for(&server)
        .list_icons(&IconQuery::Category("Software".to_string()))
        .await
        .unwrap();

    assert_eq!(icons.len(), 2);
}

#[tokio::test]
async fn test_not_found_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/category/Nothing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let icons = catalog_for(&server)
        .list_icons(&IconQuery::Category("Nothing".to_string()))
        .await
        .unwrap();

    assert!(icons.is_empty());
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = catalog_for(&server)
        .list_icons(&IconQuery::Search("git".to_string()))
        .await
        .unwrap_err();

    assert_eq!(err, CatalogError::RateLimited);
    assert_eq!(
        err.to_string(),
        "Too many requests. Please wait a moment before searching again."
    );
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = catalog_for(&server)
        .list_icons(&IconQuery::All)
        .await
        .unwrap_err();

    assert_eq!(err, CatalogError::UpstreamStatus(500));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_malformed_payload_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = catalog_for(&server)
        .list_icons(&IconQuery::All)
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Decode(_)));
}

#[tokio::test]
async fn test_categories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "category": "Software", "total": 120 },
            { "category": "Hosting", "total": 9 }
        ])))
        .mount(&server)
        .await;

    let categories = catalog_for(&server).list_categories().await.unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Software");
    assert_eq!(categories[0].total_count, 120);
}

#[tokio::test]
async fn test_categories_not_found_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let categories = catalog_for(&server).list_categories().await.unwrap();
    assert!(categories.is_empty());
}

#[tokio::test]
async fn test_markup_fetched_by_filename() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/svg/github_light.svg"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<svg></svg>"))
        .expect(1)
        .mount(&server)
        .await;

    let markup = catalog_for(&server)
        .fetch_markup("https://svgl.app/library/github_light.svg")
        .await
        .unwrap();

    assert_eq!(markup, "<svg></svg>");
}

#[tokio::test]
async fn test_markup_not_found_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = catalog_for(&server)
        .fetch_markup("https://svgl.app/library/missing.svg")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::MarkupUnavailable { status: 404, .. }
    ));
}

#[tokio::test]
async fn test_markup_without_filename_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = catalog_for(&server)
        .fetch_markup("https://svgl.app/library/")
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::MissingFilename(_)));
}

#[tokio::test]
async fn test_configured_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let catalog = HttpCatalog::new(&ApiConfig {
        base_url: server.uri(),
        timeout: Some("100ms".to_string()),
        ..ApiConfig::default()
    })
    .unwrap();

    let err = catalog.list_icons(&IconQuery::All).await.unwrap_err();
    assert!(matches!(err, CatalogError::Transport(_)));
}
