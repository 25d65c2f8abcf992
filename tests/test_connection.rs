//! Connection: request headers and error decoding.

mod common;

use std::sync::Arc;
use std::time::Duration;

use mtg_deckbuilder::models::CatalogResponse;
use mtg_deckbuilder::{config, Connection, DeckBuilderError, RateLimiter};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connect(server: &MockServer) -> Connection {
    let limiter = Arc::new(RateLimiter::new(5, Duration::from_secs(60)));
    Connection::new(&format!("{}/", server.uri()), Duration::from_secs(5), limiter).unwrap()
}

#[tokio::test]
async fn sends_user_agent_and_accept_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog/supertypes"))
        .and(header("accept", "application/json"))
        .and(header_exists("user-agent"))
        .and(query_param("pretty", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": ["Basic"] })))
        .expect(1)
        .mount(&server)
        .await;

    let conn = connect(&server);
    assert!(!conn.base_url().ends_with('/'));
    let resp: CatalogResponse = conn
        .get_json(&config::catalog_path("supertypes"), &[("pretty", "false".to_string())])
        .await
        .unwrap();
    assert_eq!(resp.data, vec!["Basic"]);
    assert_eq!(conn.limiter().in_window().await, 0);
}

#[tokio::test]
async fn throttled_requests_are_recorded_by_the_limiter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog/card-types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .mount(&server)
        .await;

    let conn = connect(&server);
    for _ in 0..3 {
        let _: CatalogResponse = conn
            .get_json_throttled(&config::catalog_path("card-types"), &[])
            .await
            .unwrap();
    }
    assert_eq!(conn.limiter().in_window().await, 3);
}

#[tokio::test]
async fn api_error_body_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(common::error_json(404, "not_found", "No cards found")),
        )
        .mount(&server)
        .await;

    let conn = connect(&server);
    let err = conn
        .get_json::<CatalogResponse>(config::SEARCH_PATH, &[])
        .await
        .unwrap_err();
    assert!(err.is_empty_result());
    assert_eq!(err.to_string(), "Scryfall error 404 (not_found): No cards found");
}

#[tokio::test]
async fn non_json_error_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let conn = connect(&server);
    let err = conn
        .get_json::<CatalogResponse>(config::SEARCH_PATH, &[])
        .await
        .unwrap_err();
    assert!(!err.is_empty_result());
    match err {
        DeckBuilderError::Status { status, url } => {
            assert_eq!(status, 502);
            assert!(url.ends_with("/cards/search"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog/spell-types"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let conn = connect(&server);
    let err = conn
        .get_json::<CatalogResponse>(&config::catalog_path("spell-types"), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, DeckBuilderError::Json(_)));
}
