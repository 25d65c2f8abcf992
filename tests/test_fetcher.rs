//! Paginated search against a mock API server.

mod common;

use std::sync::Arc;
use std::time::Duration;

use mtg_deckbuilder::models::SearchFailure;
use mtg_deckbuilder::{
    DeckBuilderError, DeckBuilderSdk, RateLimiter, ResultStore, SearchId, SearchOptions,
    SearchRequest, SearchSnapshot, SnapshotStatus,
};
use tokio::time::timeout;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

async fn collect_snapshots(
    sdk: &mtg_deckbuilder::DeckBuilderSdk,
    request: SearchRequest,
) -> (SnapshotStatus, Vec<SearchSnapshot>) {
    let mut seen = Vec::new();
    let status = sdk
        .fetcher()
        .search(request, &mut |s: SearchSnapshot| seen.push(s))
        .await;
    (status, seen)
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn accumulates_every_page_up_to_total() {
    let server = MockServer::start().await;
    common::mount_page(&server, 1, ok(common::page_json(common::cards("a", 3), 5, true))).await;
    // The second page overshoots; the total from page 1 caps the result.
    common::mount_page(&server, 2, ok(common::page_json(common::cards("b", 3), 5, false))).await;

    let sdk = common::sdk_for(&server);
    let request = SearchRequest::new(SearchId(1), "t:goblin");
    let (status, seen) = collect_snapshots(&sdk, request).await;

    assert_eq!(status, SnapshotStatus::Complete);
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].status, SnapshotStatus::Partial);
    assert_eq!((seen[0].received, seen[0].total), (3, 5));
    assert_eq!(seen[1].records.len(), 5);
    assert_eq!(seen[1].received, 5);
    assert!(seen.iter().all(|s| s.search_id == SearchId(1)));
    assert_eq!(seen[1].records[3].id, "b-0");
}

#[tokio::test]
async fn sends_query_and_ordering_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("q", "t:goblin id>=R"))
        .and(query_param("order", "name"))
        .and(query_param("dir", "asc"))
        .and(query_param("unique", "cards"))
        .and(query_param("page", "1"))
        .respond_with(ok(common::page_json(common::cards("a", 1), 1, false)))
        .expect(1)
        .mount(&server)
        .await;

    let sdk = common::sdk_for(&server);
    let request = SearchRequest::new(SearchId(7), "  t:goblin id>=R ");
    let (status, seen) = collect_snapshots(&sdk, request).await;
    assert_eq!(status, SnapshotStatus::Complete);
    assert_eq!(seen[0].query, "t:goblin id>=R");
}

#[tokio::test]
async fn only_pages_after_the_first_wait_on_the_limiter() {
    let server = MockServer::start().await;
    common::mount_page(&server, 1, ok(common::page_json(common::cards("a", 2), 6, true))).await;
    common::mount_page(&server, 2, ok(common::page_json(common::cards("b", 2), 6, true))).await;
    common::mount_page(&server, 3, ok(common::page_json(common::cards("c", 2), 6, false))).await;

    let limiter = Arc::new(RateLimiter::new(2, Duration::from_secs(60)));
    let sdk = DeckBuilderSdk::builder()
        .base_url(&server.uri())
        .rate_limiter(Arc::clone(&limiter))
        .build()
        .unwrap();

    let (status, seen) = timeout(
        Duration::from_secs(5),
        collect_snapshots(&sdk, SearchRequest::new(SearchId(1), "t:goblin")),
    )
    .await
    .expect("a three-page search fits two admissions");
    assert_eq!(status, SnapshotStatus::Complete);
    assert_eq!(seen.len(), 3);
    assert_eq!(limiter.in_window().await, 2);

    // With the window full, page 1 of a new search still goes out at once.
    let fetcher = sdk.fetcher();
    let mut pager = fetcher.pager(SearchRequest::new(SearchId(2), "t:goblin"));
    let first = timeout(Duration::from_secs(2), pager.next())
        .await
        .expect("page 1 skips the limiter")
        .unwrap();
    assert_eq!(first.received, 2);
    assert_eq!(limiter.in_window().await, 2);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_matches_is_one_empty_complete_snapshot() {
    let server = MockServer::start().await;
    common::mount_page(
        &server,
        1,
        ResponseTemplate::new(404).set_body_json(common::error_json(404, "not_found", "No cards found")),
    )
    .await;

    let sdk = common::sdk_for(&server);
    let (status, seen) = collect_snapshots(&sdk, SearchRequest::new(SearchId(1), "xyzzy")).await;

    assert_eq!(status, SnapshotStatus::Complete);
    assert_eq!(seen.len(), 1);
    assert!(seen[0].records.is_empty());
    assert_eq!(seen[0].total, 0);
}

#[tokio::test]
async fn first_page_failure_is_one_failed_snapshot() {
    let server = MockServer::start().await;
    common::mount_page(
        &server,
        1,
        ResponseTemplate::new(422).set_body_json(common::error_json(422, "bad_request", "bad query")),
    )
    .await;

    let sdk = common::sdk_for(&server);
    let (status, seen) = collect_snapshots(&sdk, SearchRequest::new(SearchId(1), "o:(")).await;

    let expected = SnapshotStatus::Failed(SearchFailure::Status {
        status: 422,
        details: "bad query".to_string(),
    });
    assert_eq!(status, expected);
    assert_eq!(seen.len(), 1);
    assert!(seen[0].is_failed());
    assert!(seen[0].records.is_empty());
}

#[tokio::test]
async fn later_page_failure_keeps_accumulated_records() {
    let server = MockServer::start().await;
    common::mount_page(&server, 1, ok(common::page_json(common::cards("a", 3), 6, true))).await;
    common::mount_page(&server, 2, ResponseTemplate::new(500)).await;

    let sdk = common::sdk_for(&server);
    let mut store = ResultStore::new();
    let status = sdk
        .search_into(&mut store, "t:goblin", SearchOptions::default())
        .await;

    assert_eq!(status, SnapshotStatus::Partial);
    assert_eq!(store.received(), 3);
    assert_eq!(store.total(), 6);
    assert_eq!(store.view().len(), 3);
}

/// Page 1 announces five cards; every later page is empty but claims more.
async fn mount_stalled_search(server: &MockServer) {
    common::mount_page(server, 1, ok(common::page_json(common::cards("a", 2), 5, true))).await;
    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .respond_with(ok(common::page_json(Vec::new(), 5, true)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn empty_later_page_ends_the_search() {
    let server = MockServer::start().await;
    mount_stalled_search(&server).await;

    let sdk = common::sdk_for(&server);
    let (status, seen) = timeout(
        Duration::from_secs(5),
        collect_snapshots(&sdk, SearchRequest::new(SearchId(1), "t:goblin")),
    )
    .await
    .expect("search must terminate");

    assert_eq!(status, SnapshotStatus::Partial);
    assert_eq!(seen.len(), 1);
    assert_eq!((seen[0].received, seen[0].total), (2, 5));
    assert_eq!(server.received_requests().await.unwrap_or_default().len(), 2);
}

#[tokio::test]
async fn collect_stops_at_an_empty_later_page() {
    let server = MockServer::start().await;
    mount_stalled_search(&server).await;

    let sdk = common::sdk_for(&server);
    let request = SearchRequest::new(SearchId(0), "t:goblin");
    let records = timeout(Duration::from_secs(5), sdk.fetcher().collect(&request))
        .await
        .expect("collect must terminate")
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(server.received_requests().await.unwrap_or_default().len(), 2);
}

#[tokio::test]
async fn collect_returns_errors_instead_of_swallowing_them() {
    let server = MockServer::start().await;
    common::mount_page(&server, 1, ok(common::page_json(common::cards("a", 2), 4, true))).await;
    common::mount_page(&server, 2, ResponseTemplate::new(503)).await;

    let sdk = common::sdk_for(&server);
    let request = SearchRequest::new(SearchId(0), "t:goblin");
    let err = sdk.fetcher().collect(&request).await.unwrap_err();
    assert!(matches!(err, DeckBuilderError::Status { status: 503, .. }));
}

// ---------------------------------------------------------------------------
// Pager and stream
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pager_is_lazy_and_restartable() {
    let server = MockServer::start().await;
    common::mount_page(&server, 1, ok(common::page_json(common::cards("a", 2), 4, true))).await;
    common::mount_page(&server, 2, ok(common::page_json(common::cards("b", 2), 4, false))).await;

    let sdk = common::sdk_for(&server);
    let fetcher = sdk.fetcher();
    let mut pager = fetcher.pager(SearchRequest::new(SearchId(3), "t:goblin"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());

    let first = pager.next().await.unwrap();
    assert_eq!(first.received, 2);
    pager.restart();
    let again = pager.next().await.unwrap();
    assert_eq!(again.received, 2);
    assert_eq!(again.records, first.records);

    let last = pager.next().await.unwrap();
    assert_eq!(last.status, SnapshotStatus::Complete);
    assert!(pager.next().await.is_none());
    assert!(pager.is_finished());
}

#[tokio::test]
async fn search_stream_delivers_snapshots_in_order() {
    let server = MockServer::start().await;
    common::mount_page(&server, 1, ok(common::page_json(common::cards("a", 2), 4, true))).await;
    common::mount_page(&server, 2, ok(common::page_json(common::cards("b", 2), 4, false))).await;

    let sdk = common::sdk_for(&server);
    let mut rx = sdk.search_stream(SearchRequest::new(SearchId(9), "t:goblin"));

    let mut received = Vec::new();
    while let Some(snapshot) = rx.recv().await {
        received.push(snapshot.received);
    }
    assert_eq!(received, vec![2, 4]);
}
