//! Shared fixtures for the integration tests.
//!
//! Card JSON in the search API's shape, page and error bodies, and an SDK
//! pointed at a `wiremock` server with a limiter loose enough that tests
//! never wait on it.

#![allow(dead_code)]

use std::time::Duration;

use mtg_deckbuilder::{CardRecord, DeckBuilderSdk};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A card object with the fields the SDK reads.
pub fn card_json(id: &str, name: &str, type_line: &str, identity: &[&str], usd: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "mana_cost": "{1}",
        "cmc": 1.0,
        "type_line": type_line,
        "oracle_text": "",
        "colors": identity,
        "color_identity": identity,
        "rarity": "common",
        "set": "tst",
        "set_name": "Test Set",
        "released_at": "2020-01-01",
        "legalities": { "commander": "legal", "modern": "not_legal" },
        "prices": { "usd": usd, "usd_foil": null, "usd_etched": null, "eur": null, "tix": null }
    })
}

/// `count` cards with ids `{prefix}-{n}`.
pub fn cards(prefix: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|n| {
            card_json(
                &format!("{}-{}", prefix, n),
                &format!("Card {} {}", prefix, n),
                "Creature — Goblin",
                &["R"],
                Some("0.25"),
            )
        })
        .collect()
}

pub fn record(value: Value) -> CardRecord {
    serde_json::from_value(value).unwrap()
}

pub fn page_json(data: Vec<Value>, total: usize, has_more: bool) -> Value {
    let next_page = has_more.then_some("https://example.invalid/next");
    json!({
        "object": "list",
        "total_cards": total,
        "has_more": has_more,
        "next_page": next_page,
        "data": data
    })
}

pub fn error_json(status: u16, code: &str, details: &str) -> Value {
    json!({
        "object": "error",
        "status": status,
        "code": code,
        "details": details
    })
}

/// Answer `page` of the search endpoint with `template`.
pub async fn mount_page(server: &MockServer, page: u32, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("page", page.to_string()))
        .respond_with(template)
        .mount(server)
        .await;
}

pub fn sdk_for(server: &MockServer) -> DeckBuilderSdk {
    DeckBuilderSdk::builder()
        .base_url(&server.uri())
        .timeout(Duration::from_secs(5))
        .rate_limit(1000, Duration::from_millis(10))
        .build()
        .unwrap()
}
