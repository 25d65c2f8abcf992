//! Live smoke test against the public Scryfall API.
//!
//! Exercises catalogs, paginated search, the result store and card
//! printings with real data.
//!
//! Run with:
//! ```sh
//! cargo test -- --ignored --nocapture
//! ```

use mtg_deckbuilder::query::{MatchMode, QuerySelection};
use mtg_deckbuilder::results::{SortDirection, SortKey};
use mtg_deckbuilder::{Color, DeckBuilder, DeckBuilderSdk, ResultStore, SearchOptions, SnapshotStatus};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Print a section header to stderr.
fn section(name: &str) {
    eprintln!("\n{}", "=".repeat(60));
    eprintln!("  {}", name);
    eprintln!("{}", "=".repeat(60));
}

/// Counters for pass/fail reporting.
struct Counters {
    pass: usize,
    fail: usize,
}

impl Counters {
    fn new() -> Self {
        Self { pass: 0, fail: 0 }
    }

    fn check(&mut self, label: &str, condition: bool, detail: &str) {
        let status = if condition { "PASS" } else { "FAIL" };
        if condition {
            self.pass += 1;
        } else {
            self.fail += 1;
        }
        if detail.is_empty() {
            eprintln!("  [{}] {}", status, label);
        } else {
            eprintln!("  [{}] {} -- {}", status, label, detail);
        }
    }
}

// ---------------------------------------------------------------------------
// Main smoke test
// ---------------------------------------------------------------------------

#[tokio::test]
#[ignore]
async fn smoke_test() {
    let sdk = DeckBuilderSdk::builder().build().unwrap();
    let mut c = Counters::new();

    // ================================================================
    // 1. CATALOGS
    // ================================================================
    section("Catalogs");

    let vocab = sdk.catalogs().type_vocabulary().await.unwrap();
    c.check(
        "type vocabulary loads",
        vocab.is_creature_type("Goblin"),
        &format!("{} words", vocab.all().len()),
    );
    let mechanics = sdk.catalogs().mechanics().await.unwrap();
    c.check("mechanics catalog", !mechanics.is_empty(), &format!("{} entries", mechanics.len()));

    // ================================================================
    // 2. SEARCH
    // ================================================================
    section("Search: mono-red goblins under $1");

    let mut selection = QuerySelection::new();
    selection.types.add("Goblin");
    selection.identity.mode = MatchMode::Exact;
    selection.identity.select(Color::R);
    selection.price.max = Some(1.0);
    let query = selection.build();

    let mut store = ResultStore::new();
    let status = sdk.search_into(&mut store, &query, SearchOptions::default()).await;
    c.check(
        "search completes",
        status == SnapshotStatus::Complete,
        &format!("query={:?}, {} of {}", query, store.received(), store.total()),
    );
    c.check("received equals total", store.received() == store.total(), "");

    store.set_sort(SortKey::Price);
    store.set_direction(SortDirection::Desc);
    let cheapest = store.view().first().map(|card| card.display_name());
    c.check("price sort", cheapest.is_some(), &format!("cheapest={:?}", cheapest));

    let goblins = store.facets().subtypes().get("Goblin").copied().unwrap_or(0);
    c.check("Goblin facet", goblins > 0, &format!("count={}", goblins));

    // ================================================================
    // 3. NO MATCHES
    // ================================================================
    section("Search: no matches");

    let status = sdk
        .search_into(&mut store, "name:\"zzzz no such card zzzz\"", SearchOptions::default())
        .await;
    c.check(
        "empty search is complete",
        status == SnapshotStatus::Complete && store.view().is_empty(),
        "",
    );

    // ================================================================
    // 4. PRINTINGS AND DECKS
    // ================================================================
    section("Printings and decks");

    let prints = sdk.cards().prints("Lightning Bolt").await.unwrap();
    c.check("Lightning Bolt printings", prints.len() > 1, &format!("{} printings", prints.len()));

    let mut decks = DeckBuilder::new();
    decks.create_deck("Burn", "modern", &[Color::R], "").unwrap();
    if let (Some(deck), Some(bolt)) = (decks.active_deck_mut(), prints.first()) {
        deck.add_card(bolt.clone(), 4);
    }
    let count = decks.active_deck().map(|d| d.card_count()).unwrap_or(0);
    c.check("deck holds four bolts", count == 4, "");

    let display = format!("{}", sdk);
    c.check("Display impl", display.contains("DeckBuilderSdk"), &format!("display={}", display));

    // ================================================================
    // SUMMARY
    // ================================================================
    section("SMOKE TEST COMPLETE");

    eprintln!("  Total:   {} checks", c.pass + c.fail);
    eprintln!("  Passed:  {}", c.pass);
    eprintln!("  Failed:  {}", c.fail);
    eprintln!();

    assert_eq!(c.fail, 0, "{} smoke test checks failed", c.fail);
}
