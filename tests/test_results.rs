//! Result store: facets, secondary filters and client-side sorting.

mod common;

use mtg_deckbuilder::results::{FacetCategory, FilterKey, SortDirection, SortKey};
use mtg_deckbuilder::{CardRecord, ResultStore, SearchOptions, SearchSnapshot, SnapshotStatus};

fn load(store: &mut ResultStore, records: Vec<CardRecord>) {
    let request = store.begin_search("test", SearchOptions::default());
    let total = records.len();
    let accepted = store.ingest(SearchSnapshot {
        search_id: request.id,
        query: request.query,
        records,
        received: total,
        total,
        status: SnapshotStatus::Complete,
    });
    assert!(accepted);
}

fn sample() -> Vec<CardRecord> {
    vec![
        common::record(common::card_json("1", "Goblin Guide", "Creature — Goblin", &["R"], Some("1.50"))),
        common::record(common::card_json("2", "Brainstorm", "Instant", &["U"], Some("0.75"))),
        common::record(common::card_json("3", "Solemn Simulacrum", "Artifact Creature — Construct", &[], None)),
        common::record(common::card_json("4", "anger", "Creature — Incarnation", &["R"], Some("3.00"))),
    ]
}

fn names(store: &ResultStore) -> Vec<String> {
    store.view().iter().map(|c| c.name.clone()).collect()
}

// ---------------------------------------------------------------------------
// Facets
// ---------------------------------------------------------------------------

#[test]
fn facets_split_types_and_subtypes() {
    let mut store = ResultStore::new();
    load(&mut store, sample()[..3].to_vec());

    let types: Vec<&String> = store.facets().types().keys().collect();
    assert_eq!(types, vec!["Artifact", "Creature", "Instant"]);
    let subtypes: Vec<&String> = store.facets().subtypes().keys().collect();
    assert_eq!(subtypes, vec!["Construct", "Goblin"]);

    assert_eq!(store.facets().types()["Creature"], 2);
    assert_eq!(store.facets().colors()["R"], 1);
    assert_eq!(store.facets().legalities()["commander"], 3);
    assert!(!store.facets().legalities().contains_key("modern"));
}

#[test]
fn facet_counts_match_what_including_them_leaves() {
    let mut store = ResultStore::new();
    load(&mut store, sample());

    for key in store.facets().keys() {
        let expected = store.facets().category(key.category)[&key.value];
        let mut probe = ResultStore::new();
        load(&mut probe, sample());
        probe.include(key.clone());
        assert_eq!(probe.view_len(), expected, "facet {}", key);
    }
}

// ---------------------------------------------------------------------------
// Secondary filters
// ---------------------------------------------------------------------------

#[test]
fn no_filters_is_the_identity() {
    let mut store = ResultStore::new();
    load(&mut store, sample());
    store.set_sort(SortKey::Name);
    let mut expected: Vec<&CardRecord> = store.records().iter().collect();
    expected.sort_by_key(|c| c.name.to_lowercase());
    assert_eq!(store.view(), expected);
    assert!(store.filters().is_empty());
}

#[test]
fn include_and_exclude_compose() {
    let mut store = ResultStore::new();
    load(&mut store, sample());

    store.include(FilterKey::new(FacetCategory::Types, "Creature"));
    assert_eq!(names(&store), vec!["anger", "Goblin Guide", "Solemn Simulacrum"]);

    store.exclude("subtypes:Goblin".parse().unwrap());
    assert_eq!(names(&store), vec!["anger", "Solemn Simulacrum"]);

    store.remove_filter(&FilterKey::new(FacetCategory::Types, "Creature"));
    assert_eq!(names(&store), vec!["anger", "Brainstorm", "Solemn Simulacrum"]);

    store.clear_filters();
    assert_eq!(store.view_len(), 4);
}

#[test]
fn filters_survive_new_snapshots() {
    let mut store = ResultStore::new();
    store.include("colors:U".parse().unwrap());
    load(&mut store, sample());
    assert_eq!(names(&store), vec!["Brainstorm"]);
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[test]
fn toggling_direction_twice_restores_name_order() {
    let mut store = ResultStore::new();
    load(&mut store, sample());
    store.set_sort(SortKey::Name);
    let original = names(&store);

    assert_eq!(store.toggle_direction(), SortDirection::Desc);
    let reversed = names(&store);
    assert_eq!(reversed, original.iter().rev().cloned().collect::<Vec<_>>());

    store.toggle_direction();
    assert_eq!(names(&store), original);
}

#[test]
fn price_sort_puts_unpriced_last() {
    let mut store = ResultStore::new();
    load(&mut store, sample());
    store.set_sort(SortKey::Price);
    assert_eq!(
        names(&store),
        vec!["anger", "Goblin Guide", "Brainstorm", "Solemn Simulacrum"]
    );
    store.set_direction(SortDirection::Desc);
    assert_eq!(
        names(&store),
        vec!["Brainstorm", "Goblin Guide", "anger", "Solemn Simulacrum"]
    );
}

#[test]
fn color_identity_sort_puts_colorless_first() {
    let mut store = ResultStore::new();
    load(&mut store, sample());
    store.set_sort(SortKey::ColorIdentity);
    let view = names(&store);
    assert_eq!(view[0], "Solemn Simulacrum");
    assert_eq!(view[1], "Brainstorm");
}
