//! End-to-end engine flow behind the ask endpoint, minus the LLM.
//!
//! Since `planscout-server` is a binary crate (no lib.rs), these tests
//! exercise the same path the handler takes: an assistant JSON payload is
//! parsed leniently, merged into the session filter state, and re-matched
//! against the catalog.

use planscout_catalog::{matching_plans, AssistantFilterPayload, Facets, FilterState, Selector};
use planscout_core::Plan;
use serde_json::json;

fn sample_catalog() -> Vec<Plan> {
    serde_json::from_value(json!([
        {"id": 1, "provider": "Aegis Health", "type": "Health", "price": 120,
         "coverage": "Hospital and outpatient", "region": "Europe", "rating": 4.5,
         "term": "1 year", "benefits": ["Dental", "Vision"], "cashback": 25},
        {"id": 2, "provider": "Budget Auto", "type": "Auto", "price": 45,
         "coverage": "Third-party liability", "region": "Asia", "rating": 3.2,
         "term": "6 months", "benefits": ["Roadside Assistance"]},
        {"id": 3, "provider": "Metro Life", "type": "Life", "price": 80,
         "coverage": "Term life", "region": "Global", "rating": 4.0,
         "term": "2 years", "benefits": [], "cashback": 0},
        {"id": 4, "provider": "EuroCare Plus", "type": "Health", "price": 210,
         "coverage": "Full coverage incl. specialists", "region": "Europe", "rating": 4.8,
         "term": "1 year", "benefits": ["Dental", "Vision", "24/7 Support"], "cashback": 40}
    ]))
    .unwrap()
}

fn session_state(catalog: &[Plan]) -> FilterState {
    FilterState::unrestricted(Facets::from_plans(catalog).price_bounds)
}

#[test]
fn question_payload_narrows_the_catalog() {
    let catalog = sample_catalog();
    let state = session_state(&catalog);

    // What the interpreter would hand back for "health plans in Europe
    // with dental, 4 stars or better".
    let payload = AssistantFilterPayload::from_value(json!({
        "type": "Health",
        "region": "Europe",
        "minRating": 4,
        "benefits": ["Dental"]
    }));

    let merged = state.merged(&payload);
    let ids: Vec<u64> = matching_plans(&catalog, &merged).iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[test]
fn price_phrase_from_the_assistant_is_applied_exactly() {
    let catalog = sample_catalog();
    let state = session_state(&catalog);

    let payload = AssistantFilterPayload::from_value(json!({"priceRange": "$100 - $300"}));
    let merged = state.merged(&payload);
    assert_eq!(merged.price_range, (100.0, 300.0));

    let ids: Vec<u64> = matching_plans(&catalog, &merged).iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[test]
fn cashback_only_excludes_zero_and_absent_cashback() {
    let catalog = sample_catalog();
    let state = session_state(&catalog);

    let payload = AssistantFilterPayload::from_value(json!({"cashbackOnly": true}));
    let merged = state.merged(&payload);

    let ids: Vec<u64> = matching_plans(&catalog, &merged).iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[test]
fn malformed_payload_fields_do_not_disturb_the_session() {
    let catalog = sample_catalog();
    let mut state = session_state(&catalog);
    state.plan_type = Selector::Only("Health".into());

    // region is usable, everything else is junk.
    let payload = AssistantFilterPayload::from_value(json!({
        "region": "Europe",
        "minRating": "lots",
        "priceRange": 250,
        "benefits": {"Dental": true}
    }));

    let before = state.clone();
    let merged = state.merged(&payload);

    assert_eq!(merged.region, Selector::Only("Europe".into()));
    assert_eq!(merged.plan_type, before.plan_type);
    assert_eq!(merged.min_rating, before.min_rating);
    assert_eq!(merged.price_range, before.price_range);
    assert_eq!(merged.benefits, before.benefits);
}

#[test]
fn successive_questions_accumulate() {
    let catalog = sample_catalog();
    let state = session_state(&catalog);

    let first = AssistantFilterPayload::from_value(json!({"type": "Health"}));
    let second = AssistantFilterPayload::from_value(json!({"minRating": 4.6}));

    let merged = state.merged(&first).merged(&second);
    assert_eq!(merged.plan_type, Selector::Only("Health".into()));
    assert_eq!(merged.min_rating, 4.6);

    let ids: Vec<u64> = matching_plans(&catalog, &merged).iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![4]);
}

#[test]
fn empty_catalog_session_never_panics() {
    let catalog: Vec<Plan> = Vec::new();
    let facets = Facets::from_plans(&catalog);
    assert_eq!(facets.price_bounds, None);

    let state = FilterState::unrestricted(facets.price_bounds);
    let payload = AssistantFilterPayload::from_value(json!({
        "type": "Health",
        "priceRange": "$100 - $300"
    }));
    let merged = state.merged(&payload);
    assert!(matching_plans(&catalog, &merged).is_empty());
}

// ── Wire contract ─────────────────────────────────────────────────
// The ask endpoint's request/response shapes, mirrored the way the web UI
// sends them.

#[test]
fn filter_state_round_trips_through_the_ui_shape() {
    let wire = json!({
        "type": "Health",
        "region": "All",
        "term": "1 year",
        "priceRange": [100.0, 300.0],
        "minRating": 4.0,
        "benefits": ["Dental"],
        "cashbackOnly": false
    });

    let state: FilterState = serde_json::from_value(wire.clone()).unwrap();
    assert_eq!(state.plan_type, Selector::Only("Health".into()));
    assert_eq!(state.region, Selector::All);
    assert_eq!(serde_json::to_value(&state).unwrap(), wire);
}

#[test]
fn applied_payload_echo_contains_only_surviving_fields() {
    let payload = AssistantFilterPayload::from_value(json!({
        "type": "Health",
        "minRating": "oops"
    }));

    let echoed = serde_json::to_value(&payload).unwrap();
    assert_eq!(echoed, json!({"type": "Health"}));
}
