//! Integration tests for the discovery controller.
//!
//! Tests deck loading, the cursor under swipes, prefetch near exhaustion,
//! match surfacing and error recovery.

mod common;

use common::{Harness, body_json, error_json, harness, match_json, page_json};
use serde_json::json;
use zoekdeware::DiscoveryController;
use zoekdeware::api::HttpMethod;
use zoekdeware::config::DiscoverySettings;
use zoekdeware::models::SwipeDirection;

const DISCOVER: &str = "/discover?limit=10";

fn ids(controller: &DiscoveryController) -> Vec<String> {
    controller
        .state()
        .profiles
        .iter()
        .map(|p| p.id.clone())
        .collect()
}

async fn loaded(h: &Harness, deck: &[&str]) -> DiscoveryController {
    h.transport
        .respond(HttpMethod::Get, DISCOVER, 200, page_json(deck));
    let controller = DiscoveryController::new(h.api.clone());
    controller.load_profiles().await;
    controller
}

fn no_match(h: &Harness) {
    h.transport
        .respond(HttpMethod::Post, "/swipe", 200, json!({"match": null}));
}

// ============================================================================
// Loading Tests
// ============================================================================

#[tokio::test]
async fn test_load_replaces_deck_and_resets_cursor() {
    let h = harness();
    let controller = loaded(&h, &["a", "b", "c", "d", "e"]).await;

    let state = controller.state();
    assert_eq!(ids(&controller), ["a", "b", "c", "d", "e"]);
    assert_eq!(state.cursor, 0);
    assert!(!state.is_loading);
    assert_eq!(controller.current_profile().unwrap().id, "a");
}

#[tokio::test]
async fn test_page_size_is_configurable() {
    let h = harness();
    h.transport
        .respond(HttpMethod::Get, "/discover?limit=5", 200, page_json(&["a"]));
    let controller = DiscoveryController::with_settings(
        h.api.clone(),
        DiscoverySettings {
            page_size: 5,
            prefetch_threshold: 2,
        },
    );

    controller.load_profiles().await;

    assert_eq!(h.transport.count(HttpMethod::Get, "/discover?limit=5"), 1);
    assert_eq!(ids(&controller), ["a"]);
}

#[tokio::test]
async fn test_overlapping_load_is_suppressed() {
    let h = harness();
    h.transport
        .respond(HttpMethod::Get, DISCOVER, 200, page_json(&["a", "b", "c"]));
    let gate = h.transport.gate(HttpMethod::Get, DISCOVER);
    let controller = DiscoveryController::new(h.api.clone());
    let mut rx = controller.subscribe();

    let first = tokio::spawn({
        let controller = controller.clone();
        async move { controller.load_profiles().await }
    });
    rx.wait_for(|s| s.is_loading).await.unwrap();

    controller.load_profiles().await;
    assert_eq!(h.transport.count(HttpMethod::Get, DISCOVER), 1);

    gate.notify_one();
    first.await.unwrap();
    assert_eq!(ids(&controller), ["a", "b", "c"]);
}

#[tokio::test]
async fn test_failed_load_keeps_previous_deck() {
    let h = harness();
    let controller = loaded(&h, &["a", "b", "c", "d"]).await;
    h.transport
        .respond(HttpMethod::Get, DISCOVER, 503, error_json("maintenance"));

    controller.load_profiles().await;

    let state = controller.state();
    assert_eq!(ids(&controller), ["a", "b", "c", "d"]);
    assert_eq!(state.error.as_deref(), Some("maintenance"));
    assert!(!state.is_loading);
}

// ============================================================================
// Swipe Tests
// ============================================================================

#[tokio::test]
async fn test_swipe_without_match_advances_to_next_card() {
    let h = harness();
    let controller = loaded(&h, &["a", "b", "c"]).await;
    no_match(&h);
    // Remaining drops to 2, so hold the prefetch to observe the swipe alone
    let gate = h.transport.gate(HttpMethod::Get, DISCOVER);
    h.transport
        .respond(HttpMethod::Get, DISCOVER, 200, page_json(&["x"]));

    controller.swipe(SwipeDirection::Like).await;

    let state = controller.state();
    assert_eq!(state.cursor, 1);
    assert!(state.pending_match.is_none());
    assert_eq!(state.current_profile().unwrap().id, "b");

    let swipe = h
        .transport
        .requests()
        .into_iter()
        .find(|r| r.method == HttpMethod::Post)
        .unwrap();
    assert_eq!(
        body_json(&swipe),
        Some(json!({"swiped_id": "a", "direction": "like"}))
    );
    gate.notify_one();
}

#[tokio::test]
async fn test_swipes_above_threshold_do_not_prefetch() {
    let h = harness();
    let controller = loaded(&h, &["a", "b", "c", "d", "e", "f"]).await;

    for _ in 0..3 {
        no_match(&h);
        controller.swipe(SwipeDirection::Pass).await;
    }

    let state = controller.state();
    assert_eq!(state.cursor, 3);
    assert!(!state.is_loading);
    assert_eq!(ids(&controller), ["a", "b", "c", "d", "e", "f"]);
    assert_eq!(h.transport.count(HttpMethod::Get, DISCOVER), 1);
}

#[tokio::test]
async fn test_prefetch_runs_alongside_cursor_advance() {
    let h = harness();
    let controller = loaded(&h, &["a", "b"]).await;
    no_match(&h);
    h.transport
        .respond(HttpMethod::Get, DISCOVER, 200, page_json(&["c", "d", "e"]));
    let gate = h.transport.gate(HttpMethod::Get, DISCOVER);
    let mut rx = controller.subscribe();

    controller.swipe(SwipeDirection::Pass).await;

    // Swipe returned while the next page is still held
    let state = controller.state();
    assert_eq!(state.cursor, 1);
    assert!(state.is_loading);
    assert_eq!(controller.current_profile().unwrap().id, "b");

    gate.notify_one();
    rx.wait_for(|s| !s.is_loading).await.unwrap();

    let state = controller.state();
    assert_eq!(ids(&controller), ["c", "d", "e"]);
    assert_eq!(state.cursor, 0);
    assert_eq!(h.transport.count(HttpMethod::Get, DISCOVER), 2);
}

#[tokio::test]
async fn test_swipe_error_leaves_card_for_retry() {
    let h = harness();
    let controller = loaded(&h, &["a", "b", "c", "d"]).await;
    h.transport
        .respond(HttpMethod::Post, "/swipe", 500, error_json("try again"));

    controller.swipe(SwipeDirection::Like).await;

    let state = controller.state();
    assert_eq!(state.cursor, 0);
    assert_eq!(ids(&controller), ["a", "b", "c", "d"]);
    assert_eq!(state.error.as_deref(), Some("try again"));

    no_match(&h);
    controller.swipe(SwipeDirection::Like).await;

    let state = controller.state();
    assert_eq!(state.cursor, 1);
    assert!(state.error.is_none());
    let swiped: Vec<_> = h
        .transport
        .requests()
        .iter()
        .filter(|r| r.method == HttpMethod::Post)
        .filter_map(body_json)
        .map(|body| body["swiped_id"].clone())
        .collect();
    assert_eq!(swiped, [json!("a"), json!("a")]);
}

#[tokio::test]
async fn test_match_is_surfaced_and_dismissed_locally() {
    let h = harness();
    let controller = loaded(&h, &["a", "b", "c", "d"]).await;
    h.transport.respond(
        HttpMethod::Post,
        "/swipe",
        200,
        json!({"match": match_json("m1", "a")}),
    );

    controller.swipe(SwipeDirection::SuperLike).await;

    let pending = controller.state().pending_match.unwrap();
    assert_eq!(pending.id, "m1");
    assert_eq!(pending.member_id, "a");
    assert_eq!(controller.state().cursor, 1);

    let calls = h.transport.requests().len();
    controller.dismiss_match();
    assert!(controller.state().pending_match.is_none());
    assert_eq!(h.transport.requests().len(), calls);
}

#[tokio::test]
async fn test_swiping_past_end_is_empty_state() {
    let h = harness();
    let controller = loaded(&h, &["a"]).await;
    no_match(&h);
    // Refill comes back empty
    h.transport
        .respond(HttpMethod::Get, DISCOVER, 200, page_json(&[]));
    let mut rx = controller.subscribe();

    controller.swipe(SwipeDirection::Pass).await;
    rx.wait_for(|s| !s.is_loading).await.unwrap();

    let state = controller.state();
    assert!(state.current_profile().is_none());
    assert!(state.error.is_none());

    let calls = h.transport.requests().len();
    controller.swipe(SwipeDirection::Like).await;
    assert_eq!(h.transport.requests().len(), calls);
    assert!(controller.state().error.is_none());
}

// ============================================================================
// Matches Tests
// ============================================================================

#[tokio::test]
async fn test_load_matches_replaces_list() {
    let h = harness();
    h.transport.respond(
        HttpMethod::Get,
        "/matches",
        200,
        json!({"matches": [match_json("m1", "u1"), match_json("m2", "u2")]}),
    );
    let controller = DiscoveryController::new(h.api.clone());

    controller.load_matches().await;

    let state = controller.state();
    assert_eq!(state.matches.len(), 2);
    assert_eq!(state.matches[1].member_id, "u2");
    assert!(!state.is_loading_matches);
}

#[tokio::test]
async fn test_load_matches_failure_keeps_list() {
    let h = harness();
    h.transport.respond(
        HttpMethod::Get,
        "/matches",
        200,
        json!({"matches": [match_json("m1", "u1")]}),
    );
    h.transport.fail(HttpMethod::Get, "/matches");
    let controller = DiscoveryController::new(h.api.clone());

    controller.load_matches().await;
    controller.load_matches().await;

    let state = controller.state();
    assert_eq!(state.matches.len(), 1);
    assert!(state.error.is_some());
}
