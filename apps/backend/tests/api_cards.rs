//! Card API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use common::fixtures;
use common::TestContext;
use stepcards_core::{Card, CardState};

/// Test creating a card returns a new, never-reviewed card.
#[tokio::test]
async fn test_create_card() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/cards")
        .json(&fixtures::create_card_request("la mesa", "the table"))
        .await;

    response.assert_status_ok();
    let card: Card = response.json();
    assert_eq!(card.front, "la mesa");
    assert_eq!(card.state, CardState::New);
    assert_eq!(card.iteration, 0);
    assert!(card.next_review.is_none());
    assert_eq!(ctx.stored(&card), Some(card));
}

/// Test a card with an empty front is rejected.
#[tokio::test]
async fn test_create_card_requires_front() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/cards")
        .json(&fixtures::create_card_request("   ", "back"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

/// Test listing cards keeps creation order.
#[tokio::test]
async fn test_list_cards() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for front in ["uno", "dos", "tres"] {
        server
            .post("/api/cards")
            .json(&fixtures::create_card_request(front, "n"))
            .await
            .assert_status_ok();
    }

    let response = server.get("/api/cards").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let fronts: Vec<&str> = body["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["front"].as_str().unwrap())
        .collect();
    assert_eq!(fronts, vec!["uno", "dos", "tres"]);
}

/// Test fetching an unknown card returns not found.
#[tokio::test]
async fn test_get_card_not_found() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get(&format!("/api/cards/{}", Uuid::new_v4())).await;

    response.assert_status(StatusCode::NOT_FOUND);
}

/// Test editing text leaves the scheduling state alone.
#[tokio::test]
async fn test_update_card_keeps_schedule() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let card = ctx.seed(fixtures::review_card(8, 2.2));

    let response = server
        .patch(&format!("/api/cards/{}", card.id))
        .json(&json!({ "back": "Paris, France" }))
        .await;

    response.assert_status_ok();
    let updated: Card = response.json();
    assert_eq!(updated.back, "Paris, France");
    assert_eq!(updated.front, card.front);
    assert_eq!(updated.state, card.state);
    assert_eq!(updated.ease_factor, card.ease_factor);
    assert_eq!(updated.next_review, card.next_review);
}

/// Test deleting a card reports whether it existed.
#[tokio::test]
async fn test_delete_card() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let card = ctx.seed(Card::new("q", "a"));

    let response = server.delete(&format!("/api/cards/{}", card.id)).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["deleted"], true);
    assert_eq!(ctx.stored(&card), None);

    let response = server.delete(&format!("/api/cards/{}", card.id)).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["deleted"], false);
}
