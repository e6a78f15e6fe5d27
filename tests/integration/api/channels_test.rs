//! Channel API integration tests
//!
//! Channels are ordered per category, with uncategorised channels forming
//! their own list.

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::database::{create_category, create_channel, create_test_server, id_of};

async fn channel_names(server: &TestServer, community_id: i64, category_id: Option<i64>) -> Vec<String> {
    let path = match category_id {
        Some(id) => format!("/communities/{community_id}/channels/?category_id={id}"),
        None => format!("/communities/{community_id}/channels/"),
    };
    server
        .get(&path)
        .await
        .json::<Vec<Value>>()
        .iter()
        .map(|c| c["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_each_category_is_its_own_list() {
    let server = create_test_server().await;
    let text = id_of(&create_category(&server, 1, "Text").await);
    let voice = id_of(&create_category(&server, 1, "Voice").await);

    let general = create_channel(&server, 1, Some(text), "general").await;
    let lounge = create_channel(&server, 1, Some(voice), "lounge").await;
    let loose = create_channel(&server, 1, None, "loose").await;

    assert_eq!(general["position"], 0);
    assert_eq!(lounge["position"], 0);
    assert_eq!(loose["position"], 0);
    assert_eq!(loose["category_id"], Value::Null);
    assert_eq!(general["kind"], "chat");

    assert_eq!(channel_names(&server, 1, Some(text)).await, vec!["general"]);
    assert_eq!(channel_names(&server, 1, Some(voice)).await, vec!["lounge"]);
    assert_eq!(channel_names(&server, 1, None).await, vec!["loose"]);
}

#[tokio::test]
async fn test_kind_defaults_to_posts() {
    let server = create_test_server().await;
    let response = server
        .post("/communities/1/channels/")
        .json(&json!({ "name": "news" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["kind"], "posts");
}

#[tokio::test]
async fn test_create_in_foreign_category_is_404() {
    let server = create_test_server().await;
    let foreign = id_of(&create_category(&server, 2, "Elsewhere").await);

    let response = server
        .post("/communities/1/channels/")
        .json(&json!({ "name": "general", "category_id": foreign }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(channel_names(&server, 1, None).await.is_empty());
}

#[tokio::test]
async fn test_move_into_another_category() {
    let server = create_test_server().await;
    let text = id_of(&create_category(&server, 1, "Text").await);
    let voice = id_of(&create_category(&server, 1, "Voice").await);

    let general = create_channel(&server, 1, Some(text), "general").await;
    let random = create_channel(&server, 1, Some(text), "random").await;
    let lounge = create_channel(&server, 1, Some(voice), "lounge").await;

    let response = server
        .put(&format!("/communities/1/channels/{}/position/", id_of(&random)))
        .json(&json!({ "category_id": voice, "before_id": id_of(&lounge) }))
        .await;
    response.assert_status_ok();
    let moved: Value = response.json();
    assert_eq!(moved["category_id"], voice);
    assert_eq!(moved["position"], -4096);

    assert_eq!(channel_names(&server, 1, Some(text)).await, vec!["general"]);
    assert_eq!(channel_names(&server, 1, Some(voice)).await, vec!["random", "lounge"]);

    // The source list keeps its positions
    let remaining: Vec<Value> = server
        .get(&format!("/communities/1/channels/?category_id={text}"))
        .await
        .json();
    assert_eq!(remaining[0]["id"], general["id"]);
    assert_eq!(remaining[0]["position"], 0);
}

#[tokio::test]
async fn test_move_into_empty_category() {
    let server = create_test_server().await;
    let text = id_of(&create_category(&server, 1, "Text").await);
    let empty = id_of(&create_category(&server, 1, "Empty").await);
    let general = create_channel(&server, 1, Some(text), "general").await;

    let response = server
        .put(&format!("/communities/1/channels/{}/position/", id_of(&general)))
        .json(&json!({ "category_id": empty }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["position"], 0);
    assert_eq!(channel_names(&server, 1, Some(empty)).await, vec!["general"]);
}

#[tokio::test]
async fn test_neighbour_in_other_category_conflicts() {
    let server = create_test_server().await;
    let text = id_of(&create_category(&server, 1, "Text").await);
    let voice = id_of(&create_category(&server, 1, "Voice").await);
    let general = create_channel(&server, 1, Some(text), "general").await;
    let lounge = create_channel(&server, 1, Some(voice), "lounge").await;
    create_channel(&server, 1, Some(text), "random").await;

    // Target list is `text`, but the neighbour lives in `voice`
    let response = server
        .put(&format!("/communities/1/channels/{}/position/", id_of(&general)))
        .json(&json!({ "category_id": text, "after_id": id_of(&lounge) }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("different list"));
}

#[tokio::test]
async fn test_move_into_foreign_category_is_404() {
    let server = create_test_server().await;
    let foreign = id_of(&create_category(&server, 2, "Elsewhere").await);
    let general = create_channel(&server, 1, None, "general").await;

    server
        .put(&format!("/communities/1/channels/{}/position/", id_of(&general)))
        .json(&json!({ "category_id": foreign }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reindex_one_category() {
    let server = create_test_server().await;
    let text = id_of(&create_category(&server, 1, "Text").await);
    for (name, position) in [("b", 77), ("a", -3)] {
        server
            .post("/communities/1/channels/")
            .json(&json!({ "name": name, "category_id": text, "position": position }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    let loose = create_channel(&server, 1, None, "loose").await;
    let loose_after = create_channel(&server, 1, None, "loose-after").await;

    server
        .put(&format!("/communities/1/channels/positions/?category_id={text}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let positions: Vec<i64> = server
        .get(&format!("/communities/1/channels/?category_id={text}"))
        .await
        .json::<Vec<Value>>()
        .iter()
        .map(|c| c["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![0, 4096]);
    assert_eq!(channel_names(&server, 1, Some(text)).await, vec!["a", "b"]);

    // Uncategorised list untouched
    assert_eq!(loose["position"], 0);
    assert_eq!(loose_after["position"], 4096);
}

#[tokio::test]
async fn test_taken_position_is_per_category() {
    let server = create_test_server().await;
    let text = id_of(&create_category(&server, 1, "Text").await);
    create_channel(&server, 1, Some(text), "general").await;

    server
        .post("/communities/1/channels/")
        .json(&json!({ "name": "dup", "category_id": text, "position": 0 }))
        .await
        .assert_status(StatusCode::CONFLICT);

    // Position 0 is free in the uncategorised list
    let loose = server
        .post("/communities/1/channels/")
        .json(&json!({ "name": "loose", "position": 0 }))
        .await;
    loose.assert_status(StatusCode::CREATED);
    assert_eq!(channel_names(&server, 1, Some(text)).await, vec!["general"]);
}

#[tokio::test]
async fn test_deleting_category_removes_its_channels() {
    let server = create_test_server().await;
    let text = id_of(&create_category(&server, 1, "Text").await);
    let general = create_channel(&server, 1, Some(text), "general").await;

    server
        .delete(&format!("/communities/1/categories/{text}/"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete(&format!("/communities/1/channels/{}/", id_of(&general)))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_channel() {
    let server = create_test_server().await;
    let general = create_channel(&server, 1, None, "general").await;
    create_channel(&server, 1, None, "random").await;

    server
        .delete(&format!("/communities/1/channels/{}/", id_of(&general)))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(channel_names(&server, 1, None).await, vec!["random"]);
}
