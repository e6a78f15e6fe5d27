//! Category API integration tests
//!
//! Creation, validated moves, reindexing and deletion over HTTP.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::database::{
    category_names, category_positions, create_category, create_test_server, id_of,
};

#[tokio::test]
async fn test_health() {
    let server = create_test_server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let server = create_test_server().await;
    let response = server.get("/nowhere").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["status"], 404);
}

#[tokio::test]
async fn test_first_category_lands_at_zero() {
    let server = create_test_server().await;
    let category = create_category(&server, 1, "General").await;
    assert_eq!(category["position"], 0);
    assert_eq!(category["community_id"], 1);
}

#[tokio::test]
async fn test_categories_append_with_spacing() {
    let server = create_test_server().await;
    for name in ["a", "b", "c", "d"] {
        create_category(&server, 1, name).await;
    }
    assert_eq!(category_positions(&server, 1).await, vec![0, 4096, 8192, 12288]);
}

#[tokio::test]
async fn test_communities_are_separate_lists() {
    let server = create_test_server().await;
    create_category(&server, 1, "a").await;
    create_category(&server, 1, "b").await;
    let other = create_category(&server, 2, "x").await;

    assert_eq!(other["position"], 0);
    assert_eq!(category_names(&server, 1).await, vec!["a", "b"]);
    assert_eq!(category_names(&server, 2).await, vec!["x"]);
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let server = create_test_server().await;
    let response = server
        .post("/communities/1/categories/")
        .json(&json!({ "name": "   " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_taken_position() {
    let server = create_test_server().await;
    create_category(&server, 1, "a").await;

    let response = server
        .post("/communities/1/categories/")
        .json(&json!({ "name": "b", "position": 0 }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        "position 0 is already taken in the target list"
    );
    assert_eq!(category_names(&server, 1).await, vec!["a"]);
}

#[tokio::test]
async fn test_create_rejects_position_out_of_bounds() {
    let server = create_test_server().await;

    for position in [10_000_000_000_i64, i64::MAX, -2_048_001] {
        server
            .post("/communities/1/categories/")
            .json(&json!({ "name": "far", "position": position }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }
    assert!(category_names(&server, 1).await.is_empty());

    // Appending still works normally afterwards
    let appended = create_category(&server, 1, "a").await;
    assert_eq!(appended["position"], 0);
}

#[tokio::test]
async fn test_move_between_adjacent_neighbours() {
    let server = create_test_server().await;
    let a = create_category(&server, 1, "a").await;
    let b = create_category(&server, 1, "b").await;
    let c = create_category(&server, 1, "c").await;

    let response = server
        .put(&format!("/communities/1/categories/{}/position/", id_of(&c)))
        .json(&json!({ "after_id": id_of(&a), "before_id": id_of(&b) }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["position"], 2048);
    assert_eq!(category_names(&server, 1).await, vec!["a", "c", "b"]);
}

#[tokio::test]
async fn test_move_to_front_and_back() {
    let server = create_test_server().await;
    let a = create_category(&server, 1, "a").await;
    let b = create_category(&server, 1, "b").await;
    let c = create_category(&server, 1, "c").await;

    server
        .put(&format!("/communities/1/categories/{}/position/", id_of(&c)))
        .json(&json!({ "before_id": id_of(&a) }))
        .await
        .assert_status_ok();
    assert_eq!(category_names(&server, 1).await, vec!["c", "a", "b"]);

    server
        .put(&format!("/communities/1/categories/{}/position/", id_of(&a)))
        .json(&json!({ "after_id": id_of(&b) }))
        .await
        .assert_status_ok();
    assert_eq!(category_names(&server, 1).await, vec!["c", "b", "a"]);
    crate::assert_strictly_ordered!(category_positions(&server, 1).await);
}

#[tokio::test]
async fn test_exhausted_gap_reindexes_the_list() {
    let server = create_test_server().await;
    for (name, position) in [("low", 5), ("high", 6)] {
        server
            .post("/communities/1/categories/")
            .json(&json!({ "name": name, "position": position }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    let moved = create_category(&server, 1, "moved").await;
    let ids: Vec<i64> = server
        .get("/communities/1/categories/")
        .await
        .json::<Vec<Value>>()
        .iter()
        .map(id_of)
        .collect();

    let response = server
        .put(&format!("/communities/1/categories/{}/position/", id_of(&moved)))
        .json(&json!({ "after_id": ids[0], "before_id": ids[1] }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["position"], 4096);

    assert_eq!(category_names(&server, 1).await, vec!["low", "moved", "high"]);
    assert_eq!(category_positions(&server, 1).await, vec![0, 4096, 8192]);
}

#[tokio::test]
async fn test_stale_neighbours_conflict_without_writes() {
    let server = create_test_server().await;
    let a = create_category(&server, 1, "a").await;
    create_category(&server, 1, "b").await;
    let c = create_category(&server, 1, "c").await;
    let d = create_category(&server, 1, "d").await;
    let before = category_positions(&server, 1).await;

    let response = server
        .put(&format!("/communities/1/categories/{}/position/", id_of(&d)))
        .json(&json!({ "after_id": id_of(&a), "before_id": id_of(&c) }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["status"], 409);
    assert!(body["error"].as_str().unwrap().contains("not adjacent"));

    assert_eq!(category_positions(&server, 1).await, before);
}

#[tokio::test]
async fn test_move_without_neighbours_into_non_empty_list_conflicts() {
    let server = create_test_server().await;
    let a = create_category(&server, 1, "a").await;
    create_category(&server, 1, "b").await;

    let response = server
        .put(&format!("/communities/1/categories/{}/position/", id_of(&a)))
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("not empty"));
}

#[tokio::test]
async fn test_neighbour_from_other_community_conflicts() {
    let server = create_test_server().await;
    let a = create_category(&server, 1, "a").await;
    let foreign = create_category(&server, 2, "x").await;

    let response = server
        .put(&format!("/communities/1/categories/{}/position/", id_of(&a)))
        .json(&json!({ "after_id": id_of(&foreign) }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_move_unknown_category_is_404() {
    let server = create_test_server().await;
    create_category(&server, 1, "a").await;

    let response = server
        .put("/communities/1/categories/999/position/")
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "category 999 not found");
}

#[tokio::test]
async fn test_reindex_respaces_the_list() {
    let server = create_test_server().await;
    for (name, position) in [("a", -7), ("b", 3), ("c", 1_000_000)] {
        server
            .post("/communities/1/categories/")
            .json(&json!({ "name": name, "position": position }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    server
        .put("/communities/1/categories/positions/")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(category_names(&server, 1).await, vec!["a", "b", "c"]);
    assert_eq!(category_positions(&server, 1).await, vec![0, 4096, 8192]);
}

#[tokio::test]
async fn test_delete_keeps_remaining_positions() {
    let server = create_test_server().await;
    create_category(&server, 1, "a").await;
    let b = create_category(&server, 1, "b").await;
    create_category(&server, 1, "c").await;

    server
        .delete(&format!("/communities/1/categories/{}/", id_of(&b)))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(category_positions(&server, 1).await, vec![0, 8192]);

    server
        .delete(&format!("/communities/1/categories/{}/", id_of(&b)))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_is_scoped_to_community() {
    let server = create_test_server().await;
    let a = create_category(&server, 1, "a").await;

    server
        .delete(&format!("/communities/2/categories/{}/", id_of(&a)))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(category_names(&server, 1).await, vec!["a"]);
}
