//! Concurrent writers on a file database
//!
//! With more than one pooled connection, reorders of different lists run at
//! the same time and must queue on SQLite's write lock rather than fail.

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::database::{category_positions, create_file_test_server, id_of};

async fn fill_and_reorder(server: &TestServer, community_id: i64) -> StatusCode {
    let mut ids = Vec::new();
    for n in 0..6 {
        let response = server
            .post(&format!("/communities/{community_id}/categories/"))
            .json(&json!({ "name": format!("c{n}") }))
            .await;
        if response.status_code() != StatusCode::CREATED {
            return response.status_code();
        }
        ids.push(id_of(&response.json::<Value>()));
    }

    // Repeatedly move the last category to the front
    for _ in 0..6 {
        let last = ids.pop().unwrap_or_default();
        let response = server
            .put(&format!("/communities/{community_id}/categories/{last}/position/"))
            .json(&json!({ "before_id": ids[0] }))
            .await;
        if response.status_code() != StatusCode::OK {
            return response.status_code();
        }
        ids.insert(0, last);
    }
    StatusCode::OK
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_writers_in_different_lists_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let server = create_file_test_server(&dir, 4).await;

    let (a, b, c, d) = tokio::join!(
        fill_and_reorder(&server, 1),
        fill_and_reorder(&server, 2),
        fill_and_reorder(&server, 3),
        fill_and_reorder(&server, 4),
    );
    assert_eq!([a, b, c, d], [StatusCode::OK; 4]);

    for community_id in 1..=4 {
        crate::assert_strictly_ordered!(category_positions(&server, community_id).await);
        assert_eq!(category_positions(&server, community_id).await.len(), 6);
    }
}
