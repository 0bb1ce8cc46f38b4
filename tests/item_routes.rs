use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

use todo_server::{db::item_repo, routes::router, state::AppState, test_helpers::test_state};

async fn send(
    state: &std::sync::Arc<AppState>,
    request: Request<Body>,
) -> axum::response::Response {
    router(state.clone()).oneshot(request).await.unwrap()
}

async fn json_response(
    state: &std::sync::Arc<AppState>,
    request: Request<Body>,
) -> (StatusCode, serde_json::Value) {
    let response = send(state, request).await;
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create_list(state: &std::sync::Arc<AppState>, title: &str) -> i64 {
    let (status, created) = json_response(
        state,
        json_request("POST", "/lists", json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    created["id"].as_i64().unwrap()
}

#[tokio::test]
async fn item_crud_flow() {
    let state = test_state().await;
    let list_id = create_list(&state, "Errands").await;

    let (status, item) = json_response(
        &state,
        json_request(
            "POST",
            &format!("/lists/{list_id}/items"),
            json!({
                "title": "Post office",
                "description": "send the parcel",
                "due_at": "2026-09-01T12:00:00+00:00"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["todo_list_id"].as_i64(), Some(list_id));
    assert_eq!(item["status_code"].as_str(), Some("NOT_COMPLETED"));
    assert!(item["due_at"].as_str().unwrap().starts_with("2026-09-01T12:00"));
    let item_id = item["id"].as_i64().unwrap();

    let (status, fetched) = json_response(
        &state,
        get_request(&format!("/lists/{list_id}/items/{item_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"].as_str(), Some("Post office"));

    let (status, updated) = json_response(
        &state,
        json_request(
            "PUT",
            &format!("/lists/{list_id}/items/{item_id}"),
            json!({ "title": "Post office (urgent)", "complete": true }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status_code"].as_str(), Some("COMPLETED"));

    let (status, updated) = json_response(
        &state,
        json_request(
            "PUT",
            &format!("/lists/{list_id}/items/{item_id}"),
            json!({ "title": "Post office", "complete": false }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status_code"].as_str(), Some("NOT_COMPLETED"));

    let (status, deleted) = json_response(
        &state,
        Request::builder()
            .method("DELETE")
            .uri(format!("/lists/{list_id}/items/{item_id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({}));

    let response = send(
        &state,
        get_request(&format!("/lists/{list_id}/items/{item_id}")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_overwrites_all_fields() {
    let state = test_state().await;
    let list_id = create_list(&state, "Reading").await;

    let (_, item) = json_response(
        &state,
        json_request(
            "POST",
            &format!("/lists/{list_id}/items"),
            json!({
                "title": "Chapter one",
                "description": "take notes",
                "due_at": "2026-09-15T09:00:00+00:00"
            }),
        ),
    )
    .await;
    let item_id = item["id"].as_i64().unwrap();

    // Title-only update clears description and due_at, unlike list update.
    let (status, updated) = json_response(
        &state,
        json_request(
            "PUT",
            &format!("/lists/{list_id}/items/{item_id}"),
            json!({ "title": "Chapter two" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"].as_str(), Some("Chapter two"));
    assert!(updated["description"].is_null());
    assert!(updated["due_at"].is_null());
    assert_eq!(updated["status_code"].as_str(), Some("NOT_COMPLETED"));
}

#[tokio::test]
async fn create_under_missing_list_returns_not_found() {
    let state = test_state().await;

    let response = send(
        &state,
        json_request("POST", "/lists/777/items", json!({ "title": "orphan" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let rows = item_repo::list_items(&state.db, 777, 1, 10)
        .await
        .expect("list items");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn item_is_scoped_to_its_list() {
    let state = test_state().await;
    let owner = create_list(&state, "Owner").await;
    let other = create_list(&state, "Other").await;

    let (_, item) = json_response(
        &state,
        json_request(
            "POST",
            &format!("/lists/{owner}/items"),
            json!({ "title": "scoped" }),
        ),
    )
    .await;
    let item_id = item["id"].as_i64().unwrap();

    let response = send(
        &state,
        get_request(&format!("/lists/{other}/items/{item_id}")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &state,
        json_request(
            "PUT",
            &format!("/lists/{other}/items/{item_id}"),
            json!({ "title": "hijack" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &state,
        Request::builder()
            .method("DELETE")
            .uri(format!("/lists/{other}/items/{item_id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Still reachable through the owning list.
    let (status, fetched) = json_response(
        &state,
        get_request(&format!("/lists/{owner}/items/{item_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"].as_str(), Some("scoped"));
}

#[tokio::test]
async fn deleting_list_removes_its_items() {
    let state = test_state().await;
    let list_id = create_list(&state, "Doomed").await;

    for n in 1..=2 {
        let (status, _) = json_response(
            &state,
            json_request(
                "POST",
                &format!("/lists/{list_id}/items"),
                json!({ "title": format!("item {n}") }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let response = send(
        &state,
        Request::builder()
            .method("DELETE")
            .uri(format!("/lists/{list_id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows = item_repo::list_items(&state.db, list_id as i32, 1, 10)
        .await
        .expect("list items");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn item_pagination_returns_second_page() {
    let state = test_state().await;
    let list_id = create_list(&state, "Big list").await;

    for n in 1..=15 {
        let (status, _) = json_response(
            &state,
            json_request(
                "POST",
                &format!("/lists/{list_id}/items"),
                json!({ "title": format!("Item {n:02}") }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = json_response(
        &state,
        get_request(&format!("/lists/{list_id}/items?page=2&per_page=10")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let page = page.as_array().unwrap();
    assert_eq!(page.len(), 5);
    assert_eq!(page[0]["title"].as_str(), Some("Item 11"));
}

#[tokio::test]
async fn item_title_validation() {
    let state = test_state().await;
    let list_id = create_list(&state, "Validated").await;

    let response = send(
        &state,
        json_request(
            "POST",
            &format!("/lists/{list_id}/items"),
            json!({ "title": "" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &state,
        json_request(
            "POST",
            &format!("/lists/{list_id}/items"),
            json!({ "title": "x".repeat(101) }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let (_, item) = json_response(
        &state,
        json_request(
            "POST",
            &format!("/lists/{list_id}/items"),
            json!({ "title": "fine" }),
        ),
    )
    .await;
    let item_id = item["id"].as_i64().unwrap();

    let response = send(
        &state,
        json_request(
            "PUT",
            &format!("/lists/{list_id}/items/{item_id}"),
            json!({ "title": "" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
