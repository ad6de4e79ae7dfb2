//! Integration tests for the `/api/v1/task` endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_category, create_task, delete, get, member_token, post_json,
    put_json, viewer_token,
};
use serde_json::json;

#[tokio::test]
async fn create_defaults_to_pending_and_medium() {
    let app = build_test_app();

    let response = post_json(
        &app.router,
        "/api/v1/task",
        &member_token(),
        json!({ "title": "  Write report  ", "estimatedMinutes": 45 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["title"], "Write report");
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["priority"], "medium");
    assert_eq!(json["data"]["estimatedMinutes"], 45);
    assert_eq!(json["data"]["categoryIds"], json!([]));
}

#[tokio::test]
async fn create_links_listed_categories_once() {
    let app = build_test_app();
    let work = create_category(&app.router, "Work", None).await;

    let response = post_json(
        &app.router,
        "/api/v1/task",
        &member_token(),
        json!({ "title": "Plan sprint", "categoryIds": [work, work] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["categoryIds"], json!([work]));

    let response = get(
        &app.router,
        &format!("/api/v1/category/{work}"),
        &member_token(),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["taskCount"], 1);
}

#[tokio::test]
async fn unknown_category_rejects_the_whole_create() {
    let app = build_test_app();

    let response = post_json(
        &app.router,
        "/api/v1/task",
        &member_token(),
        json!({ "title": "Plan sprint", "categoryIds": [404] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "BUSINESS_RULE_VIOLATION");

    let response = get(&app.router, "/api/v1/task", &member_token()).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_task_payload_is_a_validation_error() {
    let app = build_test_app();

    let response = post_json(
        &app.router,
        "/api/v1/task",
        &member_token(),
        json!({
            "title": "ab",
            "estimatedMinutes": 2000,
            "recurrence": { "type": "weekly", "interval": 0 },
            "categoryIds": [0]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    let details = json["error"]["details"].as_object().unwrap();
    for field in ["title", "estimatedMinutes", "recurrence", "categoryIds"] {
        assert!(details.contains_key(field), "missing detail for {field}");
    }
}

#[tokio::test]
async fn title_length_ignores_surrounding_whitespace() {
    let app = build_test_app();

    let response = post_json(
        &app.router,
        "/api/v1/task",
        &member_token(),
        json!({ "title": "  ab  " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert!(json["error"]["details"]["title"].is_array());
}

#[tokio::test]
async fn past_due_date_is_a_validation_error() {
    let app = build_test_app();

    let response = post_json(
        &app.router,
        "/api/v1/task",
        &member_token(),
        json!({ "title": "File taxes", "dueDate": "2001-04-15T12:00:00Z" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"]["details"]["dueDate"][0],
        "Due date cannot be in the past"
    );
}

#[tokio::test]
async fn create_accepts_numeric_priority_and_legacy_field_names() {
    let app = build_test_app();

    let response = post_json(
        &app.router,
        "/api/v1/task",
        &member_token(),
        json!({
            "title": "Stand-up",
            "priority": 2,
            "estimatedTime": 15,
            "recurrenceConfig": { "type": "daily", "interval": 1 }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["priority"], "high");
    assert_eq!(json["data"]["estimatedMinutes"], 15);
    assert_eq!(json["data"]["recurrence"]["type"], "daily");
}

#[tokio::test]
async fn negative_task_id_is_a_bad_request() {
    let app = build_test_app();

    let response = get(&app.router, "/api/v1/task/-1", &member_token()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_priority_is_a_bad_request() {
    let app = build_test_app();

    let response = post_json(
        &app.router,
        "/api/v1/task",
        &member_token(),
        json!({ "title": "Plan sprint", "priority": "urgent" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn viewer_cannot_create_tasks() {
    let app = build_test_app();

    let response = post_json(
        &app.router,
        "/api/v1/task",
        &viewer_token(),
        json!({ "title": "Plan sprint" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn list_applies_filters() {
    let app = build_test_app();
    let work = create_category(&app.router, "Work", None).await;
    post_json(
        &app.router,
        "/api/v1/task",
        &member_token(),
        json!({ "title": "Urgent fix", "priority": "high", "categoryIds": [work] }),
    )
    .await;
    create_task(&app.router, "Someday idea").await;

    let response = get(&app.router, "/api/v1/task?priority=high", &member_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Urgent fix"]);

    let response = get(
        &app.router,
        &format!("/api/v1/task?categoryId={work}&status=pending"),
        &member_token(),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = get(&app.router, "/api/v1/task?status=completed", &member_token()).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_filter_value_is_a_bad_request() {
    let app = build_test_app();

    let response = get(&app.router, "/api/v1/task?status=someday", &member_token()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_changes_status() {
    let app = build_test_app();
    let id = create_task(&app.router, "Write report").await;

    let response = put_json(
        &app.router,
        &format!("/api/v1/task/{id}"),
        &member_token(),
        json!({ "title": "Write report", "priority": "low", "status": "inProgress" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "inProgress");
    assert_eq!(json["data"]["priority"], "low");
}

#[tokio::test]
async fn get_and_update_missing_task_return_404() {
    let app = build_test_app();

    let response = get(&app.router, "/api/v1/task/5", &member_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["message"], "Task with id 5 not found");

    let response = put_json(
        &app.router,
        "/api/v1/task/5",
        &member_token(),
        json!({ "title": "Ghost", "priority": "low", "status": "pending" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_hides_task_and_releases_category_count() {
    let app = build_test_app();
    let work = create_category(&app.router, "Work", None).await;
    let response = post_json(
        &app.router,
        "/api/v1/task",
        &member_token(),
        json!({ "title": "Plan sprint", "categoryIds": [work] }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = delete(&app.router, &format!("/api/v1/task/{id}"), &member_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], id);

    let response = get(&app.router, &format!("/api/v1/task/{id}"), &member_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(
        &app.router,
        &format!("/api/v1/category/{work}"),
        &member_token(),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["taskCount"], 0);

    let response = delete(&app.router, &format!("/api/v1/task/{id}"), &member_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
