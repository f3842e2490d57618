mod common;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use serde_json::{Value, json};
use tower::ServiceExt;

use backend::api::router;
use backend::state::AppState;

async fn app() -> Router {
    let pool = common::setup_db().await;
    router(AppState { db: pool })
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(payload) => Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("build request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("build request"),
    };

    let response = app.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse json body")
    };
    (status, value)
}

#[tokio::test]
async fn course_lifecycle_end_to_end() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(json!({"title": "Intro", "code": "CS101", "instructorId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["code"], json!(200));
    assert_eq!(body["data"]["status"], json!("draft"));
    let id = body["data"]["id"].as_i64().expect("course id");

    let (status, body) = send(&app, "POST", &format!("/api/courses/{id}/publish"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("published"));

    let (status, body) = send(&app, "DELETE", &format!("/api/courses/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"], Value::Null);

    let (status, body) = send(&app, "GET", &format!("/api/courses/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!(404));
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn duplicate_code_is_rejected_with_400() {
    let app = app().await;

    let payload = json!({"title": "Intro", "code": "CS101", "instructorId": 1});
    let (status, _) = send(&app, "POST", "/api/courses", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/api/courses", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!(400));
}

#[tokio::test]
async fn validation_failure_is_rejected_with_400() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(json!({"title": "  ", "code": "CS101", "instructorId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    let (status, _) = send(
        &app,
        "POST",
        "/api/courses",
        Some(json!({"title": "Intro", "code": "CS101", "instructorId": -3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_applies_only_provided_fields() {
    let app = app().await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(json!({
            "title": "Intro",
            "code": "CS101",
            "instructorId": 1,
            "credits": 3
        })),
    )
    .await;
    let id = body["data"]["id"].as_i64().expect("course id");

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/courses/{id}"),
        Some(json!({"title": "Intro to Computing"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], json!("Intro to Computing"));
    assert_eq!(body["data"]["code"], json!("CS101"));
    assert_eq!(body["data"]["credits"], json!(3));
}

#[tokio::test]
async fn check_code_endpoint_reports_availability() {
    let app = app().await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(json!({"title": "Intro", "code": "CS101", "instructorId": 1})),
    )
    .await;
    let id = body["data"]["id"].as_i64().expect("course id");

    let (status, body) = send(&app, "GET", "/api/courses/check-code?code=CS999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(true));

    let (_, body) = send(&app, "GET", "/api/courses/check-code?code=CS101", None).await;
    assert_eq!(body["data"], json!(false));

    let uri = format!("/api/courses/check-code?code=CS101&excludeId={id}");
    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(body["data"], json!(true));
}

#[tokio::test]
async fn enrollment_check_flips_across_enroll() {
    let app = app().await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(json!({"title": "Intro", "code": "CS101", "instructorId": 1})),
    )
    .await;
    let course_id = body["data"]["id"].as_i64().expect("course id");

    let check_uri = format!("/api/enrollments/check?userId=1&courseId={course_id}");
    let (status, body) = send(&app, "GET", &check_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(false));

    let enroll_uri = format!("/api/enrollments?userId=1&courseId={course_id}");
    let (status, body) = send(&app, "POST", &enroll_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enrollmentStatus"], json!("active"));
    assert_eq!(body["data"]["role"], json!("student"));

    let (_, body) = send(&app, "GET", &check_uri, None).await;
    assert_eq!(body["data"], json!(true));

    let count_uri = format!("/api/enrollments/course/{course_id}/count");
    let (_, body) = send(&app, "GET", &count_uri, None).await;
    assert_eq!(body["data"], json!(1));
}

#[tokio::test]
async fn enrollment_status_transitions_over_http() {
    let app = app().await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(json!({"title": "Intro", "code": "CS101", "instructorId": 1})),
    )
    .await;
    let course_id = body["data"]["id"].as_i64().expect("course id");

    let enroll_uri = format!("/api/enrollments?userId=1&courseId={course_id}");
    let (status, _) = send(&app, "POST", &enroll_uri, None).await;
    assert_eq!(status, StatusCode::OK);

    // Enrolling again while active is a business-rule violation.
    let (status, body) = send(&app, "POST", &enroll_uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(400));

    let drop_uri = format!("/api/enrollments/drop?userId=1&courseId={course_id}");
    let (status, _) = send(&app, "POST", &drop_uri, None).await;
    assert_eq!(status, StatusCode::OK);

    // Dropping with no active enrollment left is a 404.
    let (status, _) = send(&app, "POST", &drop_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // After dropping, enrolling again succeeds.
    let (status, _) = send(&app, "POST", &enroll_uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let complete_uri = format!("/api/enrollments/complete?userId=1&courseId={course_id}");
    let (status, _) = send(&app, "POST", &complete_uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/enrollments/user/1", None).await;
    let rows = body["data"].as_array().expect("enrollment list");
    assert_eq!(rows.len(), 2);
    assert!(
        rows.iter()
            .any(|e| e["enrollmentStatus"] == json!("completed") && e["completedAt"] != Value::Null)
    );
}

#[tokio::test]
async fn module_reorder_over_http() {
    let app = app().await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(json!({"title": "Intro", "code": "CS101", "instructorId": 1})),
    )
    .await;
    let course_id = body["data"]["id"].as_i64().expect("course id");

    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/modules",
            Some(json!({"courseId": course_id, "title": title})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        ids.push(body["data"]["id"].as_i64().expect("module id"));
    }

    let reordered = json!([ids[2], ids[0], ids[1]]);
    let (status, _) = send(&app, "POST", "/api/modules/reorder", Some(reordered)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("/api/modules/course/{course_id}"), None).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .expect("module list")
        .iter()
        .map(|m| m["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["C", "A", "B"]);
}

#[tokio::test]
async fn health_endpoint_is_ok() {
    let app = app().await;

    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}
