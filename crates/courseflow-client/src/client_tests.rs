use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::transport::HttpTransport;

use super::*;

async fn client_for(server: &MockServer) -> CanvasClient {
    let transport = HttpTransport::new(&server.uri(), "canvas_session=test").unwrap();
    CanvasClient::new(Arc::new(transport), server.uri(), 100)
}

#[tokio::test]
async fn test_fetch_paginated_follows_next_links() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 1 }, { "id": 2 }]))
                .insert_header(
                    "link",
                    format!("<{}/api/v1/items2>; rel=\"next\"", server.uri()).as_str(),
                ),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 3 }])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let records = client.fetch_paginated("/api/v1/items", 100).await.unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2]["id"], 3);
}

#[tokio::test]
async fn test_fetch_paginated_respects_max_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }]))
                .insert_header(
                    "link",
                    format!("<{}/api/v1/items2>; rel=\"next\"", server.uri()).as_str(),
                ),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let records = client.fetch_paginated("/api/v1/items", 2).await.unwrap();
    // Truncated to the cap, and the next page was never needed.
    assert_eq!(records.len(), 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_fetch_paginated_hard_page_ceiling() {
    let server = MockServer::start().await;

    // A page that always links back to itself would paginate forever.
    Mock::given(method("GET"))
        .and(path("/api/v1/loop"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 1 }]))
                .insert_header(
                    "link",
                    format!("<{}/api/v1/loop>; rel=\"next\"", server.uri()).as_str(),
                ),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let records = client.fetch_paginated("/api/v1/loop", 1000).await.unwrap();
    assert_eq!(records.len(), 10);
    assert_eq!(server.received_requests().await.unwrap().len(), 10);
}

#[tokio::test]
async fn test_fetch_paginated_single_object_is_one_element_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/one"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let records = client.fetch_paginated("/api/v1/one", 100).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], 7);
}

#[tokio::test]
async fn test_fetch_paginated_first_page_error_is_typed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/denied"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .fetch_paginated("/api/v1/denied", 100)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_fetch_paginated_mid_pagination_error_returns_partial() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 1 }, { "id": 2 }]))
                .insert_header(
                    "link",
                    format!("<{}/api/v1/broken>; rel=\"next\"", server.uri()).as_str(),
                ),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let records = client.fetch_paginated("/api/v1/items", 100).await.unwrap();
    // Exactly the page-1 records: no error, and not an empty list.
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_fetch_paginated_malformed_link_stops_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 1 }]))
                .insert_header("link", "this is not a link header"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let records = client.fetch_paginated("/api/v1/items", 100).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_courses_sends_session_cookie_and_normalizes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses"))
        .and(query_param("enrollment_state", "active"))
        .and(header("cookie", "canvas_session=test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 7,
                "name": "Linear Algebra",
                "course_code": "MATH 310",
                "term": { "name": "Fall 2025" }
            }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let courses = client.courses().await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, "7");
    assert_eq!(courses[0].code, "MATH 310");
    assert!(courses[0].url.ends_with("/courses/7"));
}

#[tokio::test]
async fn test_course_assignments_embed_submission() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/7/assignments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 42,
                "name": "Problem Set 3",
                "due_at": "2025-11-18T23:59:00Z",
                "points_possible": 50.0,
                "published": true,
                "submission_types": ["online_upload"],
                "grading_type": "points",
                "submission": { "submitted_at": null, "workflow_state": "unsubmitted" }
            }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let assignments = client.course_assignments("7", "Linear Algebra").await.unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].course_name, "Linear Algebra");
    let submission = assignments[0].submission.as_ref().unwrap();
    assert!(!submission.submitted);
}

#[tokio::test]
async fn test_malformed_record_is_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/7/assignments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "no_id_at_all": true },
            { "id": 43, "name": "Quiz 2" }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let assignments = client.course_assignments("7", "Linear Algebra").await.unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].id, "43");
}

#[tokio::test]
async fn test_upcoming_events_non_array_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/self/upcoming_events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "nope" })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let events = client.upcoming_events().await.unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_user_profile_normalizes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/self/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 99,
            "name": "Sam Student",
            "primary_email": "sam@example.edu"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let profile = client.user_profile().await.unwrap();
    assert_eq!(profile.id, "99");
    assert_eq!(profile.primary_email.as_deref(), Some("sam@example.edu"));
}

#[tokio::test]
async fn test_assignment_detail_decodes_rubric() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/7/assignments/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "Essay",
            "description": "<p>Write.</p>",
            "allowed_attempts": 1,
            "rubric": [{ "points": 25.0 }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let detail = client.assignment_detail("7", "42", "Writing").await.unwrap();
    assert_eq!(detail.assignment.name, "Essay");
    assert!(detail.rubric.is_some());
}
