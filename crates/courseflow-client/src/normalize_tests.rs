use super::*;
use crate::raw::{
    RawAnalytics, RawAssignment, RawCalendarEvent, RawCourse, RawModule, RawProfile,
    RawSubmission, RawUserSubmission,
};
use serde_json::json;

const BASE: &str = "https://canvas.example.edu";

#[test]
fn test_course_numeric_id_stringified() {
    let raw: RawCourse = serde_json::from_value(json!({
        "id": 1234,
        "name": "Organic Chemistry",
        "course_code": "CHEM 301",
        "term": { "id": 9, "name": "Fall 2025" }
    }))
    .unwrap();
    let course = normalize_course(raw, BASE);
    assert_eq!(course.id, "1234");
    assert_eq!(course.term.as_deref(), Some("Fall 2025"));
    assert_eq!(course.url, "https://canvas.example.edu/courses/1234");
}

#[test]
fn test_course_term_falls_back_to_id() {
    let raw: RawCourse = serde_json::from_value(json!({
        "id": "55",
        "name": "History",
        "course_code": "HIST 101",
        "term": { "id": 3 }
    }))
    .unwrap();
    let course = normalize_course(raw, BASE);
    assert_eq!(course.term.as_deref(), Some("3"));
}

#[test]
fn test_course_missing_term_is_none() {
    let raw: RawCourse = serde_json::from_value(json!({ "id": 2, "name": "X", "course_code": "X1" })).unwrap();
    assert!(normalize_course(raw, BASE).term.is_none());
}

#[test]
fn test_submitted_derived_from_timestamp_not_upstream_flag() {
    // Upstream may report workflow_state "submitted" with no timestamp;
    // only the timestamp counts.
    let raw: RawSubmission = serde_json::from_value(json!({
        "submitted_at": null,
        "workflow_state": "submitted",
        "grade": null,
        "score": null
    }))
    .unwrap();
    let submission = normalize_submission(raw);
    assert!(!submission.submitted);

    let raw: RawSubmission = serde_json::from_value(json!({
        "submitted_at": "2025-11-17T10:00:00Z"
    }))
    .unwrap();
    assert!(normalize_submission(raw).submitted);
}

#[test]
fn test_numeric_grade_stringified() {
    let raw: RawSubmission = serde_json::from_value(json!({
        "grade": 88.5,
        "score": 88.5
    }))
    .unwrap();
    let submission = normalize_submission(raw);
    assert_eq!(submission.grade.as_deref(), Some("88.5"));
    assert_eq!(submission.score, Some(88.5));
}

#[test]
fn test_assignment_defaults_and_url_fallback() {
    let raw: RawAssignment = serde_json::from_value(json!({ "id": 42 })).unwrap();
    let assignment = normalize_assignment(raw, "7", "Linear Algebra", BASE);
    assert_eq!(assignment.id, "42");
    assert_eq!(assignment.course_id, "7");
    assert_eq!(assignment.course_name, "Linear Algebra");
    assert!(!assignment.published);
    assert!(assignment.submission_types.is_empty());
    assert!(assignment.due_date.is_none());
    assert_eq!(
        assignment.url,
        "https://canvas.example.edu/courses/7/assignments/42"
    );
}

#[test]
fn test_assignment_prefers_upstream_html_url() {
    let raw: RawAssignment = serde_json::from_value(json!({
        "id": 42,
        "html_url": "https://canvas.example.edu/courses/7/assignments/42?module_item_id=9"
    }))
    .unwrap();
    let assignment = normalize_assignment(raw, "7", "Linear Algebra", BASE);
    assert!(assignment.url.contains("module_item_id"));
}

#[test]
fn test_assignment_unknown_fields_dropped() {
    let raw: RawAssignment = serde_json::from_value(json!({
        "id": 1,
        "name": "Quiz",
        "brand_new_canvas_field": { "nested": true }
    }))
    .unwrap();
    let assignment = normalize_assignment(raw, "7", "C", BASE);
    assert_eq!(assignment.name, "Quiz");
}

#[test]
fn test_assignment_detail_keeps_rubric() {
    let raw: RawAssignment = serde_json::from_value(json!({
        "id": 42,
        "description": "<p>Write an essay.</p>",
        "allowed_attempts": 2,
        "rubric": [{ "points": 10.0 }]
    }))
    .unwrap();
    let detail = normalize_assignment_detail(raw, "7", "C", BASE);
    assert_eq!(detail.allowed_attempts, Some(2));
    assert!(detail.rubric.is_some());
    assert_eq!(detail.assignment.id, "42");
}

#[test]
fn test_calendar_event_assignment_id_extracted() {
    let raw: RawCalendarEvent = serde_json::from_value(json!({
        "id": "assignment_42",
        "title": "Problem Set 3",
        "type": "assignment",
        "context_code": "course_7",
        "assignment": { "id": 42, "name": "Problem Set 3" }
    }))
    .unwrap();
    let event = normalize_calendar_event(raw);
    assert_eq!(event.assignment_id.as_deref(), Some("42"));
    assert_eq!(event.kind.as_deref(), Some("assignment"));
}

#[test]
fn test_upcoming_event_embeds_assignment_summary() {
    let raw: RawCalendarEvent = serde_json::from_value(json!({
        "id": 9,
        "title": "Midterm",
        "assignment": {
            "id": 42,
            "name": "Midterm",
            "due_at": "2025-11-20T15:00:00Z",
            "points_possible": 100.0
        }
    }))
    .unwrap();
    let event = normalize_upcoming_event(raw);
    let assignment = event.assignment.unwrap();
    assert_eq!(assignment.points_possible, Some(100.0));
    assert_eq!(event.assignment_id.as_deref(), Some("42"));
}

#[test]
fn test_user_submission_unknown_assignment_name() {
    let raw: RawUserSubmission = serde_json::from_value(json!({
        "id": 1,
        "assignment_id": 42,
        "user_id": 99,
        "submitted_at": "2025-11-17T10:00:00Z"
    }))
    .unwrap();
    let submission = normalize_user_submission(raw);
    assert_eq!(submission.assignment_name, "Unknown");
    assert_eq!(submission.user_id, "99");
    assert!(submission.submitted);
}

#[test]
fn test_module_items_count_falls_back_to_len() {
    let raw: RawModule = serde_json::from_value(json!({
        "id": 5,
        "name": "Week 1",
        "items": [
            { "id": 1, "title": "Intro", "type": "Page" },
            { "id": 2, "title": "Reading", "type": "File", "content_id": 77 }
        ]
    }))
    .unwrap();
    let module = normalize_module(raw);
    assert_eq!(module.items_count, 2);
    assert_eq!(module.items[1].content_id.as_deref(), Some("77"));
}

#[test]
fn test_analytics_carries_course_id() {
    let raw: RawAnalytics = serde_json::from_value(json!({
        "page_views": { "level": 2 },
        "participations": { "level": 1 },
        "tardiness_breakdown": { "late": 1 }
    }))
    .unwrap();
    let analytics = normalize_analytics(raw, "7");
    assert_eq!(analytics.course_id, "7");
    assert!(analytics.tardiness.is_some());
}

#[test]
fn test_profile_normalization() {
    let raw: RawProfile = serde_json::from_value(json!({
        "id": 99,
        "name": "Sam Student",
        "short_name": "Sam",
        "primary_email": "sam@example.edu",
        "time_zone": "America/Denver"
    }))
    .unwrap();
    let profile = normalize_profile(raw);
    assert_eq!(profile.id, "99");
    assert_eq!(profile.time_zone.as_deref(), Some("America/Denver"));
    assert!(profile.pronouns.is_none());
}
