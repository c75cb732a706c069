use chrono::Duration;

use super::*;

fn assignment(id: &str, course: &str, due_in_hours: Option<i64>, points: Option<f64>) -> Assignment {
    Assignment {
        id: id.to_string(),
        course_id: "7".to_string(),
        course_name: course.to_string(),
        name: format!("Assignment {id}"),
        due_date: due_in_hours.map(|h| Utc::now() + Duration::hours(h)),
        lock_date: None,
        unlock_date: None,
        points_possible: points,
        published: true,
        submission_types: Vec::new(),
        grading_type: None,
        submission: None,
        url: String::new(),
    }
}

fn submitted(mut a: Assignment) -> Assignment {
    a.submission = Some(courseflow_protocols::Submission {
        submitted: true,
        submitted_at: Some(Utc::now()),
        grade: None,
        score: None,
        late: false,
        missing: false,
        workflow_state: Some("submitted".to_string()),
    });
    a
}

#[test]
fn test_impact_score_overdue_beats_far_future() {
    let now = Utc::now();
    let overdue = assignment("1", "Math", Some(-5), Some(50.0));
    let far_out = assignment("2", "Math", Some(24 * 14), Some(50.0));

    assert!(impact_score(&overdue, now) > impact_score(&far_out, now));
}

#[test]
fn test_impact_score_sooner_beats_later_at_equal_points() {
    let now = Utc::now();
    let today = assignment("1", "Math", Some(6), Some(20.0));
    let this_week = assignment("2", "Math", Some(24 * 5), Some(20.0));

    assert!(impact_score(&today, now) > impact_score(&this_week, now));
}

#[test]
fn test_impact_score_points_break_ties() {
    let now = Utc::now();
    let big = assignment("1", "Math", Some(48), Some(100.0));
    let small = assignment("2", "Math", Some(48), Some(5.0));

    assert!(impact_score(&big, now) > impact_score(&small, now));
}

#[test]
fn test_impact_score_bounded_to_100() {
    let now = Utc::now();
    let extreme = assignment("1", "Math", Some(-500), Some(10000.0));
    assert!(impact_score(&extreme, now) <= 100.0);
}

#[test]
fn test_impact_score_missing_due_date_is_zero() {
    let now = Utc::now();
    let undated = assignment("1", "Math", None, Some(50.0));
    assert_eq!(impact_score(&undated, now), 0.0);
}

#[test]
fn test_sort_by_impact_descending() {
    let now = Utc::now();
    let mut assignments = vec![
        assignment("far", "Math", Some(24 * 10), Some(10.0)),
        assignment("overdue", "Math", Some(-2), Some(50.0)),
        assignment("tomorrow", "Math", Some(30), Some(20.0)),
    ];
    sort_by_impact(&mut assignments, now);
    assert_eq!(assignments[0].id, "overdue");
    assert_eq!(assignments[2].id, "far");
}

#[test]
fn test_filter_time_range_window() {
    let now = Utc::now();
    let assignments = vec![
        assignment("old", "Math", Some(-24 * 30), None),
        assignment("recent", "Math", Some(-24 * 3), None),
        assignment("soon", "Math", Some(24 * 3), None),
        assignment("far", "Math", Some(24 * 30), None),
        assignment("undated", "Math", None, None),
    ];

    let in_range = filter_time_range(&assignments, now, 1, 1);
    let ids: Vec<&str> = in_range.iter().map(|a| a.id.as_str()).collect();
    // One week back, one week forward, undated kept.
    assert_eq!(ids, vec!["recent", "soon", "undated"]);
}

#[test]
fn test_digest_buckets_and_counts() {
    let now = Utc::now();
    let assignments = vec![
        assignment("overdue", "Math", Some(-12), Some(50.0)),
        assignment("upcoming", "History", Some(24 * 3), Some(25.0)),
        submitted(assignment("done", "Math", Some(24 * 2), Some(10.0))),
        assignment("undated", "Art", None, None),
    ];

    let digest = assignments_digest(&assignments, now, 2, 2);
    assert_eq!(digest.total_assignments, 4);
    assert_eq!(digest.courses, vec!["Math", "History", "Art"]);
    assert_eq!(digest.overdue.len(), 1);
    assert_eq!(digest.overdue[0].id, "overdue");
    assert_eq!(digest.upcoming.len(), 1);
    assert_eq!(digest.upcoming[0].id, "upcoming");
    assert_eq!(digest.completed, 1);
}

#[test]
fn test_digest_upcoming_excludes_beyond_seven_days() {
    let now = Utc::now();
    let assignments = vec![assignment("later", "Math", Some(24 * 9), Some(10.0))];

    let digest = assignments_digest(&assignments, now, 2, 2);
    assert!(digest.upcoming.is_empty());
    assert_eq!(digest.total_assignments, 1);
}

#[test]
fn test_digest_graded_without_timestamp_counts_completed() {
    let now = Utc::now();
    let mut graded = assignment("graded", "Math", Some(24), Some(10.0));
    graded.submission = Some(courseflow_protocols::Submission {
        submitted: false,
        submitted_at: None,
        grade: Some("A".to_string()),
        score: Some(95.0),
        late: false,
        missing: false,
        workflow_state: Some("graded".to_string()),
    });

    let digest = assignments_digest(&[graded], now, 2, 2);
    assert_eq!(digest.completed, 1);
    // Still unsubmitted by the timestamp rule, so it also shows upcoming.
    assert_eq!(digest.upcoming.len(), 1);
}
