//! Presentation digests derived from the cached snapshot.

use chrono::{DateTime, Duration, Utc};

use courseflow_protocols::model::Assignment;
use courseflow_protocols::plan::{AssignmentsDigest, DigestItem};

/// Impact score for priority sorting, normalized to 0-100.
///
/// Points weighted by a time-decay multiplier and divided by the days
/// remaining, then log-scaled so a handful of huge deadlines cannot
/// flatten everything else. Assignments without a due date score 0.
pub fn impact_score(assignment: &Assignment, now: DateTime<Utc>) -> f64 {
    let Some(due) = assignment.due_date else {
        return 0.0;
    };
    let points = assignment.points_possible.unwrap_or(10.0);

    let hours_until_due = (due - now).num_minutes() as f64 / 60.0;

    let time_multiplier = if hours_until_due <= 0.0 {
        20.0
    } else if hours_until_due <= 24.0 {
        10.0
    } else if hours_until_due <= 48.0 {
        5.0
    } else if hours_until_due <= 168.0 {
        2.0
    } else {
        1.0
    };

    let clamped_hours = hours_until_due.max(1.0);
    let raw_score = (points * time_multiplier) / (clamped_hours / 24.0);

    ((raw_score + 1.0).log10() * 30.0).min(100.0)
}

/// Filter assignments to the configured time-range window around `now`.
/// Assignments without a due date are kept.
pub fn filter_time_range(
    assignments: &[Assignment],
    now: DateTime<Utc>,
    weeks_before: u32,
    weeks_after: u32,
) -> Vec<Assignment> {
    let start = now - Duration::weeks(weeks_before as i64);
    let end = now + Duration::weeks(weeks_after as i64);
    assignments
        .iter()
        .filter(|a| match a.due_date {
            Some(due) => due >= start && due <= end,
            None => true,
        })
        .cloned()
        .collect()
}

/// Sort assignments by descending impact score.
pub fn sort_by_impact(assignments: &mut [Assignment], now: DateTime<Utc>) {
    assignments.sort_by(|a, b| {
        impact_score(b, now)
            .partial_cmp(&impact_score(a, now))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Prepare the snapshot subset the advisor prompt is built from: the
/// time-range window, with unsubmitted work split into upcoming (next 7
/// days) and overdue.
pub fn assignments_digest(
    all_assignments: &[Assignment],
    now: DateTime<Utc>,
    weeks_before: u32,
    weeks_after: u32,
) -> AssignmentsDigest {
    let in_range = filter_time_range(all_assignments, now, weeks_before, weeks_after);
    let week_from_now = now + Duration::days(7);

    let mut courses: Vec<String> = Vec::new();
    for assignment in &in_range {
        if !courses.contains(&assignment.course_name) {
            courses.push(assignment.course_name.clone());
        }
    }

    let upcoming = in_range
        .iter()
        .filter(|a| {
            a.due_date
                .is_some_and(|due| due >= now && due <= week_from_now)
                && !a.is_submitted()
        })
        .map(digest_item)
        .collect();

    let overdue = in_range
        .iter()
        .filter(|a| a.due_date.is_some_and(|due| due < now) && !a.is_submitted())
        .map(digest_item)
        .collect();

    let completed = in_range
        .iter()
        .filter(|a| {
            a.is_submitted()
                || a.submission
                    .as_ref()
                    .is_some_and(|s| s.workflow_state.as_deref() == Some("graded"))
        })
        .count();

    AssignmentsDigest {
        total_assignments: in_range.len(),
        courses,
        upcoming,
        overdue,
        completed,
    }
}

fn digest_item(assignment: &Assignment) -> DigestItem {
    DigestItem {
        id: assignment.id.clone(),
        name: assignment.name.clone(),
        course: assignment.course_name.clone(),
        due_date: assignment.due_date,
        points: assignment.points_possible,
    }
}

#[cfg(test)]
#[path = "digest_tests.rs"]
mod tests;
