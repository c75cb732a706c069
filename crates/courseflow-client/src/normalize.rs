//! Pure normalizers from raw upstream shapes into the internal model.
//!
//! One function per record kind: stringify ids, default missing optionals,
//! and derive `submission.submitted` from the submitted-at timestamp (the
//! upstream boolean is not trusted).

use courseflow_protocols::model::{
    Assignment, AssignmentDetail, CalendarEvent, Course, CourseAnalytics, CourseModule,
    EventAssignment, ModuleItem, Submission, UpcomingEvent, UserProfile, UserSubmission,
};

use crate::raw::{
    RawAnalytics, RawAssignment, RawCalendarEvent, RawCourse, RawModule, RawProfile,
    RawSubmission, RawUserSubmission,
};

pub fn normalize_course(raw: RawCourse, base_url: &str) -> Course {
    let id = raw.id.into_string();
    let term = raw
        .term
        .and_then(|t| t.name.or_else(|| t.id.map(|id| id.into_string())));
    Course {
        url: format!("{}/courses/{}", base_url.trim_end_matches('/'), id),
        id,
        name: raw.name.unwrap_or_default(),
        code: raw.course_code.unwrap_or_default(),
        term,
    }
}

pub fn normalize_submission(raw: RawSubmission) -> Submission {
    Submission {
        submitted: raw.submitted_at.is_some(),
        submitted_at: raw.submitted_at,
        grade: raw.grade.map(|g| g.into_string()),
        score: raw.score,
        late: raw.late.unwrap_or(false),
        missing: raw.missing.unwrap_or(false),
        workflow_state: raw.workflow_state,
    }
}

pub fn normalize_assignment(
    raw: RawAssignment,
    course_id: &str,
    course_name: &str,
    base_url: &str,
) -> Assignment {
    let id = raw.id.into_string();
    let url = raw.html_url.unwrap_or_else(|| {
        format!(
            "{}/courses/{}/assignments/{}",
            base_url.trim_end_matches('/'),
            course_id,
            id
        )
    });
    Assignment {
        id,
        course_id: course_id.to_string(),
        course_name: course_name.to_string(),
        name: raw.name.unwrap_or_default(),
        due_date: raw.due_at,
        lock_date: raw.lock_at,
        unlock_date: raw.unlock_at,
        points_possible: raw.points_possible,
        published: raw.published.unwrap_or(false),
        submission_types: raw.submission_types.unwrap_or_default(),
        grading_type: raw.grading_type,
        submission: raw.submission.map(normalize_submission),
        url,
    }
}

pub fn normalize_assignment_detail(
    raw: RawAssignment,
    course_id: &str,
    course_name: &str,
    base_url: &str,
) -> AssignmentDetail {
    let description = raw.description.clone();
    let allowed_attempts = raw.allowed_attempts;
    let rubric = raw.rubric.clone();
    AssignmentDetail {
        assignment: normalize_assignment(raw, course_id, course_name, base_url),
        description,
        allowed_attempts,
        rubric,
    }
}

pub fn normalize_calendar_event(raw: RawCalendarEvent) -> CalendarEvent {
    CalendarEvent {
        id: raw.id.into_string(),
        title: raw.title.unwrap_or_default(),
        start_at: raw.start_at,
        end_at: raw.end_at,
        kind: raw.kind,
        context_code: raw.context_code,
        assignment_id: raw.assignment.map(|a| a.id.into_string()),
        url: raw.html_url,
    }
}

pub fn normalize_upcoming_event(raw: RawCalendarEvent) -> UpcomingEvent {
    let assignment = raw.assignment.map(|a| EventAssignment {
        id: a.id.into_string(),
        name: a.name.unwrap_or_default(),
        due_at: a.due_at,
        points_possible: a.points_possible,
    });
    UpcomingEvent {
        id: raw.id.into_string(),
        title: raw.title.unwrap_or_default(),
        start_at: raw.start_at,
        end_at: raw.end_at,
        kind: raw.kind,
        context_code: raw.context_code,
        assignment_id: assignment.as_ref().map(|a| a.id.clone()),
        assignment,
        url: raw.html_url,
    }
}

pub fn normalize_user_submission(raw: RawUserSubmission) -> UserSubmission {
    UserSubmission {
        id: raw.id.into_string(),
        assignment_id: raw.assignment_id.into_string(),
        assignment_name: raw
            .assignment
            .and_then(|a| a.name)
            .unwrap_or_else(|| "Unknown".to_string()),
        user_id: raw.user_id.map(|id| id.into_string()).unwrap_or_default(),
        submitted: raw.submitted_at.is_some(),
        submitted_at: raw.submitted_at,
        grade: raw.grade.map(|g| g.into_string()),
        score: raw.score,
        late: raw.late.unwrap_or(false),
        missing: raw.missing.unwrap_or(false),
        excused: raw.excused.unwrap_or(false),
        workflow_state: raw.workflow_state,
        attempt: raw.attempt,
        graded_at: raw.graded_at,
    }
}

pub fn normalize_module(raw: RawModule) -> CourseModule {
    let items: Vec<ModuleItem> = raw
        .items
        .unwrap_or_default()
        .into_iter()
        .map(|item| ModuleItem {
            id: item.id.into_string(),
            title: item.title.unwrap_or_default(),
            kind: item.kind,
            content_id: item.content_id.map(|id| id.into_string()),
            url: item.html_url,
            published: item.published,
        })
        .collect();
    CourseModule {
        id: raw.id.into_string(),
        name: raw.name.unwrap_or_default(),
        position: raw.position,
        unlock_at: raw.unlock_at,
        items_count: raw.items_count.unwrap_or(items.len() as i64),
        items,
    }
}

pub fn normalize_analytics(raw: RawAnalytics, course_id: &str) -> CourseAnalytics {
    CourseAnalytics {
        course_id: course_id.to_string(),
        page_views: raw.page_views,
        participations: raw.participations,
        tardiness: raw.tardiness_breakdown,
    }
}

pub fn normalize_profile(raw: RawProfile) -> UserProfile {
    UserProfile {
        id: raw.id.into_string(),
        name: raw.name.unwrap_or_default(),
        short_name: raw.short_name,
        sortable_name: raw.sortable_name,
        primary_email: raw.primary_email,
        login_id: raw.login_id,
        avatar_url: raw.avatar_url,
        bio: raw.bio,
        pronouns: raw.pronouns,
        time_zone: raw.time_zone,
        locale: raw.locale,
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
