//! Normalized Canvas data model.
//!
//! Upstream ids are carried as strings everywhere: Canvas mixes numeric and
//! string ids across endpoints, and consumers key on them verbatim. Field
//! names serialize as camelCase to match the wire contract the UI surfaces
//! already speak.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An active course enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
    pub term: Option<String>,
    pub url: String,
}

/// An assignment, annotated with its course so flattened views stay
/// self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub course_id: String,
    pub course_name: String,
    pub name: String,
    pub due_date: Option<DateTime<Utc>>,
    pub lock_date: Option<DateTime<Utc>>,
    pub unlock_date: Option<DateTime<Utc>>,
    pub points_possible: Option<f64>,
    pub published: bool,
    #[serde(default)]
    pub submission_types: Vec<String>,
    pub grading_type: Option<String>,
    pub submission: Option<Submission>,
    pub url: String,
}

impl Assignment {
    /// Identity within the whole snapshot. Assignment ids are only unique
    /// per course, so the course id is part of the key.
    pub fn key(&self) -> String {
        format!("{}:{}", self.course_id, self.id)
    }

    /// Whether the current user has submitted this assignment.
    pub fn is_submitted(&self) -> bool {
        self.submission.as_ref().is_some_and(|s| s.submitted)
    }
}

/// The current user's submission, embedded in its assignment. Never mutated
/// locally - the "marked done" overlay lives in preferences, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Derived: a submission counts as submitted when it carries a
    /// submitted-at timestamp, regardless of upstream boolean flags.
    pub submitted: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub grade: Option<String>,
    pub score: Option<f64>,
    #[serde(default)]
    pub late: bool,
    #[serde(default)]
    pub missing: bool,
    pub workflow_state: Option<String>,
}

/// Extended assignment view returned by the assignment-details tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDetail {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub description: Option<String>,
    pub allowed_attempts: Option<i64>,
    pub rubric: Option<serde_json::Value>,
}

/// A calendar entry within a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub context_code: Option<String>,
    pub assignment_id: Option<String>,
    pub url: Option<String>,
}

/// An entry from the user's upcoming-events feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEvent {
    pub id: String,
    pub title: String,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub context_code: Option<String>,
    pub assignment_id: Option<String>,
    pub assignment: Option<EventAssignment>,
    pub url: Option<String>,
}

/// Assignment summary embedded in an upcoming event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAssignment {
    pub id: String,
    pub name: String,
    pub due_at: Option<DateTime<Utc>>,
    pub points_possible: Option<f64>,
}

/// A standalone submission record from the per-course submissions feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSubmission {
    pub id: String,
    pub assignment_id: String,
    pub assignment_name: String,
    pub user_id: String,
    pub submitted: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub grade: Option<String>,
    pub score: Option<f64>,
    #[serde(default)]
    pub late: bool,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub excused: bool,
    pub workflow_state: Option<String>,
    pub attempt: Option<i64>,
    pub graded_at: Option<DateTime<Utc>>,
}

/// A course module with its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub id: String,
    pub name: String,
    pub position: Option<i64>,
    pub unlock_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items_count: i64,
    #[serde(default)]
    pub items: Vec<ModuleItem>,
}

/// A single item inside a course module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub content_id: Option<String>,
    pub url: Option<String>,
    pub published: Option<bool>,
}

/// Per-course analytics. Not every Canvas instance exposes these, so all
/// payload fields stay loosely typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAnalytics {
    pub course_id: String,
    pub page_views: Option<serde_json::Value>,
    pub participations: Option<serde_json::Value>,
    pub tardiness: Option<serde_json::Value>,
}

/// The current user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub sortable_name: Option<String>,
    pub primary_email: Option<String>,
    pub login_id: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub pronouns: Option<String>,
    pub time_zone: Option<String>,
    pub locale: Option<String>,
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
