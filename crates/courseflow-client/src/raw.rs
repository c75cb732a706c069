//! Raw upstream record shapes.
//!
//! Everything is optional and loosely typed; unexpected fields are dropped
//! by serde and missing ones default. Normalization into the internal
//! model happens in `normalize`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Canvas mixes numeric and string ids (and grades) across endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Float(f64),
    Str(String),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Str(s) => s,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTerm {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCourse {
    pub id: RawId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub term: Option<RawTerm>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSubmission {
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub grade: Option<RawId>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub late: Option<bool>,
    #[serde(default)]
    pub missing: Option<bool>,
    #[serde(default)]
    pub workflow_state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAssignment {
    pub id: RawId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lock_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unlock_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub points_possible: Option<f64>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub submission_types: Option<Vec<String>>,
    #[serde(default)]
    pub grading_type: Option<String>,
    #[serde(default)]
    pub submission: Option<RawSubmission>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub allowed_attempts: Option<i64>,
    #[serde(default)]
    pub rubric: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEventAssignment {
    pub id: RawId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub points_possible: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCalendarEvent {
    pub id: RawId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub context_code: Option<String>,
    #[serde(default)]
    pub assignment: Option<RawEventAssignment>,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAssignmentRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUserSubmission {
    pub id: RawId,
    pub assignment_id: RawId,
    #[serde(default)]
    pub assignment: Option<RawAssignmentRef>,
    #[serde(default)]
    pub user_id: Option<RawId>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub grade: Option<RawId>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub late: Option<bool>,
    #[serde(default)]
    pub missing: Option<bool>,
    #[serde(default)]
    pub excused: Option<bool>,
    #[serde(default)]
    pub workflow_state: Option<String>,
    #[serde(default)]
    pub attempt: Option<i64>,
    #[serde(default)]
    pub graded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawModuleItem {
    pub id: RawId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub content_id: Option<RawId>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawModule {
    pub id: RawId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub unlock_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items_count: Option<i64>,
    #[serde(default)]
    pub items: Option<Vec<RawModuleItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAnalytics {
    #[serde(default)]
    pub page_views: Option<serde_json::Value>,
    #[serde(default)]
    pub participations: Option<serde_json::Value>,
    #[serde(default)]
    pub tardiness_breakdown: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    pub id: RawId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub sortable_name: Option<String>,
    #[serde(default)]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub login_id: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub pronouns: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}
