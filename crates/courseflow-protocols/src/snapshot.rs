//! The aggregated snapshot and refresh bookkeeping types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    Assignment, CalendarEvent, Course, CourseAnalytics, CourseModule, UpcomingEvent, UserProfile,
    UserSubmission,
};

/// The single in-memory aggregate of all cached Canvas data.
///
/// Created empty at process start, optionally rehydrated from the
/// persistent cache, then updated wholesale per sub-collection on each
/// refresh. `assignments` is the legacy per-course map and may lag behind
/// `all_assignments`, which is the flattened course-annotated view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub assignments: HashMap<String, Vec<Assignment>>,
    #[serde(default)]
    pub all_assignments: Vec<Assignment>,
    #[serde(default)]
    pub calendar_events: Vec<CalendarEvent>,
    #[serde(default)]
    pub upcoming_events: Vec<UpcomingEvent>,
    #[serde(default)]
    pub submissions: HashMap<String, Vec<UserSubmission>>,
    #[serde(default)]
    pub modules: HashMap<String, Vec<CourseModule>>,
    #[serde(default)]
    pub analytics: HashMap<String, CourseAnalytics>,
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
    /// When the underlying data last changed. Set only by a refresh that
    /// applied at least one sub-collection; distinct from the cache write
    /// timestamp.
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
}

/// A snapshot as persisted to durable storage, stamped with the time the
/// cache write happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedSnapshot {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    pub cache_timestamp: DateTime<Utc>,
}

/// What happened to one sub-collection during a refresh cycle.
///
/// An empty or failed fetch never clobbers previously cached data; both
/// cases surface as [`SyncOutcome::KeptPrevious`] so callers can tell a
/// degraded cycle from a healthy one without parsing logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    Applied { count: usize },
    KeptPrevious { reason: String },
}

impl SyncOutcome {
    pub fn applied(count: usize) -> Self {
        Self::Applied { count }
    }

    pub fn kept(reason: impl Into<String>) -> Self {
        Self::KeptPrevious {
            reason: reason.into(),
        }
    }

    /// Whether this outcome wrote fresh data into the snapshot.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Per-kind outcomes of one refresh cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub courses: SyncOutcome,
    pub all_assignments: SyncOutcome,
    pub calendar_events: SyncOutcome,
    pub upcoming_events: SyncOutcome,
    pub user_profile: SyncOutcome,
}

impl RefreshReport {
    /// Whether any sub-collection was populated this cycle.
    pub fn any_applied(&self) -> bool {
        [
            &self.courses,
            &self.all_assignments,
            &self.calendar_events,
            &self.upcoming_events,
            &self.user_profile,
        ]
        .into_iter()
        .any(SyncOutcome::is_applied)
    }
}
