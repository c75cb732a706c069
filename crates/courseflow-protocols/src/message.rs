//! The message contract between UI surfaces and the daemon.
//!
//! A closed set of request/response pairs, not a generic RPC. Both enums
//! are tagged with `type` and dispatched by exhaustive match; an unknown
//! tag fails deserialization and is answered with an explicit error
//! response, never a silent no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::{PlanFocus, StudyPlan};
use crate::snapshot::{RefreshReport, Snapshot};
use crate::tool::{ToolDefinition, ToolResult};

/// Requests a UI surface can send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Request {
    /// Return the cached snapshot immediately (stale-while-revalidate:
    /// callers trigger `RefreshData` separately).
    GetData,
    /// Run a full refresh cycle and return the merged result.
    RefreshData,
    /// Daemon status summary for header widgets.
    GetStatus,
    /// List the available tool definitions.
    ListTools,
    /// Invoke a named tool with JSON arguments.
    ToolCall {
        name: String,
        #[serde(default)]
        arguments: serde_json::Value,
    },
    GetPreferences,
    SetTimeRange {
        weeks_before: u32,
        weeks_after: u32,
    },
    SetAutoRefresh {
        enabled: bool,
    },
    MarkDone {
        course_id: String,
        assignment_id: String,
    },
    UnmarkDone {
        course_id: String,
        assignment_id: String,
    },
    /// Ask the advisor for a study plan built from the cached snapshot.
    GeneratePlan {
        #[serde(default)]
        focus: PlanFocus,
    },
    /// Exercise the notification path end to end.
    TestNotification,
}

/// Responses the daemon sends back. `Notification` is also used for
/// server-initiated broadcasts on the WebSocket channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Response {
    Data {
        snapshot: Snapshot,
        cache_timestamp: Option<DateTime<Utc>>,
    },
    Refreshed {
        snapshot: Snapshot,
        report: RefreshReport,
    },
    Status {
        tool_count: usize,
        course_count: usize,
        last_update: Option<DateTime<Utc>>,
        refreshing: bool,
    },
    Tools {
        tools: Vec<ToolDefinition>,
    },
    ToolOutput {
        result: ToolResult,
    },
    Preferences {
        preferences: Preferences,
    },
    Plan {
        plan: StudyPlan,
    },
    Notification {
        title: String,
        body: String,
        priority: u8,
    },
    Ack,
    Error {
        code: String,
        message: String,
    },
}

impl Response {
    /// Create an error response.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a notification message.
    pub fn notification(title: impl Into<String>, body: impl Into<String>, priority: u8) -> Self {
        Self::Notification {
            title: title.into(),
            body: body.into(),
            priority,
        }
    }
}

/// User preferences stored under independent keys, including the
/// client-side-only "marked done" overlay of `courseId:assignmentId` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub weeks_before: u32,
    pub weeks_after: u32,
    pub auto_refresh: bool,
    #[serde(default)]
    pub marked_done: Vec<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            weeks_before: 2,
            weeks_after: 2,
            auto_refresh: true,
            marked_done: Vec::new(),
        }
    }
}

/// Build the overlay key pairing an assignment with its course.
pub fn done_key(course_id: &str, assignment_id: &str) -> String {
    format!("{course_id}:{assignment_id}")
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
