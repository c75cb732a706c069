//! Tool definitions and results.
//!
//! Each tool is a thin wrapper over a single remote-client operation; the
//! router executes it and packages the output as a text-JSON envelope.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Definition of a tool, with a JSON schema for its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    fn new(name: &str, description: &str, input_schema: serde_json::Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Result of a tool execution: pretty-printed JSON text on success, an
/// error message otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// Package a serializable value as the text-JSON envelope.
    pub fn success<T: Serialize>(value: &T) -> Self {
        let content =
            serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"));
        Self {
            success: true,
            content,
            error: None,
        }
    }

    /// Create a failed result.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            content: String::new(),
            error: Some(message.into()),
        }
    }
}

fn empty_schema() -> serde_json::Value {
    json!({ "type": "object", "properties": {}, "required": [] })
}

fn course_id_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "course_id": { "type": "string", "description": "The Canvas course ID" }
        },
        "required": ["course_id"]
    })
}

/// The closed set of tools the router exposes.
pub fn tool_catalog() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "list_courses",
            "Get list of all Canvas courses for the current user",
            empty_schema(),
        ),
        ToolDefinition::new(
            "get_course_assignments",
            "Get assignments for a specific course",
            course_id_schema(),
        ),
        ToolDefinition::new(
            "list_all_assignments",
            "Get all assignments across all courses with submission status",
            empty_schema(),
        ),
        ToolDefinition::new(
            "get_assignment_details",
            "Get detailed information about a specific assignment including description, rubric, and submission status",
            json!({
                "type": "object",
                "properties": {
                    "course_id": { "type": "string", "description": "The Canvas course ID" },
                    "assignment_id": { "type": "string", "description": "The Canvas assignment ID" }
                },
                "required": ["course_id", "assignment_id"]
            }),
        ),
        ToolDefinition::new(
            "list_calendar_events",
            "Get calendar events and assignments within a date range",
            json!({
                "type": "object",
                "properties": {
                    "start_date": { "type": "string", "description": "Start date in ISO 8601 format (optional)" },
                    "end_date": { "type": "string", "description": "End date in ISO 8601 format (optional)" }
                },
                "required": []
            }),
        ),
        ToolDefinition::new(
            "get_user_submissions",
            "Get all submissions for the current user in a specific course",
            course_id_schema(),
        ),
        ToolDefinition::new(
            "list_course_modules",
            "Get all modules and module items for a course",
            course_id_schema(),
        ),
        ToolDefinition::new(
            "list_upcoming_events",
            "Get upcoming events and assignments for the current user",
            empty_schema(),
        ),
        ToolDefinition::new(
            "get_course_analytics",
            "Get analytics data for a course (page views, participations, tardiness) - not available on every Canvas instance",
            course_id_schema(),
        ),
        ToolDefinition::new(
            "get_user_profile",
            "Get the current user's profile information",
            empty_schema(),
        ),
    ]
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
