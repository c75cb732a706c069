//! Prompt and schema assembly.

use chrono::{DateTime, Utc};
use serde_json::json;

use courseflow_protocols::plan::{AssignmentsDigest, DigestItem, PlanFocus};

const UPCOMING_CAP: usize = 8;
const OVERDUE_CAP: usize = 5;

/// Build the user prompt from the digest.
pub fn build_prompt(digest: &AssignmentsDigest, focus: PlanFocus, now: DateTime<Utc>) -> String {
    let today = now.format("%A, %B %-d, %Y").to_string();
    let plan_name = match focus {
        PlanFocus::Dashboard => "7-day Weekly Battle Plan",
        PlanFocus::Sidepanel => "Weekly Battle Plan",
    };

    let mut prompt = format!(
        "Analyze this student's Canvas assignments and create a {plan_name}.\n\n\
         TODAY'S DATE: {today}\n\n\
         Current Status:\n\
         - Total Assignments: {}\n\
         - Courses: {}\n\
         - Due this week: {}\n\
         - Overdue: {}\n\
         - Completed: {}\n\n\
         Upcoming Assignments (next 7 days):\n{}\n\n\
         Overdue Assignments:\n{}",
        digest.total_assignments,
        digest.courses.join(", "),
        digest.upcoming.len(),
        digest.overdue.len(),
        digest.completed,
        format_items(&digest.upcoming, UPCOMING_CAP, "Due"),
        format_items(&digest.overdue, OVERDUE_CAP, "Was due"),
    );

    match focus {
        PlanFocus::Dashboard => {
            prompt.push_str(&format!(
                "\n\nCreate a realistic 7-day plan starting from TODAY ({today}).\n\
                 The first day should be {} (today).\n\
                 Use 24-hour format for times (0-23). Be practical with time estimates and daily schedules.",
                today.split(',').next().unwrap_or(&today)
            ));
        }
        PlanFocus::Sidepanel => {
            prompt.push_str(
                "\n\nProvide practical, actionable advice. Be realistic with time estimates. \
                 Keep it concise for a sidepanel view.",
            );
        }
    }

    prompt
}

fn format_items(items: &[DigestItem], cap: usize, due_label: &str) -> String {
    items
        .iter()
        .take(cap)
        .map(|item| {
            let due = item
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "no due date".to_string());
            let points = item
                .points
                .map(|p| p.to_string())
                .unwrap_or_else(|| "?".to_string());
            format!(
                "- {} ({}) - {}: {}, {} points",
                item.name, item.course, due_label, due, points
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The instruction block appended after the prompt so the model emits
/// schema-conforming JSON.
pub fn schema_instruction(focus: PlanFocus) -> String {
    let schema = plan_schema(focus);
    format!(
        "You must respond with valid JSON matching this exact schema:\n\n{}\n\n\
         Important:\n\
         - Return ONLY the JSON object, no other text\n\
         - Do not wrap in markdown code blocks\n\
         - Ensure all required fields are present\n\
         - Use the exact field names specified",
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    )
}

/// The output schema for the given surface. The sidepanel variant tags
/// each priority task with its assignment id; the dashboard variant adds
/// the 7-day schedule.
pub fn plan_schema(focus: PlanFocus) -> serde_json::Value {
    let priority_items = match focus {
        PlanFocus::Sidepanel => json!({
            "type": "object",
            "properties": {
                "assignment_id": { "type": "string", "description": "Canvas assignment ID to map this insight to the actual assignment" },
                "task": { "type": "string", "description": "Assignment name and action (max 150 chars)" },
                "reason": { "type": "string", "description": "Why prioritized (max 200 chars)" },
                "ui_tags": { "type": "array", "items": { "type": "string" }, "description": "Provide exactly 2 short action tags, each under 15 chars" },
                "urgency_score": { "type": "integer", "description": "0=manageable, 1=moderate, 2=high, 3=critical" },
                "estimated_hours": { "type": "number", "description": "Estimated hours (0.5 to 8)" }
            },
            "required": ["assignment_id", "task", "reason", "ui_tags", "urgency_score", "estimated_hours"],
            "additionalProperties": false
        }),
        PlanFocus::Dashboard => json!({
            "type": "object",
            "properties": {
                "task": { "type": "string", "description": "Assignment name and action (max 150 chars)" },
                "reason": { "type": "string", "description": "Why prioritized (max 200 chars)" },
                "urgency_score": { "type": "integer", "description": "0=manageable, 1=moderate, 2=high, 3=critical" },
                "estimated_hours": { "type": "number", "description": "Estimated hours (0.5 to 8)" }
            },
            "required": ["task", "reason", "urgency_score", "estimated_hours"],
            "additionalProperties": false
        }),
    };

    let mut properties = json!({
        "priority_tasks": {
            "type": "array",
            "description": "Top priority assignments (1-8 items)",
            "minItems": 1,
            "items": priority_items
        },
        "workload_assessment": {
            "type": "object",
            "description": "Overall workload assessment",
            "properties": {
                "overall": { "type": "string", "description": "One sentence summary (max 200 chars)" },
                "total_hours_needed": { "type": "number", "description": "Total estimated hours" },
                "intensity_score": { "type": "integer", "description": "0=manageable, 1=moderate, 2=high, 3=extreme" },
                "recommendations": { "type": "array", "minItems": 1, "items": { "type": "string" }, "description": "Recommendations (2-5 items, max 150 chars each)" }
            },
            "required": ["overall", "total_hours_needed", "intensity_score", "recommendations"],
            "additionalProperties": false
        },
        "study_tips": {
            "type": "array",
            "description": "Study tips (3-5 items, max 150 chars each)",
            "minItems": 1,
            "items": { "type": "string" }
        }
    });

    let mut required = vec!["priority_tasks", "workload_assessment", "study_tips"];

    if focus == PlanFocus::Dashboard {
        properties["weekly_plan"] = json!({
            "type": "array",
            "description": "7-day study schedule (provide exactly 7 days)",
            "minItems": 1,
            "items": {
                "type": "object",
                "properties": {
                    "day": { "type": "string", "description": "Day with date, e.g. 'Monday, Nov 18' (max 50 chars)" },
                    "focus": { "type": "string", "description": "Main goal for the day (max 100 chars)" },
                    "workload_score": { "type": "integer", "description": "0=light, 1=moderate, 2=heavy, 3=extreme" },
                    "tasks": {
                        "type": "array",
                        "description": "Scheduled study blocks (0-6 items)",
                        "items": {
                            "type": "object",
                            "properties": {
                                "assignment": { "type": "string", "description": "Assignment or activity (max 100 chars)" },
                                "start_hour": { "type": "integer", "description": "Starting hour (0-23)" },
                                "duration_hours": { "type": "number", "description": "Duration in hours (0.5-8)" },
                                "notes": { "type": "string", "description": "Session guidance (max 150 chars)" }
                            },
                            "required": ["assignment", "start_hour", "duration_hours", "notes"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["day", "focus", "workload_score", "tasks"],
                "additionalProperties": false
            }
        });
        required.insert(2, "weekly_plan");
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

/// Strip optional markdown code fences from model output.
pub fn strip_code_fences(content: &str) -> &str {
    let mut text = content.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
