//! Request dispatch and tool execution.

use chrono::Utc;
use serde_json::json;
use tracing::warn;

use courseflow_protocols::message::done_key;
use courseflow_protocols::tool::tool_catalog;
use courseflow_protocols::{Request, Response, ToolResult};
use courseflow_sync::digest::assignments_digest;

use crate::state::AppState;

/// Parse an incoming message. Unknown request tags get the explicit
/// unknown-type error; everything else malformed is a parse error.
pub fn parse_request(text: &str) -> Result<Request, Response> {
    serde_json::from_str(text).map_err(|e| {
        let message = e.to_string();
        if message.contains("unknown variant") {
            Response::error("UNKNOWN_TYPE", "Unknown message type")
        } else {
            Response::error("PARSE_ERROR", message)
        }
    })
}

/// Handle one request. Every arm resolves to a response; there is no
/// silent no-op path.
pub async fn dispatch(state: &AppState, request: Request) -> Response {
    match request {
        Request::GetData => {
            let (snapshot, cache_timestamp) = state.sync.get_data().await;
            Response::Data {
                snapshot,
                cache_timestamp,
            }
        }

        Request::RefreshData => {
            let report = state.sync.refresh().await;
            let (snapshot, _) = state.sync.get_data().await;
            Response::Refreshed { snapshot, report }
        }

        Request::GetStatus => {
            let (snapshot, _) = state.sync.get_data().await;
            Response::Status {
                tool_count: tool_catalog().len(),
                course_count: snapshot.courses.len(),
                last_update: snapshot.last_update,
                refreshing: state.sync.is_refreshing(),
            }
        }

        Request::ListTools => Response::Tools {
            tools: tool_catalog(),
        },

        Request::ToolCall { name, arguments } => Response::ToolOutput {
            result: execute_tool(state, &name, &arguments).await,
        },

        Request::GetPreferences => Response::Preferences {
            preferences: state.prefs.load().await,
        },

        Request::SetTimeRange {
            weeks_before,
            weeks_after,
        } => {
            if weeks_before > 52 || weeks_after == 0 || weeks_after > 52 {
                return Response::error(
                    "INVALID_RANGE",
                    "weeks_before must be 0-52 and weeks_after 1-52",
                );
            }
            if let Err(e) = state.prefs.set_time_range(weeks_before, weeks_after).await {
                warn!(error = %e, "failed to store time range");
            }
            Response::Ack
        }

        Request::SetAutoRefresh { enabled } => {
            if let Err(e) = state.prefs.set_auto_refresh(enabled).await {
                warn!(error = %e, "failed to store auto-refresh flag");
            }
            Response::Ack
        }

        Request::MarkDone {
            course_id,
            assignment_id,
        } => {
            if let Err(e) = state.prefs.mark_done(&done_key(&course_id, &assignment_id)).await {
                warn!(error = %e, "failed to store marked-done key");
            }
            Response::Ack
        }

        Request::UnmarkDone {
            course_id,
            assignment_id,
        } => {
            if let Err(e) = state
                .prefs
                .unmark_done(&done_key(&course_id, &assignment_id))
                .await
            {
                warn!(error = %e, "failed to remove marked-done key");
            }
            Response::Ack
        }

        Request::GeneratePlan { focus } => {
            let Some(advisor) = &state.advisor else {
                return Response::error("ADVISOR_UNCONFIGURED", "No advisor API key configured");
            };
            let prefs = state.prefs.load().await;
            let (snapshot, _) = state.sync.get_data().await;
            let digest = assignments_digest(
                &snapshot.all_assignments,
                Utc::now(),
                prefs.weeks_before,
                prefs.weeks_after,
            );
            match advisor.generate_plan(&digest, focus, Utc::now()).await {
                Ok(plan) => Response::Plan { plan },
                Err(e) => Response::error("ADVISOR_ERROR", e.to_string()),
            }
        }

        Request::TestNotification => {
            state.notify(
                "Courseflow Test Notification",
                "Notifications are working! You will receive deadline reminders based on your settings.",
                1,
            );
            Response::Ack
        }
    }
}

/// Execute one named tool: a thin wrapper over a single client operation,
/// packaged as a text-JSON envelope.
async fn execute_tool(state: &AppState, name: &str, arguments: &serde_json::Value) -> ToolResult {
    match name {
        "list_courses" => {
            let (snapshot, _) = state.sync.get_data().await;
            let courses = if snapshot.courses.is_empty() {
                match state.sync.client().courses().await {
                    Ok(courses) => {
                        state.sync.record_courses(courses.clone()).await;
                        courses
                    }
                    Err(e) => {
                        warn!(error = %e, "course fetch failed, serving empty list");
                        Vec::new()
                    }
                }
            } else {
                snapshot.courses
            };
            let (snapshot, _) = state.sync.get_data().await;
            let count = courses.len();
            ToolResult::success(&json!({
                "courses": courses,
                "count": count,
                "lastUpdate": snapshot.last_update,
            }))
        }

        "get_course_assignments" => {
            let Some(course_id) = string_arg(arguments, "course_id") else {
                return ToolResult::error("course_id required");
            };
            let (snapshot, _) = state.sync.get_data().await;
            let cached = snapshot
                .assignments
                .get(&course_id)
                .filter(|list| !list.is_empty())
                .cloned();
            let assignments = match cached {
                Some(assignments) => assignments,
                None => {
                    let course_name = course_name_for(state, &course_id).await;
                    match state
                        .sync
                        .client()
                        .course_assignments(&course_id, &course_name)
                        .await
                    {
                        Ok(assignments) => {
                            state
                                .sync
                                .record_course_assignments(&course_id, assignments.clone())
                                .await;
                            assignments
                        }
                        Err(e) => {
                            warn!(error = %e, course_id, "assignment fetch failed, serving empty list");
                            Vec::new()
                        }
                    }
                }
            };
            let count = assignments.len();
            ToolResult::success(&json!({
                "courseId": course_id,
                "assignments": assignments,
                "count": count,
            }))
        }

        "list_all_assignments" => match state.sync.refresh_all_assignments().await {
            Ok(assignments) => {
                let count = assignments.len();
                ToolResult::success(&json!({
                    "assignments": assignments,
                    "count": count,
                    "fetchedAt": Utc::now(),
                }))
            }
            Err(e) => ToolResult::error(e.to_string()),
        },

        "get_assignment_details" => {
            let (Some(course_id), Some(assignment_id)) = (
                string_arg(arguments, "course_id"),
                string_arg(arguments, "assignment_id"),
            ) else {
                return ToolResult::error("course_id and assignment_id required");
            };
            let course_name = course_name_for(state, &course_id).await;
            match state
                .sync
                .client()
                .assignment_detail(&course_id, &assignment_id, &course_name)
                .await
            {
                Ok(detail) => ToolResult::success(&detail),
                Err(e) => ToolResult::error(e.to_string()),
            }
        }

        "list_calendar_events" => {
            let start = string_arg(arguments, "start_date");
            let end = string_arg(arguments, "end_date");
            match state
                .sync
                .client()
                .calendar_events(start.as_deref(), end.as_deref())
                .await
            {
                Ok(events) => {
                    let count = events.len();
                    ToolResult::success(&json!({
                        "events": events,
                        "count": count,
                        "dateRange": {
                            "start": start.unwrap_or_else(|| "Not specified".to_string()),
                            "end": end.unwrap_or_else(|| "Not specified".to_string()),
                        },
                    }))
                }
                Err(e) => ToolResult::error(e.to_string()),
            }
        }

        "get_user_submissions" => {
            let Some(course_id) = string_arg(arguments, "course_id") else {
                return ToolResult::error("course_id required");
            };
            match state.sync.client().user_submissions(&course_id).await {
                Ok(submissions) => {
                    state
                        .sync
                        .record_submissions(&course_id, submissions.clone())
                        .await;
                    let count = submissions.len();
                    ToolResult::success(&json!({
                        "courseId": course_id,
                        "submissions": submissions,
                        "count": count,
                    }))
                }
                Err(e) => ToolResult::error(e.to_string()),
            }
        }

        "list_course_modules" => {
            let Some(course_id) = string_arg(arguments, "course_id") else {
                return ToolResult::error("course_id required");
            };
            match state.sync.client().course_modules(&course_id).await {
                Ok(modules) => {
                    state.sync.record_modules(&course_id, modules.clone()).await;
                    let count = modules.len();
                    ToolResult::success(&json!({
                        "courseId": course_id,
                        "modules": modules,
                        "count": count,
                    }))
                }
                Err(e) => ToolResult::error(e.to_string()),
            }
        }

        "list_upcoming_events" => match state.sync.client().upcoming_events().await {
            Ok(events) => {
                state.sync.record_upcoming_events(events.clone()).await;
                let count = events.len();
                ToolResult::success(&json!({
                    "upcomingEvents": events,
                    "count": count,
                }))
            }
            Err(e) => ToolResult::error(e.to_string()),
        },

        "get_course_analytics" => {
            let Some(course_id) = string_arg(arguments, "course_id") else {
                return ToolResult::error("course_id required");
            };
            match state.sync.client().course_analytics(&course_id).await {
                Ok(analytics) => {
                    state.sync.record_analytics(&course_id, analytics.clone()).await;
                    ToolResult::success(&analytics)
                }
                // Analytics are missing on many instances; that is a note,
                // not a failure.
                Err(_) => ToolResult::success(&json!({
                    "courseId": course_id,
                    "note": "Analytics data not available for this Canvas instance or course",
                })),
            }
        }

        "get_user_profile" => match state.sync.client().user_profile().await {
            Ok(profile) => ToolResult::success(&profile),
            Err(e) => ToolResult::error(e.to_string()),
        },

        other => ToolResult::error(format!("Unknown tool: {other}")),
    }
}

fn string_arg(arguments: &serde_json::Value, key: &str) -> Option<String> {
    arguments.get(key).and_then(|v| v.as_str()).map(String::from)
}

async fn course_name_for(state: &AppState, course_id: &str) -> String {
    let (snapshot, _) = state.sync.get_data().await;
    snapshot
        .courses
        .iter()
        .find(|c| c.id == course_id)
        .map(|c| c.name.clone())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
