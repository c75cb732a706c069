use super::*;

#[test]
fn test_catalog_has_ten_tools() {
    assert_eq!(tool_catalog().len(), 10);
}

#[test]
fn test_catalog_names_are_unique() {
    let catalog = tool_catalog();
    let mut names: Vec<&str> = catalog.iter().map(|t| t.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), catalog.len());
}

#[test]
fn test_course_scoped_tools_require_course_id() {
    let catalog = tool_catalog();
    for name in [
        "get_course_assignments",
        "get_user_submissions",
        "list_course_modules",
        "get_course_analytics",
    ] {
        let tool = catalog.iter().find(|t| t.name == name).unwrap();
        let required = tool.input_schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "course_id"), "{name}");
    }
}

#[test]
fn test_assignment_details_requires_both_ids() {
    let catalog = tool_catalog();
    let tool = catalog
        .iter()
        .find(|t| t.name == "get_assignment_details")
        .unwrap();
    let required = tool.input_schema["required"].as_array().unwrap();
    assert_eq!(required.len(), 2);
}

#[test]
fn test_tool_result_success_is_pretty_json() {
    let result = ToolResult::success(&serde_json::json!({ "count": 3 }));
    assert!(result.success);
    assert!(result.content.contains("\"count\": 3"));
    assert!(result.error.is_none());
}

#[test]
fn test_tool_result_error() {
    let result = ToolResult::error("HTTP 401: Unauthorized");
    assert!(!result.success);
    assert!(result.content.is_empty());
    assert_eq!(result.error.as_deref(), Some("HTTP 401: Unauthorized"));
}

#[test]
fn test_definition_serializes_camel_case() {
    let json = serde_json::to_value(&tool_catalog()[0]).unwrap();
    assert!(json.get("inputSchema").is_some());
}
