//! Study-plan types returned by the advisor.
//!
//! Field names here match the JSON schema handed to the model verbatim
//! (snake_case), so the model's output parses directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The snapshot subset serialized into the advisor prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentsDigest {
    pub total_assignments: usize,
    pub courses: Vec<String>,
    pub upcoming: Vec<DigestItem>,
    pub overdue: Vec<DigestItem>,
    pub completed: usize,
}

/// One assignment as presented to the advisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestItem {
    pub id: String,
    pub name: String,
    pub course: String,
    pub due_date: Option<DateTime<Utc>>,
    pub points: Option<f64>,
}

/// Which surface the plan is generated for. The dashboard variant adds the
/// 7-day schedule and gets a larger output budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanFocus {
    #[default]
    Sidepanel,
    Dashboard,
}

/// A generated study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub priority_tasks: Vec<PriorityTask>,
    pub workload_assessment: WorkloadAssessment,
    #[serde(default)]
    pub weekly_plan: Vec<DayPlan>,
    #[serde(default)]
    pub study_tips: Vec<String>,
}

/// One prioritized assignment with the model's reasoning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityTask {
    pub task: String,
    pub reason: String,
    /// 0=manageable, 1=moderate, 2=high, 3=critical.
    pub urgency_score: u8,
    pub estimated_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ui_tags: Vec<String>,
}

/// Overall workload summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadAssessment {
    pub overall: String,
    pub total_hours_needed: f64,
    /// 0=manageable, 1=moderate, 2=high, 3=extreme.
    pub intensity_score: u8,
    pub recommendations: Vec<String>,
}

/// One day of the dashboard's 7-day schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: String,
    pub focus: String,
    /// 0=light, 1=moderate, 2=heavy, 3=extreme.
    pub workload_score: u8,
    #[serde(default)]
    pub tasks: Vec<StudyBlock>,
}

/// A scheduled study block within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyBlock {
    pub assignment: String,
    /// Starting hour in 24-hour format.
    pub start_hour: u8,
    pub duration_hours: f64,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_focus_default_is_sidepanel() {
        assert_eq!(PlanFocus::default(), PlanFocus::Sidepanel);
    }

    #[test]
    fn test_plan_focus_serialization() {
        assert_eq!(
            serde_json::to_string(&PlanFocus::Dashboard).unwrap(),
            "\"dashboard\""
        );
    }

    #[test]
    fn test_study_plan_parses_sidepanel_shape() {
        // The sidepanel schema has no weekly_plan.
        let json = serde_json::json!({
            "priority_tasks": [{
                "assignment_id": "42",
                "task": "Finish Problem Set 3",
                "reason": "Due tomorrow, worth 50 points",
                "ui_tags": ["Project", "50 pts"],
                "urgency_score": 2,
                "estimated_hours": 3.0
            }],
            "workload_assessment": {
                "overall": "A heavy week with two major deadlines.",
                "total_hours_needed": 12.5,
                "intensity_score": 2,
                "recommendations": ["Start the essay early", "Block out Sunday morning"]
            },
            "study_tips": ["Work in 50-minute blocks"]
        });
        let plan: StudyPlan = serde_json::from_value(json).unwrap();
        assert_eq!(plan.priority_tasks.len(), 1);
        assert_eq!(plan.priority_tasks[0].urgency_score, 2);
        assert!(plan.weekly_plan.is_empty());
    }

    #[test]
    fn test_study_plan_parses_dashboard_shape() {
        let json = serde_json::json!({
            "priority_tasks": [{
                "task": "Essay draft",
                "reason": "Overdue",
                "urgency_score": 3,
                "estimated_hours": 4.0
            }],
            "workload_assessment": {
                "overall": "Manageable.",
                "total_hours_needed": 6.0,
                "intensity_score": 1,
                "recommendations": ["Keep momentum"]
            },
            "weekly_plan": [{
                "day": "Monday, Nov 18",
                "focus": "Catch up on overdue work",
                "workload_score": 2,
                "tasks": [{
                    "assignment": "Essay draft",
                    "start_hour": 18,
                    "duration_hours": 2.0,
                    "notes": "Outline first, then write"
                }]
            }],
            "study_tips": ["Sleep"]
        });
        let plan: StudyPlan = serde_json::from_value(json).unwrap();
        assert_eq!(plan.weekly_plan.len(), 1);
        assert_eq!(plan.weekly_plan[0].tasks[0].start_hour, 18);
    }
}
