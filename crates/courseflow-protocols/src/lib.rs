//! # Courseflow Protocols
//!
//! Shared type definitions for the courseflow workspace: the normalized
//! Canvas data model, the aggregated [`Snapshot`], the tagged message
//! contract spoken by UI surfaces, tool definitions, and error types.
//! Contains no I/O - implementations live in the sibling crates.

pub mod error;
pub mod message;
pub mod model;
pub mod plan;
pub mod snapshot;
pub mod tool;

pub use error::{AdvisorError, CacheError, ClientError};
pub use message::{done_key, Preferences, Request, Response};
pub use model::{
    Assignment, AssignmentDetail, CalendarEvent, Course, CourseAnalytics, CourseModule,
    EventAssignment, ModuleItem, Submission, UpcomingEvent, UserProfile, UserSubmission,
};
pub use plan::{AssignmentsDigest, DigestItem, PlanFocus, StudyPlan};
pub use snapshot::{CachedSnapshot, RefreshReport, Snapshot, SyncOutcome};
pub use tool::{ToolDefinition, ToolResult};
