//! Canvas API operations.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use courseflow_protocols::model::{
    Assignment, AssignmentDetail, CalendarEvent, Course, CourseAnalytics, CourseModule,
    UpcomingEvent, UserProfile, UserSubmission,
};
use courseflow_protocols::ClientError;

use crate::normalize::{
    normalize_analytics, normalize_assignment, normalize_assignment_detail,
    normalize_calendar_event, normalize_course, normalize_module, normalize_profile,
    normalize_upcoming_event, normalize_user_submission,
};
use crate::pagination::parse_next_link;
use crate::raw::{
    RawAnalytics, RawAssignment, RawCalendarEvent, RawCourse, RawModule, RawProfile,
    RawUserSubmission,
};
use crate::transport::{Transport, TransportResponse};

const API_BASE: &str = "/api/v1";

/// Hard ceiling on page requests per paginated fetch, regardless of what
/// the upstream `Link` headers claim.
const MAX_PAGES: usize = 10;

/// High-level Canvas operations over an injected [`Transport`].
pub struct CanvasClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    page_size: u32,
}

impl CanvasClient {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>, page_size: u32) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            page_size,
        }
    }

    /// Follow `rel="next"` links until the accumulated count reaches
    /// `max_items`, no next link is present, or [`MAX_PAGES`] pages have
    /// been fetched.
    ///
    /// A failure on the first page is a typed error; once at least one
    /// page has been accumulated, later failures log and return the
    /// partial result.
    pub async fn fetch_paginated(
        &self,
        path: &str,
        max_items: usize,
    ) -> Result<Vec<Value>, ClientError> {
        let mut results: Vec<Value> = Vec::new();
        let mut next_url = Some(path.to_string());
        let mut page_count = 0usize;

        while let Some(url) = next_url.take() {
            if results.len() >= max_items || page_count >= MAX_PAGES {
                break;
            }

            let page = match self.fetch_page(&url).await {
                Ok(page) => page,
                Err(e) if results.is_empty() => return Err(e),
                Err(e) => {
                    warn!(error = %e, page = page_count + 1, "pagination aborted, returning partial result");
                    break;
                }
            };

            match page.data {
                Value::Array(items) => results.extend(items),
                Value::Null => {}
                single => results.push(single),
            }

            next_url = page.next_url;
            page_count += 1;
        }

        results.truncate(max_items);
        Ok(results)
    }

    async fn fetch_page(&self, url: &str) -> Result<Page, ClientError> {
        let response = self.transport.get(url).await?;
        if !response.is_success() {
            return Err(http_error(&response));
        }
        let data: Value = serde_json::from_str(&response.body)
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        let next_url = response.link_header.as_deref().and_then(parse_next_link);
        Ok(Page { data, next_url })
    }

    /// Fetch a single-object endpoint.
    async fn fetch_one(&self, path: &str) -> Result<Value, ClientError> {
        let response = self.transport.get(path).await?;
        if !response.is_success() {
            return Err(http_error(&response));
        }
        serde_json::from_str(&response.body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Active course enrollments.
    pub async fn courses(&self) -> Result<Vec<Course>, ClientError> {
        let path = format!(
            "{API_BASE}/courses?enrollment_state=active&completed=false&include[]=term&per_page={}",
            self.page_size
        );
        let records = self.fetch_paginated(&path, 200).await?;
        Ok(parse_records::<RawCourse>(records)
            .map(|raw| normalize_course(raw, &self.base_url))
            .collect())
    }

    /// Assignments for one course, with the user's submission embedded.
    pub async fn course_assignments(
        &self,
        course_id: &str,
        course_name: &str,
    ) -> Result<Vec<Assignment>, ClientError> {
        let path = format!(
            "{API_BASE}/courses/{course_id}/assignments?include[]=submission&per_page={}",
            self.page_size
        );
        let records = self.fetch_paginated(&path, 100).await?;
        Ok(parse_records::<RawAssignment>(records)
            .map(|raw| normalize_assignment(raw, course_id, course_name, &self.base_url))
            .collect())
    }

    /// Full detail for one assignment, including description and rubric.
    pub async fn assignment_detail(
        &self,
        course_id: &str,
        assignment_id: &str,
        course_name: &str,
    ) -> Result<AssignmentDetail, ClientError> {
        let path = format!(
            "{API_BASE}/courses/{course_id}/assignments/{assignment_id}?include[]=submission&include[]=rubric_assessment"
        );
        let value = self.fetch_one(&path).await?;
        let raw: RawAssignment =
            serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(normalize_assignment_detail(
            raw,
            course_id,
            course_name,
            &self.base_url,
        ))
    }

    /// Calendar entries, optionally bounded to an ISO-8601 date range.
    pub async fn calendar_events(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<CalendarEvent>, ClientError> {
        let mut path = format!(
            "{API_BASE}/calendar_events?type=assignment&type=event&per_page={}",
            self.page_size
        );
        if let Some(start) = start_date {
            path.push_str(&format!("&start_date={start}"));
        }
        if let Some(end) = end_date {
            path.push_str(&format!("&end_date={end}"));
        }
        let records = self.fetch_paginated(&path, 200).await?;
        Ok(parse_records::<RawCalendarEvent>(records)
            .map(normalize_calendar_event)
            .collect())
    }

    /// The user's own submissions in one course.
    pub async fn user_submissions(
        &self,
        course_id: &str,
    ) -> Result<Vec<UserSubmission>, ClientError> {
        let path = format!(
            "{API_BASE}/courses/{course_id}/students/submissions?student_ids[]=self&include[]=assignment&per_page={}",
            self.page_size
        );
        let records = self.fetch_paginated(&path, 200).await?;
        Ok(parse_records::<RawUserSubmission>(records)
            .map(normalize_user_submission)
            .collect())
    }

    /// Modules and module items for one course.
    pub async fn course_modules(&self, course_id: &str) -> Result<Vec<CourseModule>, ClientError> {
        let path = format!(
            "{API_BASE}/courses/{course_id}/modules?include[]=items&per_page={}",
            self.page_size
        );
        let records = self.fetch_paginated(&path, 100).await?;
        Ok(parse_records::<RawModule>(records)
            .map(normalize_module)
            .collect())
    }

    /// The user's upcoming-events feed. A non-array response is treated as
    /// an empty feed.
    pub async fn upcoming_events(&self) -> Result<Vec<UpcomingEvent>, ClientError> {
        let value = self.fetch_one(&format!("{API_BASE}/users/self/upcoming_events")).await?;
        let Value::Array(items) = value else {
            return Ok(Vec::new());
        };
        Ok(parse_records::<RawCalendarEvent>(items)
            .map(normalize_upcoming_event)
            .collect())
    }

    /// Per-course analytics. Not exposed by every Canvas instance; callers
    /// degrade on error.
    pub async fn course_analytics(
        &self,
        course_id: &str,
    ) -> Result<CourseAnalytics, ClientError> {
        let path = format!("{API_BASE}/courses/{course_id}/analytics/student_summaries/self");
        let value = self.fetch_one(&path).await?;
        let raw: RawAnalytics =
            serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(normalize_analytics(raw, course_id))
    }

    /// The current user's profile.
    pub async fn user_profile(&self) -> Result<UserProfile, ClientError> {
        let value = self.fetch_one(&format!("{API_BASE}/users/self/profile")).await?;
        let raw: RawProfile =
            serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(normalize_profile(raw))
    }
}

struct Page {
    data: Value,
    next_url: Option<String>,
}

fn http_error(response: &TransportResponse) -> ClientError {
    let message = if response.body.is_empty() {
        "upstream error".to_string()
    } else {
        response.body.chars().take(200).collect()
    };
    ClientError::Http {
        status: response.status,
        message,
    }
}

fn parse_records<T: DeserializeOwned>(records: Vec<Value>) -> impl Iterator<Item = T> {
    records.into_iter().filter_map(|value| {
        match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "skipping malformed record");
                None
            }
        }
    })
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
