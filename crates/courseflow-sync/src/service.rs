//! The snapshot service.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};

use courseflow_cache::SnapshotStore;
use courseflow_client::CanvasClient;
use courseflow_protocols::model::{
    Assignment, Course, CourseAnalytics, CourseModule, UpcomingEvent, UserSubmission,
};
use courseflow_protocols::{ClientError, RefreshReport, Snapshot, SyncOutcome};

/// Owns the one mutable [`Snapshot`] in the process and mediates every
/// read, refresh, and persist.
///
/// There is no refresh lock: a second refresh triggered while one is in
/// flight simply races it, and the last merge to finish wins the cache
/// write. That race is part of the contract.
pub struct SyncService {
    client: Arc<CanvasClient>,
    store: Arc<dyn SnapshotStore>,
    snapshot: RwLock<Snapshot>,
    cache_stamp: RwLock<Option<DateTime<Utc>>>,
    refreshing: AtomicBool,
}

struct AssignmentFanOut {
    flattened: Vec<Assignment>,
    per_course: HashMap<String, Vec<Assignment>>,
}

impl SyncService {
    pub fn new(client: Arc<CanvasClient>, store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            client,
            store,
            snapshot: RwLock::new(Snapshot::default()),
            cache_stamp: RwLock::new(None),
            refreshing: AtomicBool::new(false),
        }
    }

    /// Attempt to rehydrate the snapshot from the persistent cache.
    /// Returns whether anything was restored; failures are non-fatal.
    pub async fn restore(&self) -> bool {
        match self.store.load().await {
            Ok(Some(cached)) => {
                info!(last_update = ?cached.snapshot.last_update, "snapshot restored from cache");
                *self.snapshot.write().await = cached.snapshot;
                *self.cache_stamp.write().await = Some(cached.cache_timestamp);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "failed to restore snapshot cache");
                false
            }
        }
    }

    /// The cached snapshot and the time it was last persisted.
    pub async fn get_data(&self) -> (Snapshot, Option<DateTime<Utc>>) {
        let snapshot = self.snapshot.read().await.clone();
        let stamp = *self.cache_stamp.read().await;
        (snapshot, stamp)
    }

    /// Whether a refresh cycle is currently in flight. The only
    /// externally observable intermediate state.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::SeqCst)
    }

    /// Run one full refresh cycle. Never fails: each fetch kind is
    /// independently guarded and a failed kind keeps the previous data.
    pub async fn refresh(&self) -> RefreshReport {
        self.refreshing.store(true, Ordering::SeqCst);
        let report = self.refresh_inner().await;
        self.refreshing.store(false, Ordering::SeqCst);
        report
    }

    async fn refresh_inner(&self) -> RefreshReport {
        let (courses_res, fanout_res, calendar_res, upcoming_res, profile_res) = tokio::join!(
            self.client.courses(),
            self.fetch_all_assignments(),
            self.client.calendar_events(None, None),
            self.client.upcoming_events(),
            self.client.user_profile(),
        );

        let report;
        {
            let mut snapshot = self.snapshot.write().await;

            let courses = match courses_res {
                Ok(courses) if !courses.is_empty() => {
                    let count = courses.len();
                    snapshot.courses = courses;
                    SyncOutcome::applied(count)
                }
                Ok(_) => SyncOutcome::kept("empty result"),
                Err(e) => kept_for(&e),
            };

            let all_assignments = match fanout_res {
                Ok(fanout) if !fanout.flattened.is_empty() => {
                    let count = fanout.flattened.len();
                    snapshot.all_assignments = fanout.flattened;
                    // Per-key merge: fetched courses overwrite their map
                    // entry (empty lists included), unfetched keys remain.
                    snapshot.assignments.extend(fanout.per_course);
                    SyncOutcome::applied(count)
                }
                Ok(_) => SyncOutcome::kept("empty result"),
                Err(e) => kept_for(&e),
            };

            let calendar_events = match calendar_res {
                Ok(events) if !events.is_empty() => {
                    let count = events.len();
                    snapshot.calendar_events = events;
                    SyncOutcome::applied(count)
                }
                Ok(_) => SyncOutcome::kept("empty result"),
                Err(e) => kept_for(&e),
            };

            let upcoming_events = match upcoming_res {
                Ok(events) if !events.is_empty() => {
                    let count = events.len();
                    snapshot.upcoming_events = events;
                    SyncOutcome::applied(count)
                }
                Ok(_) => SyncOutcome::kept("empty result"),
                Err(e) => kept_for(&e),
            };

            let user_profile = match profile_res {
                Ok(profile) => {
                    snapshot.user_profile = Some(profile);
                    SyncOutcome::applied(1)
                }
                Err(e) => kept_for(&e),
            };

            report = RefreshReport {
                courses,
                all_assignments,
                calendar_events,
                upcoming_events,
                user_profile,
            };

            if report.any_applied() {
                snapshot.last_update = Some(Utc::now());
            }
        }

        self.persist_best_effort().await;
        report
    }

    /// The secondary aggregation behind `all_assignments`: list courses,
    /// then fetch each course's assignments, continuing past individual
    /// course failures.
    async fn fetch_all_assignments(&self) -> Result<AssignmentFanOut, ClientError> {
        let courses = self.client.courses().await?;

        let mut flattened = Vec::new();
        let mut per_course = HashMap::new();
        for course in &courses {
            match self
                .client
                .course_assignments(&course.id, &course.name)
                .await
            {
                Ok(assignments) => {
                    flattened.extend(assignments.iter().cloned());
                    per_course.insert(course.id.clone(), assignments);
                }
                Err(e) => {
                    warn!(course_id = %course.id, error = %e, "course assignment fetch failed, continuing");
                    per_course.insert(course.id.clone(), Vec::new());
                }
            }
        }

        Ok(AssignmentFanOut {
            flattened,
            per_course,
        })
    }

    /// Re-run the all-assignments fan-out on demand (tool path) and merge
    /// the result with the usual non-clobbering rule. Returns the freshly
    /// fetched flattened list, which may be empty.
    pub async fn refresh_all_assignments(&self) -> Result<Vec<Assignment>, ClientError> {
        let fanout = self.fetch_all_assignments().await?;
        let flattened = fanout.flattened.clone();
        if !flattened.is_empty() {
            {
                let mut snapshot = self.snapshot.write().await;
                snapshot.all_assignments = fanout.flattened;
                snapshot.assignments.extend(fanout.per_course);
                snapshot.last_update = Some(Utc::now());
            }
            self.persist_best_effort().await;
        }
        Ok(flattened)
    }

    /// Record an upcoming-events fetch from the tool path.
    pub async fn record_upcoming_events(&self, events: Vec<UpcomingEvent>) {
        if events.is_empty() {
            return;
        }
        {
            let mut snapshot = self.snapshot.write().await;
            snapshot.upcoming_events = events;
            snapshot.last_update = Some(Utc::now());
        }
        self.persist_best_effort().await;
    }

    /// Record a per-course assignment fetch from the tool path into the
    /// legacy map.
    pub async fn record_course_assignments(&self, course_id: &str, assignments: Vec<Assignment>) {
        self.snapshot
            .write()
            .await
            .assignments
            .insert(course_id.to_string(), assignments);
        self.persist_best_effort().await;
    }

    /// Record a course list fetched on demand by the courses tool.
    pub async fn record_courses(&self, courses: Vec<Course>) {
        if courses.is_empty() {
            return;
        }
        {
            let mut snapshot = self.snapshot.write().await;
            snapshot.courses = courses;
            snapshot.last_update = Some(Utc::now());
        }
        self.persist_best_effort().await;
    }

    pub async fn record_submissions(&self, course_id: &str, submissions: Vec<UserSubmission>) {
        self.snapshot
            .write()
            .await
            .submissions
            .insert(course_id.to_string(), submissions);
        self.persist_best_effort().await;
    }

    pub async fn record_modules(&self, course_id: &str, modules: Vec<CourseModule>) {
        self.snapshot
            .write()
            .await
            .modules
            .insert(course_id.to_string(), modules);
        self.persist_best_effort().await;
    }

    pub async fn record_analytics(&self, course_id: &str, analytics: CourseAnalytics) {
        self.snapshot
            .write()
            .await
            .analytics
            .insert(course_id.to_string(), analytics);
        self.persist_best_effort().await;
    }

    /// The remote client, for tool handlers that call single operations.
    pub fn client(&self) -> &CanvasClient {
        &self.client
    }

    async fn persist_best_effort(&self) {
        let snapshot = self.snapshot.read().await.clone();
        match self.store.save(&snapshot).await {
            Ok(()) => {
                *self.cache_stamp.write().await = Some(Utc::now());
            }
            Err(e) => {
                warn!(error = %e, "failed to persist snapshot, continuing with in-memory data");
            }
        }
    }
}

fn kept_for(error: &ClientError) -> SyncOutcome {
    warn!(error = %error, "fetch failed, keeping previous data");
    SyncOutcome::kept(error.to_string())
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
