//! Deadline buckets and the reminder policy.
//!
//! Computed from `all_assignments` on a timer tick; the resulting notices
//! are broadcast to connected UI surfaces. There is no OS notification
//! integration.

use chrono::{DateTime, Duration, Timelike, Utc};

use courseflow_protocols::model::Assignment;

/// How eagerly reminders fire. Mirrors the user-facing setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Minimal,
    Balanced,
    Aggressive,
}

/// A reminder ready to broadcast.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadlineNotice {
    pub title: String,
    pub body: String,
    pub priority: u8,
}

/// Unsubmitted assignments with due dates, split by urgency. Buckets may
/// overlap: something due in two hours is both due-today and due-soon.
#[derive(Debug, Default)]
pub struct DeadlineBuckets {
    pub overdue: Vec<Assignment>,
    pub due_today: Vec<Assignment>,
    pub due_tomorrow: Vec<Assignment>,
    pub due_soon: Vec<Assignment>,
}

/// Split the unsubmitted, dated assignments into deadline buckets.
pub fn deadline_buckets(assignments: &[Assignment], now: DateTime<Utc>) -> DeadlineBuckets {
    let mut buckets = DeadlineBuckets::default();
    let today = now.date_naive();
    let tomorrow = (now + Duration::days(1)).date_naive();

    for assignment in assignments {
        if assignment.is_submitted() {
            continue;
        }
        let Some(due) = assignment.due_date else {
            continue;
        };

        if due < now {
            buckets.overdue.push(assignment.clone());
            continue;
        }
        if due.date_naive() == today {
            buckets.due_today.push(assignment.clone());
        }
        if due.date_naive() == tomorrow {
            buckets.due_tomorrow.push(assignment.clone());
        }
        let hours_until_due = (due - now).num_minutes() as f64 / 60.0;
        if hours_until_due > 0.0 && hours_until_due <= 3.0 {
            buckets.due_soon.push(assignment.clone());
        }
    }

    buckets
}

/// Whether `now` falls inside the quiet-hours window. The window may span
/// midnight ("22:00" to "08:00"). Unparseable settings disable quiet
/// hours.
pub fn in_quiet_hours(now: DateTime<Utc>, start: &str, end: &str) -> bool {
    let (Some(start_minutes), Some(end_minutes)) = (parse_hhmm(start), parse_hhmm(end)) else {
        return false;
    };
    let current = now.hour() * 60 + now.minute();

    if start_minutes > end_minutes {
        current >= start_minutes || current < end_minutes
    } else {
        current >= start_minutes && current < end_minutes
    }
}

fn parse_hhmm(value: &str) -> Option<u32> {
    let (hours, minutes) = value.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Decide which reminders to send for this tick, by frequency policy:
/// minimal fires on overdue only; balanced picks the single most urgent
/// bucket (today's work only during waking hours); aggressive fires on
/// every bucket, tomorrow's only in the evening.
pub fn plan_notices(
    buckets: &DeadlineBuckets,
    frequency: Frequency,
    now: DateTime<Utc>,
) -> Vec<DeadlineNotice> {
    let mut notices = Vec::new();
    let hour = now.hour();

    match frequency {
        Frequency::Minimal => {
            if !buckets.overdue.is_empty() {
                notices.push(overdue_notice(&buckets.overdue));
            }
        }
        Frequency::Balanced => {
            if !buckets.overdue.is_empty() {
                notices.push(overdue_notice(&buckets.overdue));
            } else if !buckets.due_soon.is_empty() {
                notices.push(due_soon_notice(&buckets.due_soon, now));
            } else if !buckets.due_today.is_empty() && (8..20).contains(&hour) {
                notices.push(due_today_notice(&buckets.due_today));
            }
        }
        Frequency::Aggressive => {
            if !buckets.overdue.is_empty() {
                notices.push(overdue_notice(&buckets.overdue));
            }
            if !buckets.due_soon.is_empty() {
                notices.push(due_soon_notice(&buckets.due_soon, now));
            }
            if !buckets.due_today.is_empty() {
                notices.push(due_today_notice(&buckets.due_today));
            }
            if !buckets.due_tomorrow.is_empty() && hour >= 18 {
                notices.push(due_tomorrow_notice(&buckets.due_tomorrow));
            }
        }
    }

    notices
}

/// Daily summary counts for the morning digest notice.
pub fn daily_summary(buckets: &DeadlineBuckets) -> DeadlineNotice {
    let mut parts = Vec::new();
    if !buckets.overdue.is_empty() {
        parts.push(format!("{} overdue", buckets.overdue.len()));
    }
    if !buckets.due_today.is_empty() {
        parts.push(format!("{} due today", buckets.due_today.len()));
    }
    if !buckets.due_tomorrow.is_empty() {
        parts.push(format!("{} due tomorrow", buckets.due_tomorrow.len()));
    }

    if parts.is_empty() {
        DeadlineNotice {
            title: "Daily Summary".to_string(),
            body: "No urgent assignments. Great job staying on top of your work!".to_string(),
            priority: 1,
        }
    } else {
        DeadlineNotice {
            title: "Daily Summary".to_string(),
            body: format!("You have: {}", parts.join(", ")),
            priority: 2,
        }
    }
}

fn overdue_notice(assignments: &[Assignment]) -> DeadlineNotice {
    if let [only] = assignments {
        return DeadlineNotice {
            title: "Assignment Overdue".to_string(),
            body: format!("{} is overdue", only.name),
            priority: 2,
        };
    }
    let mut body = assignments
        .iter()
        .take(3)
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if assignments.len() > 3 {
        body.push_str(&format!(" and {} more", assignments.len() - 3));
    }
    DeadlineNotice {
        title: format!("{} Assignments Overdue", assignments.len()),
        body,
        priority: 2,
    }
}

fn due_soon_notice(assignments: &[Assignment], now: DateTime<Utc>) -> DeadlineNotice {
    if let [only] = assignments {
        let hours = only
            .due_date
            .map(|due| ((due - now).num_minutes() as f64 / 60.0).ceil().max(1.0) as i64)
            .unwrap_or(1);
        let plural = if hours == 1 { "" } else { "s" };
        return DeadlineNotice {
            title: "Assignment Due Soon".to_string(),
            body: format!("{} is due in {} hour{}", only.name, hours, plural),
            priority: 2,
        };
    }
    DeadlineNotice {
        title: "Assignments Due Soon".to_string(),
        body: format!("{} assignments due in the next 3 hours", assignments.len()),
        priority: 2,
    }
}

fn due_today_notice(assignments: &[Assignment]) -> DeadlineNotice {
    if let [only] = assignments {
        return DeadlineNotice {
            title: "Assignment Due Today".to_string(),
            body: only.name.clone(),
            priority: 1,
        };
    }
    let mut body = assignments
        .iter()
        .take(2)
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if assignments.len() > 2 {
        body.push_str(&format!(" and {} more", assignments.len() - 2));
    }
    DeadlineNotice {
        title: format!("{} Assignments Due Today", assignments.len()),
        body,
        priority: 1,
    }
}

fn due_tomorrow_notice(assignments: &[Assignment]) -> DeadlineNotice {
    let plural = if assignments.len() == 1 { "" } else { "s" };
    let mut body = assignments
        .iter()
        .take(2)
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if assignments.len() > 2 {
        body.push_str(&format!(" and {} more", assignments.len() - 2));
    }
    DeadlineNotice {
        title: format!("{} Assignment{} Due Tomorrow", assignments.len(), plural),
        body,
        priority: 1,
    }
}

#[cfg(test)]
#[path = "deadlines_tests.rs"]
mod tests;
