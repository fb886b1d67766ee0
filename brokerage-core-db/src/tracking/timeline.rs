use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::update_log::UpdateLogModel;
use crate::tracking::days_on_market::whole_days;

/// A span of time a record spent in one status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSegment {
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub duration: Option<Duration>,
    /// Set on the final segment while the record is still in that status
    pub is_ongoing: bool,
    pub changed_by: Option<Uuid>,
}

impl TimelineSegment {
    pub fn duration_label(&self) -> Option<String> {
        self.duration.map(format_duration)
    }
}

/// Rebuilds the status timeline from status log entries, oldest first.
///
/// The caller is responsible for the ordering; entries are used as given.
pub fn build_timeline(
    entries: &[UpdateLogModel],
    current_status: &str,
    now: DateTime<Utc>,
) -> Vec<TimelineSegment> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let status = entry
                .new_value
                .clone()
                .unwrap_or_else(|| current_status.to_string());

            let (ended_at, duration, is_ongoing) = match entries.get(i + 1) {
                Some(next) => (
                    Some(next.updated_at),
                    Some(next.updated_at - entry.updated_at),
                    false,
                ),
                None if status == current_status => (None, Some(now - entry.updated_at), true),
                None => (None, None, false),
            };

            TimelineSegment {
                status,
                started_at: entry.updated_at,
                ended_at,
                duration,
                is_ongoing,
                changed_by: entry.updated_by,
            }
        })
        .collect()
}

pub fn format_duration(duration: Duration) -> String {
    match whole_days(duration) {
        days if days <= 0 => "< 1 day".to_string(),
        1 => "1 day".to_string(),
        days => format!("{days} days"),
    }
}
