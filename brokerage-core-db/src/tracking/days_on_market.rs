use brokerage_core_api::ListingStatus;
use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Days on market as shown to users.
///
/// While a listing is ACTIVE the figure is derived from the time since the
/// last status change. In any other status the stored snapshot is returned
/// as is. A listing that was never ACTIVE has no figure at all.
pub fn live_days_on_market(
    status: ListingStatus,
    stored: Option<i32>,
    status_changed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<i64> {
    let stored = stored?;
    match (status, status_changed_at) {
        (ListingStatus::Active, Some(changed_at)) => Some(whole_days(now - changed_at)),
        _ => Some(stored as i64),
    }
}

/// Snapshot to store after a status change. Seeds 0 the first time the
/// listing becomes ACTIVE; an existing figure is never reset.
pub fn seeded_days_on_market(previous: Option<i32>, new_status: ListingStatus) -> Option<i32> {
    match previous {
        None if new_status == ListingStatus::Active => Some(0),
        other => other,
    }
}

pub(crate) fn whole_days(elapsed: chrono::Duration) -> i64 {
    elapsed.num_seconds().div_euclid(SECONDS_PER_DAY)
}
