use brokerage_core_db::models::tracked_record::TrackedRecord;
use brokerage_core_db::models::update_log::UpdateLogModel;
use brokerage_core_db::utils::truncated_string;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub fn create_test_update_log<R: TrackedRecord>(
    record: &R,
    field: &str,
    old_value: Option<&str>,
    new_value: Option<&str>,
    at: DateTime<Utc>,
) -> UpdateLogModel {
    UpdateLogModel {
        id: Uuid::new_v4(),
        workspace_id: record.get_workspace_id(),
        entity_type: R::ENTITY_TYPE,
        record_id: record.get_id(),
        status: new_value.map(str::to_string),
        field_changed: truncated_string(field),
        old_value: old_value.map(str::to_string),
        new_value: new_value.map(str::to_string),
        updated_by: None,
        updated_at: at,
    }
}
