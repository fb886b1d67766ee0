use brokerage_core_api::EntityType;
use brokerage_core_db::models::update_log::UpdateLogModel;
use crate::utils::{get_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;

/// Update logs live in one table per record type. Rows are read back with
/// the owning column aliased to `record_id` and the entity type attached.
pub struct UpdateLogRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl UpdateLogRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Table and record column holding the update log of an entity type
pub(super) fn log_table(
    entity_type: EntityType,
) -> Result<(&'static str, &'static str), Box<dyn Error + Send + Sync>> {
    match entity_type {
        EntityType::Listing => Ok(("listing_updates", "listing_id")),
        EntityType::Contact => Ok(("contact_updates", "contact_id")),
        EntityType::Deal => Err("Deals have no update log".into()),
    }
}

/// Select list shared by the read queries
pub(super) fn select_columns(entity_type: EntityType, record_column: &str) -> String {
    format!(
        "id, workspace_id, {record_column} AS record_id, '{}'::entity_type AS entity_type, \
         status, field_changed, old_value, new_value, updated_by, updated_at",
        entity_type.as_str()
    )
}

impl TryFromRow<PgRow> for UpdateLogModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(UpdateLogModel {
            id: row.try_get("id")?,
            workspace_id: row.try_get("workspace_id")?,
            entity_type: row.try_get("entity_type")?,
            record_id: row.try_get("record_id")?,
            status: row.try_get("status")?,
            field_changed: get_heapless_string(row, "field_changed")?,
            old_value: row.try_get("old_value")?,
            new_value: row.try_get("new_value")?,
            updated_by: row.try_get("updated_by")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
