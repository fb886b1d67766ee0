use brokerage_core_db::models::activity_log::ActivityLogModel;
use crate::utils::{get_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;

pub struct ActivityLogRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl ActivityLogRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for ActivityLogModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ActivityLogModel {
            id: row.try_get("id")?,
            workspace_id: row.try_get("workspace_id")?,
            entity_type: row.try_get("entity_type")?,
            entity_id: row.try_get("entity_id")?,
            action_type: row.try_get("action_type")?,
            actor_id: row.try_get("actor_id")?,
            description: get_heapless_string(row, "description")?,
            metadata: row.try_get("metadata")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
