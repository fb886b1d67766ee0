use brokerage_core_db::models::deal::DealModel;
use crate::utils::TryFromRow;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;

pub struct DealRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl DealRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for DealModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(DealModel {
            id: row.try_get("id")?,
            workspace_id: row.try_get("workspace_id")?,
            title: row.try_get("title")?,
            side: row.try_get("side")?,
            pipeline_stage_id: row.try_get("pipeline_stage_id")?,
            contact_id: row.try_get("contact_id")?,
            listing_id: row.try_get("listing_id")?,
            value: row.try_get("value")?,
            is_archived: row.try_get("is_archived")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
