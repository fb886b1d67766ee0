use brokerage_core_db::models::pipeline_stage_history::PipelineStageHistoryModel;
use crate::utils::TryFromRow;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;

pub struct StageHistoryRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl StageHistoryRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for PipelineStageHistoryModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(PipelineStageHistoryModel {
            id: row.try_get("id")?,
            workspace_id: row.try_get("workspace_id")?,
            deal_id: row.try_get("deal_id")?,
            from_stage_id: row.try_get("from_stage_id")?,
            to_stage_id: row.try_get("to_stage_id")?,
            changed_by: row.try_get("changed_by")?,
            changed_at: row.try_get("changed_at")?,
        })
    }
}
