use brokerage_core_db::models::contact::ContactModel;
use crate::utils::{get_optional_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;

pub struct ContactRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl ContactRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for ContactModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ContactModel {
            id: row.try_get("id")?,
            workspace_id: row.try_get("workspace_id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: get_optional_heapless_string(row, "phone")?,
            contact_type: row.try_get("contact_type")?,
            status: row.try_get("status")?,
            source: row.try_get("source")?,
            budget_min: row.try_get("budget_min")?,
            budget_max: row.try_get("budget_max")?,
            preferred_zone: row.try_get("preferred_zone")?,
            assigned_agent_id: row.try_get("assigned_agent_id")?,
            notes: row.try_get("notes")?,
            is_archived: row.try_get("is_archived")?,
            created_by: row.try_get("created_by")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
