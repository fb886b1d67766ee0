use async_trait::async_trait;
use brokerage_core_db::models::update_log::UpdateLogModel;
use brokerage_core_db::repository::append_log::AppendLog;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::{log_table, UpdateLogRepositoryImpl};

impl UpdateLogRepositoryImpl {
    pub(super) async fn append_impl(
        repo: &UpdateLogRepositoryImpl,
        entry: &UpdateLogModel,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let (table, record_column) = log_table(entry.entity_type)?;
        let query = format!(
            r#"
            INSERT INTO {table} (
                id, workspace_id, {record_column}, status, field_changed,
                old_value, new_value, updated_by, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#
        );

        sqlx::query(&query)
            .bind(entry.id)
            .bind(entry.workspace_id)
            .bind(entry.record_id)
            .bind(&entry.status)
            .bind(entry.field_changed.as_str())
            .bind(&entry.old_value)
            .bind(&entry.new_value)
            .bind(entry.updated_by)
            .bind(entry.updated_at)
            .execute(repo.pool.as_ref())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl AppendLog<Postgres, UpdateLogModel> for UpdateLogRepositoryImpl {
    async fn append(&self, entry: &UpdateLogModel) -> Result<(), Box<dyn Error + Send + Sync>> {
        Self::append_impl(self, entry).await
    }
}
