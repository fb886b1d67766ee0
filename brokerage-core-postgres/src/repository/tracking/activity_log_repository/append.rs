use async_trait::async_trait;
use brokerage_core_db::models::activity_log::ActivityLogModel;
use brokerage_core_db::repository::append_log::AppendLog;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ActivityLogRepositoryImpl;

impl ActivityLogRepositoryImpl {
    pub(super) async fn append_impl(
        repo: &ActivityLogRepositoryImpl,
        entry: &ActivityLogModel,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let query = r#"
            INSERT INTO activity_logs (
                id, workspace_id, entity_type, entity_id, action_type, actor_id,
                description, metadata, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#;

        sqlx::query(query)
            .bind(entry.id)
            .bind(entry.workspace_id)
            .bind(entry.entity_type)
            .bind(entry.entity_id)
            .bind(entry.action_type)
            .bind(entry.actor_id)
            .bind(entry.description.as_str())
            .bind(&entry.metadata)
            .bind(entry.created_at)
            .execute(repo.pool.as_ref())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl AppendLog<Postgres, ActivityLogModel> for ActivityLogRepositoryImpl {
    async fn append(&self, entry: &ActivityLogModel) -> Result<(), Box<dyn Error + Send + Sync>> {
        Self::append_impl(self, entry).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use crate::utils::TryFromRow;
    use brokerage_core_api::{ActionType, EntityType};
    use brokerage_core_db::models::activity_log::{ActivityLogModel, PendingActivity};
    use brokerage_core_db::repository::append_log::AppendLog;
    use brokerage_core_db::testing::fixtures::WORKSPACE_ID;
    use chrono::Utc;
    use serde_json::json;
    use serial_test::serial;
    use uuid::Uuid;

    #[tokio::test]
    #[serial]
    #[ignore = "requires DATABASE_URL"]
    async fn test_append_keeps_metadata() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let activity_log_repo = &ctx.repos().activity_log_repository;

        let entry = PendingActivity {
            action_type: ActionType::StatusChanged,
            description: "Status changed from NEW to ACTIVE".to_string(),
            metadata: json!({"field": "status", "old_value": "NEW", "new_value": "ACTIVE"}),
        }
        .into_model(EntityType::Listing, WORKSPACE_ID, Uuid::new_v4(), None, Utc::now());
        activity_log_repo.append(&entry).await?;

        let row = sqlx::query("SELECT * FROM activity_logs WHERE id = $1")
            .bind(entry.id)
            .fetch_one(ctx.pool.as_ref())
            .await?;
        let loaded = ActivityLogModel::try_from_row(&row)?;

        assert_eq!(loaded.metadata, entry.metadata);
        assert_eq!(loaded.action_type, ActionType::StatusChanged);
        assert_eq!(loaded.description, entry.description);

        Ok(())
    }
}
