use async_trait::async_trait;
use brokerage_core_db::models::pipeline_stage_history::PipelineStageHistoryModel;
use brokerage_core_db::repository::append_log::AppendLog;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::StageHistoryRepositoryImpl;

impl StageHistoryRepositoryImpl {
    pub(super) async fn append_impl(
        repo: &StageHistoryRepositoryImpl,
        entry: &PipelineStageHistoryModel,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let query = r#"
            INSERT INTO pipeline_stage_history (
                id, workspace_id, deal_id, from_stage_id, to_stage_id, changed_by, changed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#;

        sqlx::query(query)
            .bind(entry.id)
            .bind(entry.workspace_id)
            .bind(entry.deal_id)
            .bind(entry.from_stage_id)
            .bind(entry.to_stage_id)
            .bind(entry.changed_by)
            .bind(entry.changed_at)
            .execute(repo.pool.as_ref())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl AppendLog<Postgres, PipelineStageHistoryModel> for StageHistoryRepositoryImpl {
    async fn append(&self, entry: &PipelineStageHistoryModel) -> Result<(), Box<dyn Error + Send + Sync>> {
        Self::append_impl(self, entry).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use crate::utils::{try_from_rows, TryFromRow};
    use brokerage_core_db::models::pipeline_stage_history::PipelineStageHistoryModel;
    use brokerage_core_db::repository::append_log::AppendLog;
    use brokerage_core_db::repository::create::Create;
    use brokerage_core_db::testing::fixtures::{sample_deal, WORKSPACE_ID};
    use chrono::Utc;
    use serial_test::serial;
    use uuid::Uuid;

    #[tokio::test]
    #[serial]
    #[ignore = "requires DATABASE_URL"]
    async fn test_append_requires_existing_deal() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let deal_repo = &ctx.repos().deal_repository;
        let stage_history_repo = &ctx.repos().stage_history_repository;

        let deal = sample_deal(None);
        deal_repo.create(&deal).await?;

        let entry = PipelineStageHistoryModel {
            id: Uuid::new_v4(),
            workspace_id: WORKSPACE_ID,
            deal_id: deal.id,
            from_stage_id: None,
            to_stage_id: Uuid::new_v4(),
            changed_by: None,
            changed_at: Utc::now(),
        };
        stage_history_repo.append(&entry).await?;

        let rows = sqlx::query("SELECT * FROM pipeline_stage_history WHERE deal_id = $1")
            .bind(deal.id)
            .fetch_all(ctx.pool.as_ref())
            .await?;
        let loaded: Vec<PipelineStageHistoryModel> = try_from_rows(&rows)?;
        assert_eq!(loaded.len(), 1);
        assert_eq!(PipelineStageHistoryModel::try_from_row(&rows[0])?.to_stage_id, entry.to_stage_id);

        let orphan = PipelineStageHistoryModel {
            id: Uuid::new_v4(),
            deal_id: Uuid::new_v4(),
            ..entry
        };
        assert!(stage_history_repo.append(&orphan).await.is_err());

        Ok(())
    }
}
