use async_trait::async_trait;
use brokerage_core_db::models::deal::DealModel;
use brokerage_core_db::repository::update::Update;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::DealRepositoryImpl;

impl DealRepositoryImpl {
    pub(super) async fn update_impl(
        repo: &DealRepositoryImpl,
        item: &DealModel,
    ) -> Result<DealModel, Box<dyn Error + Send + Sync>> {
        let query = r#"
            UPDATE deals SET
                title = $3, side = $4, pipeline_stage_id = $5, contact_id = $6,
                listing_id = $7, value = $8, is_archived = $9, updated_at = $10
            WHERE id = $1 AND workspace_id = $2
            RETURNING *
        "#;

        let row = sqlx::query(query)
            .bind(item.id)
            .bind(item.workspace_id)
            .bind(&item.title)
            .bind(item.side)
            .bind(item.pipeline_stage_id)
            .bind(item.contact_id)
            .bind(item.listing_id)
            .bind(item.value)
            .bind(item.is_archived)
            .bind(item.updated_at)
            .fetch_optional(repo.pool.as_ref())
            .await?
            .ok_or_else(|| format!("Deal {} not found", item.id))?;

        DealModel::try_from_row(&row)
    }
}

#[async_trait]
impl Update<Postgres, DealModel> for DealRepositoryImpl {
    async fn update(&self, item: &DealModel) -> Result<DealModel, Box<dyn Error + Send + Sync>> {
        Self::update_impl(self, item).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use brokerage_core_db::repository::create::Create;
    use brokerage_core_db::repository::find_by_id::FindById;
    use brokerage_core_db::repository::update::Update;
    use brokerage_core_db::testing::fixtures::{sample_deal, WORKSPACE_ID};
    use serial_test::serial;
    use uuid::Uuid;

    #[tokio::test]
    #[serial]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_moves_stage() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let deal_repo = &ctx.repos().deal_repository;

        let mut deal = sample_deal(None);
        deal_repo.create(&deal).await?;

        let stage = Uuid::new_v4();
        deal.pipeline_stage_id = Some(stage);
        deal_repo.update(&deal).await?;

        let loaded = deal_repo.find_by_id(WORKSPACE_ID, deal.id).await?;
        assert_eq!(loaded.and_then(|d| d.pipeline_stage_id), Some(stage));

        Ok(())
    }
}
