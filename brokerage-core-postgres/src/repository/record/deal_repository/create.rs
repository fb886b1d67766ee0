use async_trait::async_trait;
use brokerage_core_db::models::deal::DealModel;
use brokerage_core_db::repository::create::Create;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::DealRepositoryImpl;

impl DealRepositoryImpl {
    pub(super) async fn create_impl(
        repo: &DealRepositoryImpl,
        item: &DealModel,
    ) -> Result<DealModel, Box<dyn Error + Send + Sync>> {
        let query = r#"
            INSERT INTO deals (
                id, workspace_id, title, side, pipeline_stage_id, contact_id, listing_id,
                value, is_archived, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
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
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(repo.pool.as_ref())
            .await?;

        DealModel::try_from_row(&row)
    }
}

#[async_trait]
impl Create<Postgres, DealModel> for DealRepositoryImpl {
    async fn create(&self, item: &DealModel) -> Result<DealModel, Box<dyn Error + Send + Sync>> {
        Self::create_impl(self, item).await
    }
}
