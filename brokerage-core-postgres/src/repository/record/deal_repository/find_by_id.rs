use async_trait::async_trait;
use brokerage_core_db::models::deal::DealModel;
use brokerage_core_db::repository::find_by_id::FindById;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::DealRepositoryImpl;

impl DealRepositoryImpl {
    pub(super) async fn find_by_id_impl(
        repo: &DealRepositoryImpl,
        workspace_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DealModel>, Box<dyn Error + Send + Sync>> {
        let query = r#"SELECT * FROM deals WHERE id = $1 AND workspace_id = $2"#;
        let row = sqlx::query(query)
            .bind(id)
            .bind(workspace_id)
            .fetch_optional(repo.pool.as_ref())
            .await?;

        row.as_ref().map(DealModel::try_from_row).transpose()
    }
}

#[async_trait]
impl FindById<Postgres, DealModel> for DealRepositoryImpl {
    async fn find_by_id(
        &self,
        workspace_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DealModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_id_impl(self, workspace_id, id).await
    }
}
