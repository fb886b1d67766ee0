use async_trait::async_trait;
use brokerage_core_db::models::contact::ContactModel;
use brokerage_core_db::repository::find_by_id::FindById;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContactRepositoryImpl;

impl ContactRepositoryImpl {
    pub(super) async fn find_by_id_impl(
        repo: &ContactRepositoryImpl,
        workspace_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ContactModel>, Box<dyn Error + Send + Sync>> {
        let query = r#"SELECT * FROM contacts WHERE id = $1 AND workspace_id = $2"#;
        let row = sqlx::query(query)
            .bind(id)
            .bind(workspace_id)
            .fetch_optional(repo.pool.as_ref())
            .await?;

        row.as_ref().map(ContactModel::try_from_row).transpose()
    }
}

#[async_trait]
impl FindById<Postgres, ContactModel> for ContactRepositoryImpl {
    async fn find_by_id(
        &self,
        workspace_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ContactModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_id_impl(self, workspace_id, id).await
    }
}
