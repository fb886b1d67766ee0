use async_trait::async_trait;
use brokerage_core_db::models::contact::ContactModel;
use brokerage_core_db::repository::create::Create;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ContactRepositoryImpl;

impl ContactRepositoryImpl {
    pub(super) async fn create_impl(
        repo: &ContactRepositoryImpl,
        item: &ContactModel,
    ) -> Result<ContactModel, Box<dyn Error + Send + Sync>> {
        let query = r#"
            INSERT INTO contacts (
                id, workspace_id, first_name, last_name, email, phone, contact_type, status,
                source, budget_min, budget_max, preferred_zone, assigned_agent_id, notes,
                is_archived, created_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
        "#;

        let row = sqlx::query(query)
            .bind(item.id)
            .bind(item.workspace_id)
            .bind(&item.first_name)
            .bind(&item.last_name)
            .bind(&item.email)
            .bind(item.phone.as_ref().map(|s| s.as_str()))
            .bind(item.contact_type)
            .bind(item.status)
            .bind(&item.source)
            .bind(item.budget_min)
            .bind(item.budget_max)
            .bind(&item.preferred_zone)
            .bind(item.assigned_agent_id)
            .bind(&item.notes)
            .bind(item.is_archived)
            .bind(item.created_by)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(repo.pool.as_ref())
            .await?;

        ContactModel::try_from_row(&row)
    }
}

#[async_trait]
impl Create<Postgres, ContactModel> for ContactRepositoryImpl {
    async fn create(&self, item: &ContactModel) -> Result<ContactModel, Box<dyn Error + Send + Sync>> {
        Self::create_impl(self, item).await
    }
}
